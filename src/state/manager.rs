use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::models::{LogEntry, Nutrition, Profile, Targets, consumed_totals};
use crate::planner::targets::remaining_budget;
use crate::state::persistence::{StateFile, UserRecord};

/// Read-modify-write access to one user's record inside a [`StateFile`].
pub struct UserStateManager {
    state: StateFile,
    user: String,
}

impl UserStateManager {
    pub fn new(state: StateFile, user: impl Into<String>) -> Self {
        Self {
            state,
            user: user.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Current user's record, if anything was ever stored for them.
    pub fn record(&self) -> Option<&UserRecord> {
        self.state.users.get(&self.user)
    }

    fn record_mut(&mut self) -> &mut UserRecord {
        self.state.users.entry(self.user.clone()).or_default()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.record().and_then(|r| r.profile.as_ref())
    }

    pub fn targets(&self) -> Option<&Targets> {
        self.record().and_then(|r| r.targets.as_ref())
    }

    /// Targets, or [`PlannerError::MissingTargets`].
    pub fn require_targets(&self) -> Result<&Targets> {
        self.targets()
            .ok_or_else(|| PlannerError::MissingTargets(self.user.clone()))
    }

    pub fn logs(&self) -> &[LogEntry] {
        self.record().map(|r| r.logs.as_slice()).unwrap_or(&[])
    }

    /// Merge-style upsert: profile and targets are replaced, logs untouched.
    pub fn upsert_profile(&mut self, profile: Profile, targets: Targets) {
        let record = self.record_mut();
        record.profile = Some(profile);
        record.targets = Some(targets);
        info!(user = %self.user, "profile and targets updated");
    }

    /// Append an entry unless an identical one is already logged.
    ///
    /// Returns whether the log changed.
    pub fn append_log(&mut self, entry: LogEntry) -> bool {
        let logs = &mut self.record_mut().logs;
        if logs.contains(&entry) {
            debug!(item = %entry.item.name, "identical log entry already present");
            return false;
        }
        logs.push(entry);
        true
    }

    /// Remove every entry equal to `entry`. Absent entries are a no-op.
    ///
    /// Returns whether the log changed.
    pub fn remove_log(&mut self, entry: &LogEntry) -> bool {
        let logs = &mut self.record_mut().logs;
        let before = logs.len();
        logs.retain(|e| e != entry);
        before != logs.len()
    }

    /// Remove the entry at `index`, returning it.
    pub fn remove_log_at(&mut self, index: usize) -> Option<LogEntry> {
        let entry = self.logs().get(index).cloned()?;
        self.remove_log(&entry);
        Some(entry)
    }

    /// Drop the whole history, returning how many entries were removed.
    pub fn clear_logs(&mut self) -> usize {
        let logs = &mut self.record_mut().logs;
        let count = logs.len();
        logs.clear();
        count
    }

    pub fn consumed(&self) -> Nutrition {
        consumed_totals(self.logs())
    }

    /// Targets minus consumption, when targets exist.
    pub fn remaining(&self) -> Option<Nutrition> {
        self.targets()
            .map(|targets| remaining_budget(targets, &self.consumed()))
    }

    pub fn state(&self) -> &StateFile {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Category, FoodItem, Gender, Goal};
    use crate::planner::targets::calculate_targets;
    use chrono::{TimeZone, Utc};

    fn sample_profile() -> Profile {
        Profile {
            age: 25,
            gender: Gender::Male,
            height_cm: 180,
            weight_kg: 75,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        }
    }

    fn entry(name: &str, calories: f64, minute: u32) -> LogEntry {
        LogEntry::new(
            FoodItem {
                id: format!("parsed-{}", minute),
                name: name.to_string(),
                calories,
                protein: 10.0,
                carbs: 20.0,
                fats: 5.0,
                category: Category::MainCourse,
                serving_size: None,
            },
            Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap(),
        )
    }

    fn manager_with_targets() -> UserStateManager {
        let mut manager = UserStateManager::new(StateFile::default(), "local");
        let profile = sample_profile();
        let targets = calculate_targets(&profile).unwrap();
        manager.upsert_profile(profile, targets);
        manager
    }

    #[test]
    fn test_upsert_keeps_logs() {
        let mut manager = manager_with_targets();
        manager.append_log(entry("Rajma", 250.0, 1));

        let mut edited = sample_profile();
        edited.goal = Goal::Lose;
        let targets = calculate_targets(&edited).unwrap();
        manager.upsert_profile(edited, targets);

        assert_eq!(manager.profile().unwrap().goal, Goal::Lose);
        assert_eq!(manager.logs().len(), 1);
    }

    #[test]
    fn test_append_is_set_like() {
        let mut manager = manager_with_targets();
        assert!(manager.append_log(entry("Rajma", 250.0, 1)));
        assert!(!manager.append_log(entry("Rajma", 250.0, 1)));
        assert!(manager.append_log(entry("Rajma", 250.0, 2)));
        assert_eq!(manager.logs().len(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut manager = manager_with_targets();
        manager.append_log(entry("Rajma", 250.0, 1));

        assert!(manager.remove_log(&entry("Rajma", 250.0, 1)));
        assert!(!manager.remove_log(&entry("Rajma", 250.0, 1)));
        assert!(manager.logs().is_empty());
    }

    #[test]
    fn test_remove_at_index() {
        let mut manager = manager_with_targets();
        manager.append_log(entry("Idli", 90.0, 1));
        manager.append_log(entry("Dosa", 200.0, 2));

        let removed = manager.remove_log_at(0).unwrap();
        assert_eq!(removed.item.name, "Idli");
        assert!(manager.remove_log_at(5).is_none());
        assert_eq!(manager.logs().len(), 1);
    }

    #[test]
    fn test_remaining_subtracts_consumption() {
        let mut manager = manager_with_targets();
        let daily = manager.targets().unwrap().daily_calories;
        manager.append_log(entry("Dosa", 200.0, 1));
        manager.append_log(entry("Dal", 150.0, 2));

        let remaining = manager.remaining().unwrap();
        assert!((remaining.calories - (daily - 350.0)).abs() < 1e-9);
        assert_eq!(remaining.protein, 204.0 - 20.0);
        assert_eq!(manager.clear_logs(), 2);
        assert_eq!(manager.consumed(), Nutrition::default());
    }

    #[test]
    fn test_missing_targets() {
        let manager = UserStateManager::new(StateFile::default(), "nobody");
        assert!(manager.remaining().is_none());
        assert!(matches!(
            manager.require_targets(),
            Err(PlannerError::MissingTargets(_))
        ));
        assert!(manager.logs().is_empty());
    }

    #[test]
    fn test_users_are_isolated() {
        let manager = manager_with_targets();
        let state = manager.state().clone();
        let other = UserStateManager::new(state, "someone-else");
        assert!(other.targets().is_none());
        assert!(other.state().users.contains_key("local"));
    }
}
