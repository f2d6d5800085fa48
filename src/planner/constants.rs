use crate::models::{ActivityLevel, Goal, MealSlot};

// ─────────────────────────────────────────────────────────────────────────────
// Target calculation
// ─────────────────────────────────────────────────────────────────────────────

/// Mifflin-St Jeor coefficients.
pub const BMR_WEIGHT_COEF: f64 = 10.0;
pub const BMR_HEIGHT_COEF: f64 = 6.25;
pub const BMR_AGE_COEF: f64 = 5.0;
pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_OTHER_OFFSET: f64 = -161.0;

/// Daily deficit applied for a "lose" goal.
pub const LOSE_DEFICIT_KCAL: f64 = 500.0;

/// Daily surplus applied for a "gain" goal.
pub const GAIN_SURPLUS_KCAL: f64 = 300.0;

/// Share of daily calories assigned to each macro.
pub const PROTEIN_CALORIE_SHARE: f64 = 0.30;
pub const CARBS_CALORIE_SHARE: f64 = 0.40;
pub const FATS_CALORIE_SHARE: f64 = 0.30;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FATS: f64 = 9.0;

/// TDEE multiplier for an activity level.
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

/// Calorie adjustment applied on top of TDEE for a goal.
pub fn goal_adjustment(goal: Goal) -> f64 {
    match goal {
        Goal::Lose => -LOSE_DEFICIT_KCAL,
        Goal::Maintain => 0.0,
        Goal::Gain => GAIN_SURPLUS_KCAL,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Meal allocation
// ─────────────────────────────────────────────────────────────────────────────

/// Must-have items are admitted while cumulative calories stay within this
/// factor of the meal's calorie budget.
pub const MUST_HAVE_CALORIE_TOLERANCE: f64 = 1.10;

/// The greedy fill stops once fewer than this many kcal remain.
pub const FILL_STOP_KCAL: f64 = 50.0;

/// Candidate ceiling: remaining kcal times this factor, plus [`CANDIDATE_SLACK_KCAL`].
pub const CANDIDATE_CALORIE_FACTOR: f64 = 1.05;
pub const CANDIDATE_SLACK_KCAL: f64 = 50.0;

/// Cap on a single macro's fill ratio.
pub const MACRO_FILL_CAP: f64 = 1.2;

/// Score for a macro whose headroom is used up when the item still carries it.
pub const SATURATED_MACRO_PENALTY: f64 = -0.1;

/// Composite score weights: protein first, then calorie fill, then carbs/fats.
pub const PROTEIN_WEIGHT: f64 = 2.0;
pub const CALORIE_FILL_WEIGHT: f64 = 1.5;
pub const CARBS_WEIGHT: f64 = 1.0;
pub const FATS_WEIGHT: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Day plan generation
// ─────────────────────────────────────────────────────────────────────────────

/// Number of day-plan options produced per generation run.
pub const DAY_PLAN_COUNT: usize = 3;

/// Pool rotation step between consecutive options.
pub const ROTATION_STEP: usize = 2;

/// Fraction of the remaining daily budget given to a slot.
pub fn slot_share(slot: MealSlot) -> f64 {
    match slot {
        MealSlot::Breakfast => 0.30,
        MealSlot::Lunch => 0.40,
        MealSlot::Dinner => 0.30,
    }
}

/// Display name of the option at `index` ("Option A", "Option B", ...).
pub fn option_name(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("Option {}", letter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_shares_cover_budget() {
        let total: f64 = MealSlot::ALL.into_iter().map(slot_share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_macro_shares_cover_calories() {
        let total = PROTEIN_CALORIE_SHARE + CARBS_CALORIE_SHARE + FATS_CALORIE_SHARE;
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_option_names() {
        assert_eq!(option_name(0), "Option A");
        assert_eq!(option_name(2), "Option C");
    }
}
