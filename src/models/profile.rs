use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Only the male branch of Mifflin-St Jeor is distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "veryActive",
        }
    }

    fn parse(input: &str) -> Option<Self> {
        let normalized: String = input
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.label().to_lowercase() == normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    pub fn label(self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }

    /// Anything that is not "lose" or "gain" keeps calories at TDEE.
    fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "lose" => Goal::Lose,
            "gain" => Goal::Gain,
            _ => Goal::Maintain,
        }
    }
}

/// Biometric profile. Replaced wholesale on edit.
///
/// Numeric fields are signed so that out-of-range input can be represented
/// and rejected by the target calculator rather than by the type system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub age: i32,
    pub gender: Gender,
    pub height_cm: i32,
    pub weight_kg: i32,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl Profile {
    /// Age, height and weight are all strictly positive.
    pub fn is_valid(&self) -> bool {
        self.age > 0 && self.height_cm > 0 && self.weight_kg > 0
    }
}

/// Raw profile form data, every field as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub age: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
    pub activity_level: String,
    pub goal: String,
}

impl ProfileForm {
    /// Convert form strings into a typed [`Profile`].
    ///
    /// Numbers take the leading integer of the field ("180cm" is 180).
    /// Positivity is not checked here.
    pub fn parse(&self) -> Result<Profile> {
        let age = leading_int(&self.age)
            .ok_or_else(|| PlannerError::InvalidProfile(format!("age '{}'", self.age)))?;
        let height_cm = leading_int(&self.height)
            .ok_or_else(|| PlannerError::InvalidProfile(format!("height '{}'", self.height)))?;
        let weight_kg = leading_int(&self.weight)
            .ok_or_else(|| PlannerError::InvalidProfile(format!("weight '{}'", self.weight)))?;
        let activity_level = ActivityLevel::parse(&self.activity_level).ok_or_else(|| {
            PlannerError::InvalidProfile(format!("activity level '{}'", self.activity_level))
        })?;

        let gender = if self.gender.trim().eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Other
        };

        Ok(Profile {
            age,
            gender,
            height_cm,
            weight_kg,
            activity_level,
            goal: Goal::parse(&self.goal),
        })
    }
}

/// Leading optionally-signed integer of a string, ignoring leading whitespace.
fn leading_int(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i32>().ok().map(|v| v * sign)
}

/// Daily macro targets in whole grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
}

/// Derived snapshot of a [`Profile`]. Recomputed, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Targets {
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calories: f64,
    pub macros: MacroTargets,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(age: &str, height: &str, weight: &str) -> ProfileForm {
        ProfileForm {
            age: age.to_string(),
            gender: "male".to_string(),
            height: height.to_string(),
            weight: weight.to_string(),
            activity_level: "moderate".to_string(),
            goal: "maintain".to_string(),
        }
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("180"), Some(180));
        assert_eq!(leading_int(" 180cm"), Some(180));
        assert_eq!(leading_int("-5"), Some(-5));
        assert_eq!(leading_int("+7kg"), Some(7));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn test_parse_form() {
        let profile = form("25", "180", "75").parse().unwrap();
        assert_eq!(profile.age, 25);
        assert_eq!(profile.height_cm, 180);
        assert_eq!(profile.weight_kg, 75);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.goal, Goal::Maintain);
        assert!(profile.is_valid());
    }

    #[test]
    fn test_parse_form_rejects_non_numeric() {
        assert!(matches!(
            form("twenty", "180", "75").parse(),
            Err(PlannerError::InvalidProfile(_))
        ));
        assert!(form("25", "", "75").parse().is_err());
    }

    #[test]
    fn test_parse_form_keeps_non_positive_for_calculator() {
        let profile = form("0", "180", "-3").parse().unwrap();
        assert!(!profile.is_valid());
    }

    #[test]
    fn test_activity_level_aliases() {
        let mut f = form("25", "180", "75");
        for alias in ["veryActive", "very-active", "VERY_ACTIVE", "very active"] {
            f.activity_level = alias.to_string();
            assert_eq!(f.parse().unwrap().activity_level, ActivityLevel::VeryActive);
        }
        f.activity_level = "extreme".to_string();
        assert!(f.parse().is_err());
    }

    #[test]
    fn test_gender_and_goal_fallbacks() {
        let mut f = form("25", "180", "75");
        f.gender = "female".to_string();
        f.goal = "bulk".to_string();
        let profile = f.parse().unwrap();
        assert_eq!(profile.gender, Gender::Other);
        assert_eq!(profile.goal, Goal::Maintain);
    }

    #[test]
    fn test_profile_serde_uses_wire_names() {
        let profile = form("25", "180", "75").parse().unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["activityLevel"], "moderate");
        assert_eq!(json["gender"], "male");

        let other: Gender = serde_json::from_str("\"female\"").unwrap();
        assert_eq!(other, Gender::Other);
        let very: ActivityLevel = serde_json::from_str("\"veryActive\"").unwrap();
        assert_eq!(very, ActivityLevel::VeryActive);
    }
}
