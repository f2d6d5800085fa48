use tracing::debug;

use crate::models::{Gender, MacroTargets, Nutrition, Profile, ProfileForm, Targets};
use crate::planner::constants::*;

/// Body Mass Index: weight / height(m)².
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Basal Metabolic Rate using Mifflin-St Jeor.
///
/// male: 10w + 6.25h - 5a + 5, otherwise: 10w + 6.25h - 5a - 161
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: f64, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => BMR_MALE_OFFSET,
        Gender::Other => BMR_OTHER_OFFSET,
    };
    BMR_WEIGHT_COEF * weight_kg + BMR_HEIGHT_COEF * height_cm - BMR_AGE_COEF * age + offset
}

/// Round half up to a whole number of grams.
fn round_grams(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Fixed 30/40/30 split of daily calories into protein/carbs/fats grams.
pub fn calculate_macros(daily_calories: f64) -> MacroTargets {
    MacroTargets {
        protein: round_grams(daily_calories * PROTEIN_CALORIE_SHARE / KCAL_PER_GRAM_PROTEIN),
        carbs: round_grams(daily_calories * CARBS_CALORIE_SHARE / KCAL_PER_GRAM_CARBS),
        fats: round_grams(daily_calories * FATS_CALORIE_SHARE / KCAL_PER_GRAM_FATS),
    }
}

/// Derive targets from a profile.
///
/// Returns `None` when age, height or weight is not strictly positive; no
/// partially computed targets are ever produced.
pub fn calculate_targets(profile: &Profile) -> Option<Targets> {
    if !profile.is_valid() {
        debug!(?profile, "rejecting profile with non-positive measurements");
        return None;
    }

    let weight = f64::from(profile.weight_kg);
    let height = f64::from(profile.height_cm);
    let age = f64::from(profile.age);

    let bmi = calculate_bmi(weight, height);
    let bmr = calculate_bmr(weight, height, age, profile.gender);
    let tdee = bmr * activity_multiplier(profile.activity_level);
    let daily_calories = tdee + goal_adjustment(profile.goal);

    Some(Targets {
        bmi,
        bmr,
        tdee,
        daily_calories,
        macros: calculate_macros(daily_calories),
    })
}

/// Parse raw form data and derive targets; `None` on any invalid field.
pub fn targets_from_form(form: &ProfileForm) -> Option<Targets> {
    form.parse().ok().as_ref().and_then(calculate_targets)
}

/// What is left of today's targets after `consumed`. Fields may be negative.
pub fn remaining_budget(targets: &Targets, consumed: &Nutrition) -> Nutrition {
    let daily = Nutrition::new(
        targets.daily_calories,
        targets.macros.protein as f64,
        targets.macros.carbs as f64,
        targets.macros.fats as f64,
    );
    daily - *consumed
}
