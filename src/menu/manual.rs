use crate::error::{PlannerError, Result};
use crate::menu::classifier::estimate_nutrition;
use crate::models::FoodItem;

/// Nutrition values typed by the user. Missing fields are estimated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualNutrition {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

/// Build a food item from a typed name, filling gaps from the classifier.
///
/// Empty names and negative or non-finite values are rejected.
pub fn manual_item(id: impl Into<String>, name: &str, given: ManualNutrition) -> Result<FoodItem> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlannerError::InvalidInput("item name is empty".to_string()));
    }

    let estimate = estimate_nutrition(name);
    let item = FoodItem {
        id: id.into(),
        name: name.to_string(),
        calories: given.calories.unwrap_or(estimate.calories),
        protein: given.protein.unwrap_or(estimate.protein),
        carbs: given.carbs.unwrap_or(estimate.carbs),
        fats: given.fats.unwrap_or(estimate.fats),
        category: estimate.category,
        serving_size: None,
    };

    if !item.is_valid() {
        return Err(PlannerError::InvalidInput(format!(
            "nutrition values must be finite and non-negative: {}",
            item.debug_string()
        )));
    }
    Ok(item)
}
