use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// Menu category used to decide which meal slots an item suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    #[serde(rename = "Main Course")]
    MainCourse,
    Bread,
    Sides,
    Snacks,
    Dessert,
    Beverage,
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Breakfast,
        Category::MainCourse,
        Category::Bread,
        Category::Sides,
        Category::Snacks,
        Category::Dessert,
        Category::Beverage,
        Category::Other,
    ];

    /// Display label, identical to the wire format.
    pub fn label(self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::MainCourse => "Main Course",
            Category::Bread => "Bread",
            Category::Sides => "Sides",
            Category::Snacks => "Snacks",
            Category::Dessert => "Dessert",
            Category::Beverage => "Beverage",
            Category::Other => "Other",
        }
    }

    /// Lenient label lookup (case-insensitive, surrounding whitespace ignored).
    ///
    /// Unknown labels map to [`Category::Other`].
    pub fn from_label(label: &str) -> Self {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calories plus the three tracked macros.
///
/// Used both for budgets (targets, remaining headroom) and for aggregate
/// totals. Values may go negative when used as headroom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Nutrition {
    pub fn new(calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fats,
        }
    }

    /// Multiply every field by the same factor.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fats: self.fats * factor,
        }
    }

    /// Sum the nutrition of a sequence of items.
    pub fn of_items<'a>(items: impl IntoIterator<Item = &'a FoodItem>) -> Self {
        items.into_iter().map(FoodItem::nutrition).sum()
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(self, rhs: Self) -> Self::Output {
        Nutrition {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
        }
    }
}

impl AddAssign for Nutrition {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Nutrition {
    type Output = Nutrition;

    fn sub(self, rhs: Self) -> Self::Output {
        Nutrition {
            calories: self.calories - rhs.calories,
            protein: self.protein - rhs.protein,
            carbs: self.carbs - rhs.carbs,
            fats: self.fats - rhs.fats,
        }
    }
}

impl Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::default(), Add::add)
    }
}

/// A food item parsed from a menu, with estimated nutrition.
///
/// `id` is unique within the batch that produced it. Items are never edited
/// after creation; the planner makes relabelled copies instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
}

impl FoodItem {
    #[inline]
    pub fn nutrition(&self) -> Nutrition {
        Nutrition::new(self.calories, self.protein, self.carbs, self.fats)
    }

    /// Copy of this item under a different id.
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }

    /// Basic validation: all nutrition values finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fats]
            .into_iter()
            .all(|v| v.is_finite() && v >= 0.0)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: {} cal, P:{} C:{} F:{} ({})",
            self.name, self.id, self.calories, self.protein, self.carbs, self.fats, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> FoodItem {
        FoodItem {
            id: "parsed-0".to_string(),
            name: "Dal Tadka".to_string(),
            calories: 180.0,
            protein: 12.0,
            carbs: 25.0,
            fats: 5.0,
            category: Category::MainCourse,
            serving_size: None,
        }
    }

    #[test]
    fn test_category_serde_labels() {
        let json = serde_json::to_string(&Category::MainCourse).unwrap();
        assert_eq!(json, "\"Main Course\"");

        let parsed: Category = serde_json::from_str("\"Dessert\"").unwrap();
        assert_eq!(parsed, Category::Dessert);

        let unknown: Category = serde_json::from_str("\"Soup\"").unwrap();
        assert_eq!(unknown, Category::Other);
    }

    #[test]
    fn test_category_from_label_lenient() {
        assert_eq!(Category::from_label(" main course "), Category::MainCourse);
        assert_eq!(Category::from_label("BEVERAGE"), Category::Beverage);
        assert_eq!(Category::from_label("Appetizer"), Category::Other);
    }

    #[test]
    fn test_nutrition_sum_of_items() {
        let a = sample_item();
        let b = FoodItem {
            calories: 120.0,
            protein: 4.0,
            carbs: 22.0,
            fats: 2.0,
            ..sample_item()
        };
        let total = Nutrition::of_items([&a, &b]);
        assert_eq!(total, Nutrition::new(300.0, 16.0, 47.0, 7.0));
        assert_eq!(Nutrition::of_items(std::iter::empty()), Nutrition::default());
    }

    #[test]
    fn test_with_id_keeps_nutrition() {
        let item = sample_item();
        let copy = item.with_id("plan-1-lunch-parsed-0");
        assert_eq!(copy.id, "plan-1-lunch-parsed-0");
        assert_eq!(copy.nutrition(), item.nutrition());
        assert_eq!(copy.name, item.name);
    }

    #[test]
    fn test_serde_camel_case_and_optional_serving() {
        let mut item = sample_item();
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("servingSize").is_none());

        item.serving_size = Some("1 bowl".to_string());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["servingSize"], "1 bowl");
        assert_eq!(json["category"], "Main Course");
    }

    #[test]
    fn test_is_valid() {
        assert!(sample_item().is_valid());
        let mut bad = sample_item();
        bad.fats = -1.0;
        assert!(!bad.is_valid());
    }
}
