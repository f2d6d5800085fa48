use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::food::{Category, FoodItem, Nutrition};

/// User priority for a parsed item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preference {
    MustHave,
    #[default]
    Optional,
    NotNecessary,
}

impl Preference {
    pub const ALL: [Preference; 3] = [
        Preference::MustHave,
        Preference::Optional,
        Preference::NotNecessary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Preference::MustHave => "must-have",
            Preference::Optional => "optional",
            Preference::NotNecessary => "not-necessary",
        }
    }
}

/// Snapshot of item id to [`Preference`] for one parsing session.
///
/// Ids that were never set read as [`Preference::Optional`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    tiers: HashMap<String, Preference>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session for a parsed batch: every item optional.
    pub fn reset_for(items: &[FoodItem]) -> Self {
        Self {
            tiers: items
                .iter()
                .map(|item| (item.id.clone(), Preference::Optional))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Preference {
        self.tiers.get(id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: impl Into<String>, preference: Preference) {
        self.tiers.insert(id.into(), preference);
    }

    pub fn is_must_have(&self, id: &str) -> bool {
        self.get(id) == Preference::MustHave
    }

    /// Count of items at each tier among `items`.
    pub fn count(&self, items: &[FoodItem], tier: Preference) -> usize {
        items.iter().filter(|item| self.get(&item.id) == tier).count()
    }
}

/// One of the three meals in a day plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }

    /// Lowercase key used inside plan-qualified item ids.
    pub fn key(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    /// Categories considered appropriate for this slot.
    pub fn suitable_categories(self) -> &'static [Category] {
        match self {
            MealSlot::Breakfast => &[Category::Breakfast, Category::Beverage, Category::Snacks],
            MealSlot::Lunch => &[
                Category::MainCourse,
                Category::Bread,
                Category::Sides,
                Category::Beverage,
            ],
            MealSlot::Dinner => &[
                Category::MainCourse,
                Category::Bread,
                Category::Sides,
                Category::Dessert,
            ],
        }
    }

    pub fn suits(self, category: Category) -> bool {
        self.suitable_categories().contains(&category)
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Items chosen for one meal. Totals are always derived from the items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlan {
    pub slot: MealSlot,
    pub items: Vec<FoodItem>,
}

impl MealPlan {
    pub fn new(slot: MealSlot, items: Vec<FoodItem>) -> Self {
        Self { slot, items }
    }

    pub fn totals(&self) -> Nutrition {
        Nutrition::of_items(&self.items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One generated full-day option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub id: String,
    pub name: String,
    pub breakfast: MealPlan,
    pub lunch: MealPlan,
    pub dinner: MealPlan,
}

impl DayPlan {
    pub fn meal(&self, slot: MealSlot) -> &MealPlan {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Meals in breakfast, lunch, dinner order.
    pub fn meals(&self) -> [&MealPlan; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }

    pub fn totals(&self) -> Nutrition {
        self.meals().into_iter().map(MealPlan::totals).sum()
    }

    pub fn item_count(&self) -> usize {
        self.meals().iter().map(|m| m.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cal: f64, category: Category) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: id.to_string(),
            calories: cal,
            protein: cal / 20.0,
            carbs: cal / 10.0,
            fats: cal / 40.0,
            category,
            serving_size: None,
        }
    }

    #[test]
    fn test_preferences_default_optional() {
        let mut prefs = Preferences::new();
        assert_eq!(prefs.get("anything"), Preference::Optional);

        prefs.set("parsed-1", Preference::MustHave);
        assert!(prefs.is_must_have("parsed-1"));
        assert!(!prefs.is_must_have("parsed-2"));
    }

    #[test]
    fn test_preferences_reset_for_batch() {
        let items = vec![
            item("a", 100.0, Category::Snacks),
            item("b", 200.0, Category::Bread),
        ];
        let prefs = Preferences::reset_for(&items);
        assert_eq!(prefs.count(&items, Preference::Optional), 2);
        assert_eq!(prefs.count(&items, Preference::MustHave), 0);
    }

    #[test]
    fn test_slot_suitability() {
        assert!(MealSlot::Breakfast.suits(Category::Beverage));
        assert!(MealSlot::Lunch.suits(Category::Beverage));
        assert!(!MealSlot::Dinner.suits(Category::Beverage));
        assert!(MealSlot::Dinner.suits(Category::Dessert));
        for slot in MealSlot::ALL {
            assert!(!slot.suits(Category::Other));
        }
    }

    #[test]
    fn test_day_plan_totals_derived_from_items() {
        let plan = DayPlan {
            id: "plan-0".to_string(),
            name: "Option A".to_string(),
            breakfast: MealPlan::new(
                MealSlot::Breakfast,
                vec![item("a", 200.0, Category::Breakfast)],
            ),
            lunch: MealPlan::new(
                MealSlot::Lunch,
                vec![
                    item("b", 400.0, Category::MainCourse),
                    item("c", 120.0, Category::Bread),
                ],
            ),
            dinner: MealPlan::new(MealSlot::Dinner, vec![]),
        };

        assert_eq!(plan.lunch.totals().calories, 520.0);
        assert_eq!(plan.totals().calories, 720.0);
        assert_eq!(plan.item_count(), 3);
        assert!(plan.dinner.is_empty());
    }

    #[test]
    fn test_preference_serde() {
        let json = serde_json::to_string(&Preference::NotNecessary).unwrap();
        assert_eq!(json, "\"not-necessary\"");
    }
}
