//! Keyword-based nutrition estimates for common prepared foods.
//!
//! Rules are checked top to bottom and the first match wins. Several rules
//! share keywords ("dal tadka" before "dal", "paneer" variants), so the
//! table order is part of the behaviour and must not be re-sorted.

use serde::Serialize;

use crate::models::Category;

/// Estimated nutrition for one serving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutritionEstimate {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub category: Category,
}

const fn estimate(
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    category: Category,
) -> NutritionEstimate {
    NutritionEstimate {
        calories,
        protein,
        carbs,
        fats,
        category,
    }
}

/// Returned when no rule matches.
pub const DEFAULT_ESTIMATE: NutritionEstimate = estimate(250.0, 10.0, 35.0, 8.0, Category::Other);

/// A rule matches when every `all` keyword is present and, if `any` is
/// non-empty, at least one `any` keyword is present.
#[derive(Debug)]
struct Rule {
    all: &'static [&'static str],
    any: &'static [&'static str],
    estimate: NutritionEstimate,
}

impl Rule {
    fn matches(&self, name: &str) -> bool {
        self.all.iter().all(|k| name.contains(k))
            && (self.any.is_empty() || self.any.iter().any(|k| name.contains(k)))
    }
}

const fn any_of(keywords: &'static [&'static str], estimate: NutritionEstimate) -> Rule {
    Rule {
        all: &[],
        any: keywords,
        estimate,
    }
}

const fn all_of(keywords: &'static [&'static str], estimate: NutritionEstimate) -> Rule {
    Rule {
        all: keywords,
        any: &[],
        estimate,
    }
}

use Category::{Beverage, Bread, Breakfast, Dessert, MainCourse, Sides, Snacks};

static RULES: &[Rule] = &[
    // Rice dishes
    any_of(&["biryani"], estimate(450.0, 12.0, 75.0, 12.0, MainCourse)),
    any_of(&["pulao", "pilaf"], estimate(380.0, 10.0, 65.0, 10.0, MainCourse)),
    any_of(&["fried rice"], estimate(400.0, 8.0, 70.0, 12.0, MainCourse)),
    any_of(&["jeera rice", "plain rice"], estimate(200.0, 4.0, 44.0, 1.0, MainCourse)),
    // Breads
    any_of(&["naan"], estimate(260.0, 8.0, 45.0, 5.0, Bread)),
    any_of(&["roti", "chapati"], estimate(120.0, 4.0, 22.0, 2.0, Bread)),
    any_of(&["paratha"], estimate(280.0, 6.0, 38.0, 12.0, Bread)),
    any_of(&["puri", "poori"], estimate(180.0, 3.0, 20.0, 10.0, Bread)),
    // Curries
    any_of(&["chicken curry", "chicken masala"], estimate(320.0, 35.0, 12.0, 18.0, MainCourse)),
    any_of(&["butter chicken"], estimate(400.0, 30.0, 15.0, 25.0, MainCourse)),
    all_of(&["paneer", "butter"], estimate(380.0, 18.0, 22.0, 25.0, MainCourse)),
    Rule {
        all: &["paneer"],
        any: &["tikka", "masala"],
        estimate: estimate(320.0, 20.0, 18.0, 20.0, MainCourse),
    },
    any_of(&["chole", "chana"], estimate(280.0, 14.0, 42.0, 8.0, MainCourse)),
    any_of(&["rajma"], estimate(250.0, 15.0, 38.0, 6.0, MainCourse)),
    // Legumes
    all_of(&["dal", "tadka"], estimate(180.0, 12.0, 25.0, 5.0, MainCourse)),
    any_of(&["dal"], estimate(150.0, 10.0, 22.0, 4.0, MainCourse)),
    // South Indian breakfast
    any_of(&["dosa"], estimate(200.0, 6.0, 35.0, 5.0, Breakfast)),
    any_of(&["idli"], estimate(90.0, 3.0, 17.0, 1.0, Breakfast)),
    any_of(&["vada"], estimate(150.0, 4.0, 18.0, 8.0, Breakfast)),
    any_of(&["upma"], estimate(200.0, 6.0, 32.0, 6.0, Breakfast)),
    any_of(&["uttapam"], estimate(220.0, 7.0, 38.0, 5.0, Breakfast)),
    // Sides
    any_of(&["raita"], estimate(90.0, 4.0, 8.0, 5.0, Sides)),
    any_of(&["salad"], estimate(80.0, 3.0, 12.0, 2.0, Sides)),
    any_of(&["pickle", "achar"], estimate(40.0, 1.0, 6.0, 2.0, Sides)),
    any_of(&["papad"], estimate(50.0, 2.0, 8.0, 1.0, Sides)),
    // Snacks
    any_of(&["samosa"], estimate(250.0, 5.0, 30.0, 13.0, Snacks)),
    any_of(&["pakora", "bhaji"], estimate(200.0, 4.0, 22.0, 12.0, Snacks)),
    any_of(&["sandwich"], estimate(280.0, 12.0, 40.0, 8.0, Snacks)),
    // Desserts
    any_of(&["gulab jamun"], estimate(150.0, 3.0, 25.0, 6.0, Dessert)),
    any_of(&["kheer"], estimate(180.0, 5.0, 28.0, 6.0, Dessert)),
    any_of(&["halwa"], estimate(200.0, 3.0, 32.0, 8.0, Dessert)),
    // Beverages
    any_of(&["tea", "chai"], estimate(60.0, 2.0, 10.0, 2.0, Beverage)),
    any_of(&["coffee"], estimate(50.0, 2.0, 8.0, 2.0, Beverage)),
    any_of(&["lassi"], estimate(150.0, 6.0, 22.0, 4.0, Beverage)),
];

/// Estimate nutrition and category for a food name.
///
/// Case-insensitive substring matching; never fails.
pub fn estimate_nutrition(food_name: &str) -> NutritionEstimate {
    let name = food_name.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&name))
        .map(|rule| rule.estimate)
        .unwrap_or(DEFAULT_ESTIMATE)
}
