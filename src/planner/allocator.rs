use std::collections::HashSet;

use tracing::{debug, trace};

use crate::models::{FoodItem, Nutrition, Preferences};
use crate::planner::constants::*;

/// Items chosen for one meal plus the updated set of used ids.
#[derive(Debug, Clone, Default)]
pub struct MealAllocation {
    /// Must-haves first, then greedy picks in selection order.
    pub items: Vec<FoodItem>,
    pub used_ids: HashSet<String>,
}

impl MealAllocation {
    pub fn totals(&self) -> Nutrition {
        Nutrition::of_items(&self.items)
    }
}

/// Candidate item with its computed score.
#[derive(Debug)]
struct Candidate<'a> {
    item: &'a FoodItem,
    score: f64,
}

/// Contribution of one macro to the score.
///
/// Positive headroom: fill ratio capped at [`MACRO_FILL_CAP`]. Exhausted
/// headroom: a small penalty if the item still carries the macro.
fn macro_term(item_amount: f64, headroom: f64) -> f64 {
    if headroom > 0.0 {
        (item_amount / headroom).min(MACRO_FILL_CAP)
    } else if item_amount > 0.0 {
        SATURATED_MACRO_PENALTY
    } else {
        0.0
    }
}

/// Composite score of an item against the remaining headroom.
///
/// Caller guarantees `remaining.calories >= FILL_STOP_KCAL`.
fn score_item(item: &FoodItem, remaining: &Nutrition) -> f64 {
    let protein = macro_term(item.protein, remaining.protein);
    let carbs = macro_term(item.carbs, remaining.carbs);
    let fats = macro_term(item.fats, remaining.fats);
    let calorie_fill = (item.calories / remaining.calories).min(1.0);

    PROTEIN_WEIGHT * protein
        + CALORIE_FILL_WEIGHT * calorie_fill
        + CARBS_WEIGHT * carbs
        + FATS_WEIGHT * fats
}

/// Largest item calorie count still considered with `remaining_calories` left.
fn candidate_ceiling(remaining_calories: f64) -> f64 {
    remaining_calories * CANDIDATE_CALORIE_FACTOR + CANDIDATE_SLACK_KCAL
}

/// Choose the best next item from `optional`.
///
/// Ties keep the earliest item in pool order.
fn choose_next_item<'a>(
    optional: &[&'a FoodItem],
    used_ids: &HashSet<String>,
    remaining: &Nutrition,
) -> Option<&'a FoodItem> {
    let ceiling = candidate_ceiling(remaining.calories);

    let best = optional
        .iter()
        .copied()
        .filter(|item| !used_ids.contains(&item.id))
        .filter(|item| item.calories <= ceiling)
        .map(|item| Candidate {
            item,
            score: score_item(item, remaining),
        })
        .filter(|c| !c.score.is_nan())
        .fold(None::<Candidate<'a>>, |best, candidate| match best {
            Some(b) if candidate.score <= b.score => Some(b),
            _ => Some(candidate),
        });

    best.map(|c| {
        trace!(item = %c.item.name, score = c.score, "greedy pick");
        c.item
    })
}

/// Fill one meal's budget from `pool`.
///
/// 1. Must-have items, in pool order, are admitted while cumulative calories
///    stay within [`MUST_HAVE_CALORIE_TOLERANCE`] of the calorie budget.
/// 2. Remaining items are added greedily by score until fewer than
///    [`FILL_STOP_KCAL`] remain or nothing fits under the candidate ceiling.
///
/// Items whose id is already in `used_ids` are never chosen; every chosen id
/// is added to the returned set. Under-filling is not an error.
pub fn allocate_meal(
    pool: &[FoodItem],
    preferences: &Preferences,
    mut used_ids: HashSet<String>,
    budget: &Nutrition,
) -> MealAllocation {
    let available: Vec<&FoodItem> = pool
        .iter()
        .filter(|item| !used_ids.contains(&item.id))
        .collect();

    let mut selected: Vec<FoodItem> = Vec::new();
    let mut consumed = Nutrition::default();

    // Must-have pass
    let must_have_limit = budget.calories * MUST_HAVE_CALORIE_TOLERANCE;
    for item in available.iter().filter(|i| preferences.is_must_have(&i.id)) {
        if used_ids.contains(&item.id) {
            continue;
        }
        if consumed.calories + item.calories <= must_have_limit {
            used_ids.insert(item.id.clone());
            consumed += item.nutrition();
            selected.push((*item).clone());
        } else {
            debug!(
                item = %item.name,
                calories = item.calories,
                limit = must_have_limit,
                "must-have does not fit"
            );
        }
    }

    // Greedy fill pass
    let optional: Vec<&FoodItem> = available
        .iter()
        .copied()
        .filter(|item| !preferences.is_must_have(&item.id))
        .collect();

    loop {
        let remaining = *budget - consumed;
        if remaining.calories < FILL_STOP_KCAL {
            break;
        }

        let Some(item) = choose_next_item(&optional, &used_ids, &remaining) else {
            break;
        };

        used_ids.insert(item.id.clone());
        consumed += item.nutrition();
        selected.push(item.clone());
    }

    MealAllocation {
        items: selected,
        used_ids,
    }
}
