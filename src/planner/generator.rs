use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::{DayPlan, FoodItem, MealPlan, MealSlot, Nutrition, Preference, Preferences};
use crate::planner::allocator::allocate_meal;
use crate::planner::constants::{DAY_PLAN_COUNT, ROTATION_STEP, option_name, slot_share};

/// A slot's share of the remaining daily budget, applied to every field.
pub fn slot_budget(remaining: &Nutrition, slot: MealSlot) -> Nutrition {
    remaining.scale(slot_share(slot))
}

/// Candidate pool for a slot.
///
/// Not-necessary items are left out. Must-have items come first, then
/// optional items, each group in source order.
pub fn suitability_pool(
    items: &[FoodItem],
    preferences: &Preferences,
    slot: MealSlot,
) -> Vec<FoodItem> {
    let suitable = |tier: Preference| {
        items
            .iter()
            .filter(move |item| preferences.get(&item.id) == tier && slot.suits(item.category))
            .cloned()
    };

    suitable(Preference::MustHave)
        .chain(suitable(Preference::Optional))
        .collect()
}

/// Pools for breakfast, lunch and dinner.
///
/// An empty breakfast pool borrows the lunch pool.
pub fn slot_pools(items: &[FoodItem], preferences: &Preferences) -> [Vec<FoodItem>; 3] {
    let lunch = suitability_pool(items, preferences, MealSlot::Lunch);
    let dinner = suitability_pool(items, preferences, MealSlot::Dinner);
    let mut breakfast = suitability_pool(items, preferences, MealSlot::Breakfast);
    if breakfast.is_empty() {
        debug!("no breakfast-suitable items, drawing breakfast from the lunch pool");
        breakfast = lunch.clone();
    }
    [breakfast, lunch, dinner]
}

/// Cyclic left shift of a pool copy. Empty pools stay empty.
pub fn rotated(pool: &[FoodItem], shift: usize) -> Vec<FoodItem> {
    let mut copy = pool.to_vec();
    if !copy.is_empty() {
        let len = copy.len();
        copy.rotate_left(shift % len);
    }
    copy
}

/// Id of an item once placed in a given option and slot.
pub fn plan_item_id(plan_index: usize, slot: MealSlot, source_id: &str) -> String {
    format!("plan-{}-{}-{}", plan_index, slot.key(), source_id)
}

/// Produce the day-plan options from one parsed pool.
///
/// Option `i` rotates every slot pool left by `2 * i` so the greedy pass
/// meets items in a different order. Each option owns its used-id set,
/// shared by its three meals so no item repeats within a day.
pub fn generate_day_plans(
    items: &[FoodItem],
    preferences: &Preferences,
    remaining: &Nutrition,
) -> [DayPlan; DAY_PLAN_COUNT] {
    let pools = slot_pools(items, preferences);

    std::array::from_fn(|plan_index| {
        let shift = ROTATION_STEP * plan_index;
        let mut used_ids: HashSet<String> = HashSet::new();

        let [breakfast, lunch, dinner]: [MealPlan; 3] = std::array::from_fn(|slot_index| {
            let slot = MealSlot::ALL[slot_index];
            let pool = rotated(&pools[slot_index], shift);
            let allocation = allocate_meal(
                &pool,
                preferences,
                std::mem::take(&mut used_ids),
                &slot_budget(remaining, slot),
            );
            used_ids = allocation.used_ids;

            let relabelled = allocation
                .items
                .iter()
                .map(|item| item.with_id(plan_item_id(plan_index, slot, &item.id)))
                .collect();
            MealPlan::new(slot, relabelled)
        });

        let plan = DayPlan {
            id: format!("plan-{}", plan_index),
            name: option_name(plan_index),
            breakfast,
            lunch,
            dinner,
        };

        let totals = plan.totals();
        info!(
            plan = %plan.name,
            items = plan.item_count(),
            calories = totals.calories,
            protein = totals.protein,
            "generated day plan"
        );
        plan
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn item(id: &str, cal: f64, category: Category) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: id.to_string(),
            calories: cal,
            protein: cal / 25.0,
            carbs: cal / 8.0,
            fats: cal / 30.0,
            category,
            serving_size: None,
        }
    }

    fn pool_ids(pool: &[FoodItem]) -> Vec<&str> {
        pool.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_rotation() {
        let pool: Vec<FoodItem> = ["a", "b", "c"]
            .iter()
            .map(|id| item(id, 100.0, Category::Snacks))
            .collect();
        assert_eq!(pool_ids(&rotated(&pool, 0)), vec!["a", "b", "c"]);
        assert_eq!(pool_ids(&rotated(&pool, 2)), vec!["c", "a", "b"]);
        assert_eq!(pool_ids(&rotated(&pool, 4)), vec!["b", "c", "a"]);
        assert!(rotated(&[], 4).is_empty());
    }

    #[test]
    fn test_pools_order_and_exclusions() {
        let items = vec![
            item("naan", 260.0, Category::Bread),
            item("curry", 320.0, Category::MainCourse),
            item("pickle", 40.0, Category::Sides),
            item("kheer", 180.0, Category::Dessert),
        ];
        let mut prefs = Preferences::reset_for(&items);
        prefs.set("curry", Preference::MustHave);
        prefs.set("pickle", Preference::NotNecessary);

        let lunch = suitability_pool(&items, &prefs, MealSlot::Lunch);
        assert_eq!(pool_ids(&lunch), vec!["curry", "naan"]);

        let dinner = suitability_pool(&items, &prefs, MealSlot::Dinner);
        assert_eq!(pool_ids(&dinner), vec!["curry", "naan", "kheer"]);
    }

    #[test]
    fn test_breakfast_borrows_lunch_pool() {
        let items = vec![item("rice", 200.0, Category::MainCourse)];
        let prefs = Preferences::reset_for(&items);
        let [breakfast, lunch, _] = slot_pools(&items, &prefs);
        assert_eq!(pool_ids(&breakfast), pool_ids(&lunch));
    }

    #[test]
    fn test_slot_budget_split() {
        let remaining = Nutrition::new(2000.0, 150.0, 200.0, 60.0);
        assert_eq!(slot_budget(&remaining, MealSlot::Lunch).calories, 800.0);
        assert!((slot_budget(&remaining, MealSlot::Breakfast).protein - 45.0).abs() < 1e-9);
        assert!((slot_budget(&remaining, MealSlot::Dinner).fats - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_item_reused_within_a_plan() {
        // Main course suits both lunch and dinner
        let items = vec![
            item("curry", 300.0, Category::MainCourse),
            item("dal", 150.0, Category::MainCourse),
        ];
        let prefs = Preferences::reset_for(&items);
        let remaining = Nutrition::new(3000.0, 200.0, 300.0, 90.0);

        for plan in generate_day_plans(&items, &prefs, &remaining) {
            let sources: Vec<String> = plan
                .meals()
                .iter()
                .flat_map(|m| m.items.iter())
                .map(|i| i.name.clone())
                .collect();
            let unique: HashSet<&String> = sources.iter().collect();
            assert_eq!(unique.len(), sources.len());
        }
    }

    #[test]
    fn test_options_start_from_rotated_pools() {
        // Identical snacks tie on score; breakfast (0.3 of 700) admits one
        let items: Vec<FoodItem> = ["a", "b", "c"]
            .iter()
            .map(|id| item(id, 200.0, Category::Snacks))
            .collect();
        let prefs = Preferences::reset_for(&items);
        let remaining = Nutrition::new(700.0, 30.0, 90.0, 25.0);

        let plans = generate_day_plans(&items, &prefs, &remaining);
        let picks: Vec<Vec<&str>> = plans
            .iter()
            .map(|plan| plan.breakfast.items.iter().map(|i| i.name.as_str()).collect())
            .collect();
        assert_eq!(picks, vec![vec!["a"], vec!["c"], vec!["b"]]);
    }

    #[test]
    fn test_plan_item_ids_are_qualified() {
        let items = vec![item("idli", 90.0, Category::Breakfast)];
        let prefs = Preferences::reset_for(&items);
        let remaining = Nutrition::new(2000.0, 100.0, 250.0, 60.0);
        let plans = generate_day_plans(&items, &prefs, &remaining);

        assert_eq!(plans[1].breakfast.items[0].id, "plan-1-breakfast-idli");
        assert_eq!(plans[0].id, "plan-0");
        assert_eq!(plans[2].name, "Option C");
    }
}
