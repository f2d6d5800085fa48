use crate::models::{DayPlan, FoodItem, MealSlot};

/// Which option's meal the user picked for each slot.
///
/// At most one option per slot: picking a slot from another option replaces
/// the earlier pick, picking the same one again clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealSelection {
    breakfast: Option<usize>,
    lunch: Option<usize>,
    dinner: Option<usize>,
}

impl MealSelection {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut Option<usize> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    /// Option index chosen for `slot`, if any.
    pub fn chosen(&self, slot: MealSlot) -> Option<usize> {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }

    /// Toggle the meal of `slot` from option `plan_index`.
    ///
    /// Returns the option now selected for the slot.
    pub fn toggle(&mut self, slot: MealSlot, plan_index: usize) -> Option<usize> {
        let current = self.slot_mut(slot);
        *current = if *current == Some(plan_index) {
            None
        } else {
            Some(plan_index)
        };
        *current
    }

    pub fn is_empty(&self) -> bool {
        MealSlot::ALL.into_iter().all(|slot| self.chosen(slot).is_none())
    }

    /// Items of every chosen meal, breakfast first.
    ///
    /// Indices that do not name a plan are ignored.
    pub fn selected_items(&self, plans: &[DayPlan]) -> Vec<FoodItem> {
        MealSlot::ALL
            .into_iter()
            .filter_map(|slot| {
                self.chosen(slot)
                    .and_then(|index| plans.get(index))
                    .map(|plan| plan.meal(slot))
            })
            .flat_map(|meal| meal.items.iter().cloned())
            .collect()
    }
}
