pub mod allocator;
pub mod constants;
pub mod generator;
pub mod selection;
pub mod targets;

pub use allocator::{MealAllocation, allocate_meal};
pub use constants::*;
pub use generator::{generate_day_plans, rotated, slot_budget, slot_pools, suitability_pool};
pub use selection::MealSelection;
pub use targets::{
    calculate_bmi, calculate_bmr, calculate_macros, calculate_targets, remaining_budget,
    targets_from_form,
};
