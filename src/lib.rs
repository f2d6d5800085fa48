pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod menu;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{ExtractionError, PlannerError, Result};
pub use models::{DayPlan, FoodItem, LogEntry, MealPlan, MealSlot, Nutrition, Profile, Targets};
