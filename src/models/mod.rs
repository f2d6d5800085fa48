pub mod food;
pub mod log;
pub mod plan;
pub mod profile;

pub use food::{Category, FoodItem, Nutrition};
pub use log::{LogEntry, consumed_totals};
pub use plan::{DayPlan, MealPlan, MealSlot, Preference, Preferences};
pub use profile::{ActivityLevel, Gender, Goal, MacroTargets, Profile, ProfileForm, Targets};
