pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_plans_csv;
pub use prompts::{
    FUZZY_MATCH_THRESHOLD, find_item, prompt_meal_selection, prompt_menu_text,
    prompt_preferences, prompt_profile_form, prompt_yes_no,
};
pub use render::{display_day_plans, display_items, display_log, display_targets};
