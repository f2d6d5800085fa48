use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::{
    ActivityLevel, DayPlan, FoodItem, Gender, MealSlot, Preference, Preferences, Profile,
    ProfileForm,
};
use crate::planner::MealSelection;

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Find the item a typed name refers to.
///
/// Case-insensitive exact match first, then the best fuzzy match above
/// [`FUZZY_MATCH_THRESHOLD`]. Ties keep the earlier item.
pub fn find_item<'a>(items: &'a [FoodItem], query: &str) -> Option<&'a FoodItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    if let Some(item) = items.iter().find(|i| i.name.to_lowercase() == query) {
        return Some(item);
    }

    items
        .iter()
        .map(|i| (i, jaro_winkler(&i.name.to_lowercase(), &query)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .fold(None, |best: Option<(&FoodItem, f64)>, (item, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((item, score)),
        })
        .map(|(item, _)| item)
}

fn prompt_text(prompt: &str, default: Option<String>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

/// Fill in any profile form fields not already given.
///
/// Defaults come from the stored profile when there is one.
pub fn prompt_profile_form(
    mut form: ProfileForm,
    existing: Option<&Profile>,
) -> Result<ProfileForm> {
    if form.age.is_empty() {
        form.age = prompt_text("Age (years)", existing.map(|p| p.age.to_string()))?;
    }

    if form.gender.is_empty() {
        let options = ["male", "female"];
        let default = match existing.map(|p| p.gender) {
            Some(Gender::Other) => 1,
            _ => 0,
        };
        let selection = Select::new()
            .with_prompt("Gender")
            .items(&options)
            .default(default)
            .interact()?;
        form.gender = options[selection].to_string();
    }

    if form.height.is_empty() {
        form.height = prompt_text("Height (cm)", existing.map(|p| p.height_cm.to_string()))?;
    }

    if form.weight.is_empty() {
        form.weight = prompt_text("Weight (kg)", existing.map(|p| p.weight_kg.to_string()))?;
    }

    if form.activity_level.is_empty() {
        let labels: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.label()).collect();
        let default = existing
            .and_then(|p| ActivityLevel::ALL.iter().position(|a| *a == p.activity_level))
            .unwrap_or(2);
        let selection = Select::new()
            .with_prompt("Activity level")
            .items(&labels)
            .default(default)
            .interact()?;
        form.activity_level = labels[selection].to_string();
    }

    if form.goal.is_empty() {
        let options = ["lose", "maintain", "gain"];
        let default = existing
            .and_then(|p| options.iter().position(|g| *g == p.goal.label()))
            .unwrap_or(1);
        let selection = Select::new()
            .with_prompt("Goal")
            .items(&options)
            .default(default)
            .interact()?;
        form.goal = options[selection].to_string();
    }

    Ok(form)
}

/// Read menu lines until an empty line.
pub fn prompt_menu_text() -> Result<String> {
    println!("Paste the menu, one item per line. Press Enter on an empty line to finish.");
    let mut lines = Vec::new();

    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;

        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// Ask for a preference tier per item.
pub fn prompt_preferences(items: &[FoodItem], preferences: &mut Preferences) -> Result<()> {
    let labels: Vec<&str> = Preference::ALL.iter().map(|p| p.label()).collect();

    for item in items {
        let current = preferences.get(&item.id);
        let default = Preference::ALL
            .iter()
            .position(|p| *p == current)
            .unwrap_or(1);

        let selection = Select::new()
            .with_prompt(format!("{} ({:.0} cal)", item.name, item.calories))
            .items(&labels)
            .default(default)
            .interact()?;
        preferences.set(item.id.clone(), Preference::ALL[selection]);
    }

    Ok(())
}

fn meal_summary(plan: &DayPlan, slot: MealSlot) -> String {
    let meal = plan.meal(slot);
    if meal.is_empty() {
        return format!("{}: (nothing)", plan.name);
    }
    let names: Vec<&str> = meal.items.iter().map(|i| i.name.as_str()).collect();
    format!("{}: {} ({:.0} cal)", plan.name, names.join(", "), meal.totals().calories)
}

/// Pick at most one option per meal slot.
pub fn prompt_meal_selection(plans: &[DayPlan]) -> Result<MealSelection> {
    let mut selection = MealSelection::new();

    for slot in MealSlot::ALL {
        let mut options: Vec<String> = plans.iter().map(|p| meal_summary(p, slot)).collect();
        options.push("Skip".to_string());

        let choice = Select::new()
            .with_prompt(format!("Which {} did you eat?", slot.label().to_lowercase()))
            .items(&options)
            .default(options.len() - 1)
            .interact()?;

        if choice < plans.len() && !plans[choice].meal(slot).is_empty() {
            selection.toggle(slot, choice);
        }
    }

    Ok(selection)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
