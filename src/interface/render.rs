use crate::models::{
    DayPlan, FoodItem, LogEntry, Nutrition, Preference, Preferences, Targets, consumed_totals,
};
use crate::planner::remaining_budget;

fn nutrition_line(n: &Nutrition) -> String {
    format!(
        "{:>5.0} cal | P {:>4.0}g C {:>4.0}g F {:>4.0}g",
        n.calories, n.protein, n.carbs, n.fats
    )
}

/// Display daily targets, and consumption against them when given.
pub fn display_targets(targets: &Targets, consumed: Option<&Nutrition>) {
    println!();
    println!("=== Daily Targets ===");
    println!();
    println!("BMI:            {:.1}", targets.bmi);
    println!("BMR:            {:.0} kcal", targets.bmr);
    println!("TDEE:           {:.0} kcal", targets.tdee);
    println!("Daily calories: {:.0} kcal", targets.daily_calories);
    println!(
        "Macros:         P {}g  C {}g  F {}g",
        targets.macros.protein, targets.macros.carbs, targets.macros.fats
    );

    if let Some(consumed) = consumed {
        let remaining = remaining_budget(targets, consumed);

        println!();
        println!("Consumed:  {}", nutrition_line(consumed));
        println!("Remaining: {}", nutrition_line(&remaining));
    }
    println!();
}

/// Item count per preference tier, in tier order.
fn tier_summary(items: &[FoodItem], preferences: &Preferences) -> String {
    Preference::ALL
        .iter()
        .map(|tier| format!("{}: {}", tier.label(), preferences.count(items, *tier)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display parsed menu items with their preference tier.
pub fn display_items(items: &[FoodItem], preferences: &Preferences) {
    if items.is_empty() {
        println!("No menu items.");
        return;
    }

    println!();
    println!("=== Menu ({} items) ===", items.len());
    println!("{}", tier_summary(items, preferences));
    println!();

    let max_name_len = items.iter().map(|i| i.name.len()).max().unwrap_or(10);

    for (i, item) in items.iter().enumerate() {
        println!(
            "{:>3}. {:<width$} - {} [{}] ({})",
            i + 1,
            item.name,
            nutrition_line(&item.nutrition()),
            item.category,
            preferences.get(&item.id).label(),
            width = max_name_len
        );
    }
    println!();
}

/// Display every day-plan option, meal by meal.
pub fn display_day_plans(plans: &[DayPlan]) {
    if plans.iter().all(|p| p.item_count() == 0) {
        println!("No plan could be built (no suitable items or no remaining budget).");
        return;
    }

    for plan in plans {
        println!();
        println!("=== {} ===", plan.name);

        for meal in plan.meals() {
            println!();
            println!("  {} - {}", meal.slot.label(), nutrition_line(&meal.totals()));
            if meal.is_empty() {
                println!("    (nothing)");
            }
            for item in &meal.items {
                println!("    - {:<24} {}", item.name, nutrition_line(&item.nutrition()));
            }
        }

        println!();
        println!("  Total: {}", nutrition_line(&plan.totals()));
    }
    println!();
}

/// Display the consumption log with 1-based positions.
pub fn display_log(entries: &[LogEntry]) {
    if entries.is_empty() {
        println!("Nothing logged yet.");
        return;
    }

    println!();
    println!("=== Consumption Log ({} entries) ===", entries.len());
    println!();

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}. {} {:<24} {}",
            i + 1,
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.item.name,
            nutrition_line(&entry.item.nutrition())
        );
    }

    println!();
    println!("Total: {}", nutrition_line(&consumed_totals(entries)));
    println!();
}
