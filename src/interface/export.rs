use std::path::Path;

use crate::error::Result;
use crate::models::DayPlan;

/// Write every item of every option to a CSV file, one row per item.
pub fn write_plans_csv(plans: &[DayPlan], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "option", "meal", "item", "category", "calories", "protein", "carbs", "fats",
    ])?;

    for plan in plans {
        for meal in plan.meals() {
            for item in &meal.items {
                wtr.write_record([
                    plan.name.clone(),
                    meal.slot.label().to_string(),
                    item.name.clone(),
                    item.category.label().to_string(),
                    format!("{:.0}", item.calories),
                    format!("{:.1}", item.protein),
                    format!("{:.1}", item.carbs),
                    format!("{:.1}", item.fats),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
