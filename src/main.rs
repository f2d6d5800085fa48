use clap::Parser;
use std::fs;
use std::path::Path;

use macro_meal_planner_rs::cli::{Cli, Command, LogAction};
use macro_meal_planner_rs::error::{PlannerError, Result};
use macro_meal_planner_rs::interface::{
    display_day_plans, display_items, display_log, display_targets, find_item,
    prompt_meal_selection, prompt_menu_text, prompt_preferences, prompt_profile_form,
    prompt_yes_no, write_plans_csv,
};
use macro_meal_planner_rs::logging::init_logging;
use macro_meal_planner_rs::menu::{
    ManualNutrition, MenuExtractor, ParserKind, SavedResponseExtractor, build_extraction_prompt,
    manual_item, parse_menu,
};
use macro_meal_planner_rs::models::{FoodItem, LogEntry, Preference, Preferences, ProfileForm};
use macro_meal_planner_rs::planner::{calculate_targets, generate_day_plans};
use macro_meal_planner_rs::state::{UserStateManager, load_state, save_state};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = Path::new(&cli.file);
    let mut manager = UserStateManager::new(load_state(path)?, cli.user.clone());

    match cli.command.unwrap_or_default() {
        Command::Profile {
            age,
            gender,
            height,
            weight,
            activity,
            goal,
        } => {
            let form = ProfileForm {
                age: age.unwrap_or_default(),
                gender: gender.unwrap_or_default(),
                height: height.unwrap_or_default(),
                weight: weight.unwrap_or_default(),
                activity_level: activity.unwrap_or_default(),
                goal: goal.unwrap_or_default(),
            };
            cmd_profile(&mut manager, form)?;
        }
        Command::Targets => cmd_targets(&manager),
        Command::Plan {
            menu,
            extracted,
            must_have,
            skip,
            export,
            print_prompt,
            no_interactive,
        } => {
            let options = PlanOptions {
                menu,
                extracted,
                must_have,
                skip,
                export,
                print_prompt,
                interactive: !no_interactive,
            };
            cmd_plan(&mut manager, &options)?;
        }
        Command::Log { action } => cmd_log(&mut manager, action.unwrap_or_default())?,
    }

    save_state(path, manager.state())
}

/// Create or replace the profile and its targets.
fn cmd_profile(manager: &mut UserStateManager, form: ProfileForm) -> Result<()> {
    let form = prompt_profile_form(form, manager.profile())?;
    let profile = form.parse()?;

    let targets = calculate_targets(&profile).ok_or_else(|| {
        PlannerError::InvalidProfile(
            "age, height and weight must all be greater than zero".to_string(),
        )
    })?;

    display_targets(&targets, None);
    manager.upsert_profile(profile, targets);
    println!("Profile saved for '{}'.", manager.user());

    Ok(())
}

/// Show targets against what has been logged.
fn cmd_targets(manager: &UserStateManager) {
    match manager.targets() {
        Some(targets) => display_targets(targets, Some(&manager.consumed())),
        None => println!("No profile yet. Run 'profile' first."),
    }
}

struct PlanOptions {
    menu: Option<String>,
    extracted: Option<String>,
    must_have: Vec<String>,
    skip: Vec<String>,
    export: Option<String>,
    print_prompt: bool,
    interactive: bool,
}

/// Parse a menu, build three options and optionally log the chosen meals.
fn cmd_plan(manager: &mut UserStateManager, options: &PlanOptions) -> Result<()> {
    if !options.print_prompt {
        manager.require_targets()?;
    }

    let text = match &options.menu {
        Some(file) => fs::read_to_string(file)?,
        None => prompt_menu_text()?,
    };

    if options.print_prompt {
        println!("{}", build_extraction_prompt(&text));
        return Ok(());
    }

    let extractor = options
        .extracted
        .as_deref()
        .map(SavedResponseExtractor::new);
    let outcome = parse_menu(&text, extractor.as_ref().map(|e| e as &dyn MenuExtractor));

    if let Some(advisory) = &outcome.advisory {
        println!("{}", advisory);
    }
    if outcome.items.is_empty() {
        return Ok(());
    }

    let items = outcome.items;
    let parser = match outcome.parser {
        ParserKind::External => "extraction service",
        ParserKind::Local => "local parser",
    };
    println!("Parsed {} items with the {}.", items.len(), parser);

    let mut preferences = Preferences::reset_for(&items);
    apply_named_preferences(&items, &mut preferences, &options.must_have, Preference::MustHave);
    apply_named_preferences(&items, &mut preferences, &options.skip, Preference::NotNecessary);

    if options.interactive && prompt_yes_no("Set preferences for each item?", false)? {
        prompt_preferences(&items, &mut preferences)?;
    }
    display_items(&items, &preferences);

    let Some(remaining) = manager.remaining() else {
        return Err(PlannerError::MissingTargets(manager.user().to_string()));
    };
    if remaining.calories <= 0.0 {
        println!("No calories left in today's budget.");
    }

    let plans = generate_day_plans(&items, &preferences, &remaining);
    display_day_plans(&plans);

    if let Some(export) = &options.export {
        write_plans_csv(&plans, Path::new(export))?;
        println!("Options written to {}.", export);
    }

    if !options.interactive {
        return Ok(());
    }

    let selection = prompt_meal_selection(&plans)?;
    if selection.is_empty() {
        return Ok(());
    }

    let chosen = selection.selected_items(&plans);
    if prompt_yes_no(&format!("Log {} items as eaten?", chosen.len()), true)? {
        let mut logged = 0;
        for item in chosen {
            if manager.append_log(LogEntry::now(item)) {
                logged += 1;
            }
        }
        println!("Logged {} items.", logged);
    }

    Ok(())
}

fn apply_named_preferences(
    items: &[FoodItem],
    preferences: &mut Preferences,
    names: &[String],
    tier: Preference,
) {
    for name in names {
        match find_item(items, name) {
            Some(item) => {
                preferences.set(item.id.clone(), tier);
                println!("{}: {}", item.name, tier.label());
            }
            None => println!("No menu item matches '{}'.", name),
        }
    }
}

/// List or edit the consumption log.
fn cmd_log(manager: &mut UserStateManager, action: LogAction) -> Result<()> {
    match action {
        LogAction::List => display_log(manager.logs()),
        LogAction::Add {
            name,
            calories,
            protein,
            carbs,
            fats,
        } => {
            let given = ManualNutrition {
                calories,
                protein,
                carbs,
                fats,
            };
            let item = manual_item(format!("manual-{}", manager.logs().len()), &name, given)?;
            let entry = LogEntry::now(item);

            println!("Logged {}.", entry.item.debug_string());
            manager.append_log(entry);
        }
        LogAction::Remove { index } => {
            let removed = index
                .checked_sub(1)
                .and_then(|i| manager.remove_log_at(i))
                .ok_or_else(|| {
                    PlannerError::InvalidInput(format!("no log entry at position {}", index))
                })?;
            println!("Removed {}.", removed.item.name);
        }
        LogAction::Clear => {
            let count = manager.clear_logs();
            println!("Removed {} entries.", count);
        }
    }

    Ok(())
}
