use clap::{Parser, Subcommand};

/// Macro Meal Planner: turn a pasted menu into day plans that fit your calorie and macro targets.
#[derive(Parser, Debug)]
#[command(name = "macro_meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the planner state JSON file.
    #[arg(short, long, default_value = "planner_state.json", global = true)]
    pub file: String,

    /// User whose profile and log are read and written.
    #[arg(short, long, default_value = "local", global = true)]
    pub user: String,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or edit the profile and recompute daily targets.
    ///
    /// Fields not given as flags are prompted for.
    Profile {
        #[arg(long)]
        age: Option<String>,

        /// "male", anything else uses the female formula.
        #[arg(long)]
        gender: Option<String>,

        /// Height in centimetres.
        #[arg(long)]
        height: Option<String>,

        /// Weight in kilograms.
        #[arg(long)]
        weight: Option<String>,

        /// sedentary, light, moderate, active or veryActive.
        #[arg(long)]
        activity: Option<String>,

        /// lose, maintain or gain.
        #[arg(long)]
        goal: Option<String>,
    },

    /// Show daily targets, consumption and what is left.
    Targets,

    /// Parse a menu and build three day-plan options from it.
    Plan {
        /// Read menu text from this file instead of prompting.
        #[arg(short, long)]
        menu: Option<String>,

        /// Saved extraction service reply to use before the local parser.
        #[arg(short, long)]
        extracted: Option<String>,

        /// Mark an item as must-have (repeatable, fuzzy matched).
        #[arg(long = "must-have")]
        must_have: Vec<String>,

        /// Mark an item as not necessary (repeatable, fuzzy matched).
        #[arg(long)]
        skip: Vec<String>,

        /// Write the generated options to a CSV file.
        #[arg(long)]
        export: Option<String>,

        /// Print the extraction service request for the menu and stop.
        ///
        /// Save the service's reply to a file and pass it back with --extracted.
        #[arg(long)]
        print_prompt: bool,

        /// Do not prompt for preferences or meal selection.
        #[arg(long)]
        no_interactive: bool,
    },

    /// Inspect or edit the consumption log.
    Log {
        #[command(subcommand)]
        action: Option<LogAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LogAction {
    /// List logged entries.
    List,

    /// Log one item. Missing nutrition values are estimated from the name.
    Add {
        name: String,

        #[arg(long)]
        calories: Option<f64>,

        #[arg(long)]
        protein: Option<f64>,

        #[arg(long)]
        carbs: Option<f64>,

        #[arg(long)]
        fats: Option<f64>,
    },

    /// Remove the entry at a 1-based position in the list.
    Remove { index: usize },

    /// Remove every entry.
    Clear,
}

impl Default for Command {
    fn default() -> Self {
        Command::Targets
    }
}

impl Default for LogAction {
    fn default() -> Self {
        LogAction::List
    }
}
