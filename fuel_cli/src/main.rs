use clap::{Parser, Subcommand};
use fuel_core::*;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fuelplan")]
#[command(about = "WHOOP-driven weekly meal plan assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print aggregate statistics from the WHOOP export (default)
    Analyze {
        /// Override the export CSV path
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Assemble the meal-plan request and persist a captured service response
    Plan {
        /// Override the export CSV path
        #[arg(long)]
        export: Option<PathBuf>,

        /// Load the user profile from a TOML file instead of prompting
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Captured generation-service response to parse into the plan
        #[arg(long)]
        response: Option<PathBuf>,

        /// Output path for the structured plan
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    fuel_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Analyze { export }) => cmd_analyze(export, &config),
        Some(Commands::Plan {
            export,
            profile,
            response,
            out,
        }) => cmd_plan(export, profile, response, out, &config),
        None => {
            // Default to "analyze" command
            cmd_analyze(None, &config)
        }
    }
}

fn cmd_analyze(export: Option<PathBuf>, config: &Config) -> Result<()> {
    let export_path = export.unwrap_or_else(|| config.data.export_path.clone());
    let dataset = WhoopDataset::load(&export_path)?;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WHOOP EXPORT SUMMARY");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Rows loaded: {}", dataset.rows().len());
    println!("  Most recent strain: {:.2}", stats::recent_strain(&dataset)?);
    println!("  Average strain: {:.2}", stats::average_strain(&dataset)?);
    println!();
    println!("  {}", stats::average_cals_burned(&dataset)?);
    println!("  {}", stats::average_recovery_score(&dataset)?);
    println!("  {}", stats::common_workouts(&dataset)?);
    println!("  {}", stats::average_workout_duration(&dataset)?);
    println!();
    println!("  Heights (m): {:?}", stats::user_heights(&dataset));
    println!("  Weights (kg): {:?}", stats::user_weights(&dataset));
    println!();

    Ok(())
}

fn cmd_plan(
    export: Option<PathBuf>,
    profile: Option<PathBuf>,
    response: Option<PathBuf>,
    out: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let export_path = export.unwrap_or_else(|| config.data.export_path.clone());
    let dataset = WhoopDataset::load(&export_path)?;

    match response {
        Some(ref response_path) => {
            let body = std::fs::read_to_string(response_path)?;
            let plan = parse_response(&body)?;

            let out_path = out.unwrap_or_else(|| config.data.plan_path.clone());
            write_plan(&plan, &out_path)?;

            println!("✓ Meal plan written to {}", out_path.display());
            println!("  Days: {}", plan.days.len());
            println!("  Estimated cost: ${}", plan.cost);
        }
        None => {
            // No captured response: emit the request for the operator to submit
            let profile = match profile {
                Some(ref path) => UserProfile::load_from(path)?,
                None => {
                    let stdin = io::stdin();
                    prompt_profile(stdin.lock(), io::stdout())?
                }
            };

            let inputs = PlanInputs {
                profile,
                avg_cals_burned: stats::average_cals_burned(&dataset)?,
                common_workouts: stats::common_workouts(&dataset)?,
                avg_workout_duration: stats::average_workout_duration(&dataset)?,
                heights_m: stats::user_heights(&dataset),
                weights_kg: stats::user_weights(&dataset),
                budget_dollars: config.plan.budget_dollars,
            };
            let request = build_request(&inputs);
            println!("─────────────────────────────────────────");
            println!("System: {}", plan::SYSTEM_PROMPT);
            println!("─────────────────────────────────────────");
            println!("{}", request);
        }
    }

    Ok(())
}
