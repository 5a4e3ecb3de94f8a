//! Command-line interface for calculating transmission costs.
use crate::input::capacity::read_capacities;
use crate::input::load_model;
use crate::log;
use crate::model::Model;
use crate::output::metadata::write_metadata;
use crate::output::{DataWriter, create_output_directory, get_output_dir};
use crate::settings::Settings;
use crate::units::{Capacity, Money};
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use ndarray::Array2;
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// Calculate annualised transmission costs between the zones of an energy system model.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Print the documentation for all commands in markdown format
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for calculating and writing costs
#[derive(Args, Default)]
pub struct RunOpts {
    /// Folder to write results to (defaults to transmission_results/<model name>)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Delete the contents of the output folder if it is not empty
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate transmission costs for the model in a folder.
    Run {
        /// Folder containing the model files.
        model_dir: PathBuf,
        /// Where to write results
        #[command(flatten)]
        opts: RunOpts,
    },
    /// List, inspect, extract or run the bundled example models.
    Example {
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Check the model in a folder for errors without writing any output.
    Validate {
        /// Folder containing the model files.
        model_dir: PathBuf,
    },
    /// Manage the program settings file.
    Settings {
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

/// Parse command-line arguments and execute the requested command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    match cli.command {
        Some(Commands::Run { model_dir, opts }) => handle_run_command(&model_dir, &opts, None),
        Some(Commands::Example { subcommand }) => subcommand.execute(),
        Some(Commands::Validate { model_dir }) => handle_validate_command(&model_dir, None),
        Some(Commands::Settings { subcommand }) => subcommand.execute(),
        None => {
            println!("{}", Cli::command().render_long_help());
            Ok(())
        }
    }
}

/// Use the given settings or, if there are none, load them from the settings file
fn settings_or_load(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Load the model in `model_path` along with its capacities, checking it can be used to
/// calculate costs
fn load_model_and_capacities(model_path: &Path) -> Result<(Model, Array2<Capacity>)> {
    let model = load_model(model_path)?;
    let capacities = read_capacities(model_path, model.distances.zone_ids())?;

    Ok((model, capacities))
}

/// Calculate costs for `model_path` and write them to `output_path`, which must already exist.
///
/// Returns the matrix of costs that was written.
fn calculate_and_write_costs(model_path: &Path, output_path: &Path) -> Result<Array2<Money>> {
    let (model, capacities) =
        load_model_and_capacities(model_path).context("Failed to load model.")?;
    info!("Loaded model from {}", model_path.display());

    let costs = model
        .transmission_cost_model()
        .and_then(|cost_model| cost_model.cost_matrix(&capacities))
        .context("Failed to calculate transmission costs.")?;

    let mut writer = DataWriter::create(output_path)?;
    writer.write_costs(&model.distances, &capacities, &costs)?;
    writer.flush()?;
    write_metadata(output_path, model_path)?;

    Ok(costs)
}

/// Handle the `run` command.
///
/// Log files and results are written to the output folder, which is created if needed.
pub fn handle_run_command(
    model_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = settings_or_load(settings)?;
    let output_path = match &opts.output_dir {
        Some(output_dir) => output_dir.clone(),
        None => get_output_dir(model_path)?,
    };

    let deleted_existing =
        create_output_directory(&output_path, opts.overwrite || settings.overwrite)
            .with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    output_path.display()
                )
            })?;

    log::init(&settings.log_level, Some(&output_path))
        .context("Failed to initialise logging.")?;
    if deleted_existing {
        warn!(
            "Deleted existing contents of output folder {}",
            output_path.display()
        );
    }

    let costs = calculate_and_write_costs(model_path, &output_path)?;
    info!(
        "Wrote transmission costs for {} routes to {}",
        costs.len(),
        output_path.display()
    );

    Ok(())
}

/// Handle the `validate` command.
///
/// No log files are written.
pub fn handle_validate_command(model_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = settings_or_load(settings)?;
    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    let (model, _) = load_model_and_capacities(model_path).context("Failed to validate model.")?;
    model
        .transmission_cost_model()
        .context("Failed to validate model.")?;
    info!(
        "Model with {} zones is valid",
        model.distances.num_zones()
    );

    Ok(())
}
