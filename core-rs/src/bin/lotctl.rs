//! lotctl - Lot registry CLI
//!
//! Builds a lot from lot.yaml and drives it with operation scripts

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use lot_core::script::{self, Command, Outcome};
use lot_core::{LotConfig, StatusReport, Vehicle, LOT_FILE};

#[derive(Parser)]
#[command(name = "lotctl")]
#[command(version)]
#[command(about = "Typed parking slot registry", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demo against the sample lot
    Demo,
    /// Show occupancy of a freshly built lot
    Status {
        /// Lot definition file
        #[arg(long, short, default_value = LOT_FILE)]
        config: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Execute an operation script against a lot
    Run {
        /// Script file (park/release/find/status, one per line)
        script: PathBuf,
        /// Lot definition file
        #[arg(long, short, default_value = LOT_FILE)]
        config: PathBuf,
        /// Output format for status reports
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Exit non-zero if any command is rejected
        #[arg(long)]
        strict: bool,
    },
    /// Write a sample lot.yaml into a directory
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing lot.yaml
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Yaml,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "lot_core=debug,lotctl=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn render_status(report: &StatusReport, format: Format) -> Result<String> {
    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(report)?,
        Format::Yaml => serde_yaml::to_string(report)?,
        Format::Table => report.table_with(|occupancy, cell| {
            if occupancy.available == 0 {
                cell.red().to_string()
            } else {
                cell.green().to_string()
            }
        }),
    };
    Ok(rendered)
}

fn print_outcome(outcome: &Outcome, format: Format) -> Result<()> {
    match outcome {
        Outcome::Status(report) => print!("{}", render_status(report, format)?),
        Outcome::Rejected { .. } => println!("{} {}", "✗".red(), outcome),
        _ => println!("{} {}", "✓".green(), outcome),
    }
    Ok(())
}

fn handle_demo() -> Result<()> {
    let mut lot = LotConfig::sample().build()?;

    let commands = vec![
        Command::Park(Vehicle::new("MH12AB1234", "car")),
        Command::Park(Vehicle::new("MH12XY4321", "bike")),
        Command::Park(Vehicle::new("MH14TR1111", "truck")),
        Command::Find("MH12XY4321".to_string()),
        Command::Status,
        Command::Release("C1".into()),
        Command::Status,
    ];

    for outcome in script::run(&mut lot, &commands) {
        print_outcome(&outcome, Format::Table)?;
    }
    Ok(())
}

fn handle_status(config: &Path, format: Format) -> Result<()> {
    let lot_config = LotConfig::load(config)
        .with_context(|| format!("loading {}", config.display()))?;
    let lot = lot_config.build()?;

    println!(
        "Lot: {} ({} slots)",
        lot_config.metadata.name.bold(),
        lot.len()
    );
    print!("{}", render_status(&lot.status(), format)?);
    Ok(())
}

fn handle_run(script_path: &Path, config: &Path, format: Format, strict: bool) -> Result<()> {
    let mut lot = LotConfig::load(config)
        .with_context(|| format!("loading {}", config.display()))?
        .build()?;
    let commands = script::parse_script_file(script_path)
        .with_context(|| format!("reading {}", script_path.display()))?;

    let outcomes = script::run(&mut lot, &commands);
    for outcome in &outcomes {
        print_outcome(outcome, format)?;
    }

    let rejected = outcomes.iter().filter(|o| o.is_rejected()).count();
    if strict && rejected > 0 {
        bail!("{} of {} commands rejected", rejected, outcomes.len());
    }
    Ok(())
}

fn handle_init(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(LOT_FILE);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::create_dir_all(dir)?;
    LotConfig::sample().save(&path)?;

    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Demo => handle_demo(),
        Commands::Status { config, format } => handle_status(&config, format),
        Commands::Run {
            script,
            config,
            format,
            strict,
        } => handle_run(&script, &config, format, strict),
        Commands::Init { dir, force } => handle_init(&dir, force),
    }
}
