//! mcal - display calibration CLI
//!
//! Consumes sample CSVs produced by a capture loop and turns them into
//! quality reports, ICC display profiles, and Argyll measurement sets.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mcal")]
#[command(author, version, about = "Display calibration toolkit")]
#[command(long_about = "
Turns captured calibration samples into correction matrices, quality
reports, and ICC display profiles.

Examples:
  mcal analyze session.csv                      # Quality report
  mcal analyze session.csv --wp D65 --json      # Machine-readable report
  mcal profile session.csv -o display.icc       # Build an ICC profile
  mcal profile session.csv -o display.icc --desc \"Office Display\"
  mcal export session.csv -o session.ti3        # Argyll measurement set
  mcal info display.icc                         # Inspect a profile
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a session and print the quality report
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Build an ICC display profile from a session
    #[command(visible_alias = "p")]
    Profile(ProfileArgs),

    /// Export a session as an Argyll .ti3 measurement set
    #[command(visible_alias = "e")]
    Export(ExportArgs),

    /// Display ICC profile information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Sample CSV file (target_r..captured_b per line)
    input: PathBuf,

    /// White point target (D50 or D65)
    #[arg(long, default_value = "D50")]
    wp: String,

    /// Gamma target
    #[arg(long, default_value = "2.2")]
    gamma: f64,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ProfileArgs {
    /// Sample CSV file
    input: PathBuf,

    /// Output .icc path
    #[arg(short, long)]
    output: PathBuf,

    /// Profile description text
    #[arg(long, default_value = "mcal Calibrated Display")]
    desc: String,

    /// Copyright string
    #[arg(long)]
    copyright: Option<String>,

    /// White point target (D50 or D65)
    #[arg(long, default_value = "D50")]
    wp: String,

    /// Override the tone-curve gamma instead of fitting it
    #[arg(long)]
    gamma: Option<f64>,
}

#[derive(Args)]
struct ExportArgs {
    /// Sample CSV file
    input: PathBuf,

    /// Output .ti3 path
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct InfoArgs {
    /// Profile file to inspect
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, cli.verbose),
        Commands::Profile(args) => commands::profile::run(args, cli.verbose),
        Commands::Export(args) => commands::export::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}
