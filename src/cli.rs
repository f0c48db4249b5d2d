use crate::formatting::ColorMode;
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "esgmap")]
#[command(about = "Carbon and employee intensity report with sector-aware severity bands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute intensities, classify them and render a report
    Report {
        /// Input feed (.json, .yaml or .yml)
        input: PathBuf,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to .esgmap.toml discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Replace the configured high-sensitivity sectors (repeatable)
        #[arg(long = "high-sensitivity-sector", value_name = "SECTOR")]
        high_sensitivity_sectors: Vec<String>,

        /// Compute per-entity metrics in parallel
        #[arg(long)]
        parallel: bool,

        /// When to color terminal output
        #[arg(long, value_enum)]
        color: Option<ColorMode>,

        /// Plain output: no colors
        #[arg(long)]
        plain: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Write a sample input feed
    Sample {
        /// Output file
        #[arg(short, long, default_value = "input_esg_data.json")]
        output: PathBuf,

        /// Force overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
