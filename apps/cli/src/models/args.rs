//! # CLI Argument Definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use hkc_domain::TargetMode;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hkconf")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Detect and configure Haiku builds")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write rolling log files into this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report whether this host can build for Haiku
    Detect {},
    /// List the options the Haiku platform declares
    Options {
        /// List the `builtin_*` library toggles instead
        #[arg(long)]
        bundled: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run one configuration pass and print the resulting settings and environment
    Configure(ConfigureArgs),
}

#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// Settings file (TOML, JSON, YAML...). Defaults to an optional `hkconf.*` in the working dir
    #[arg(short, long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Parallel job count used for LTO linking (defaults to available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Overrides the target mode from the settings
    #[arg(short, long, value_name = "MODE")]
    pub target: Option<TargetMode>,
}
