#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;

use crate::handlers::{configure, detect, options};
use crate::models::args::{Cli, Commands};

use anyhow::Result;
use clap::Parser;
use hkc_logger::Logger;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut logger = Logger::builder(env!("CARGO_BIN_NAME")).verbosity(cli.verbose);
    if let Some(dir) = cli.log_dir {
        logger = logger.log_dir(dir);
    }
    let _log = logger.init()?;

    match cli.command {
        Commands::Detect {} => detect::detect()?,
        Commands::Options { bundled, json } => options::list_options(bundled, json)?,
        Commands::Configure(args) => return configure::configure(args),
    }

    Ok(ExitCode::SUCCESS)
}
