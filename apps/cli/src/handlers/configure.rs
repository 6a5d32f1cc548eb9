use crate::models::args::ConfigureArgs;
use anyhow::{Context, Result};
use hkc_domain::BuildEnv;
use hkc_haiku::{Haiku, HaikuError};
use hkc_kernel::Platform;
use hkc_kernel::config::load_settings;
use serde_json::json;
use std::num::NonZeroUsize;
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;

/// Loads settings, runs the Haiku configuration pass and prints the result as JSON.
///
/// A system library older than required is reported on stderr and turned into that
/// error's exit status instead of the generic failure.
///
/// # Errors
/// Returns an error if settings cannot be loaded, a system package query fails, or the
/// result cannot be serialized.
pub fn configure(args: ConfigureArgs) -> Result<ExitCode> {
    let mut settings = match &args.settings {
        Some(path) => load_settings(Some(path)),
        None => load_settings(None::<&Path>),
    }
    .context("Loading settings")?;

    if let Some(target) = args.target {
        settings.target = target;
    }

    let jobs = args
        .jobs
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, NonZeroUsize::get));
    let mut env = BuildEnv::with_jobs(jobs);

    let haiku = Haiku::new();
    if !haiku.can_build() {
        warn!(os = %haiku.host().os, "Host cannot build for Haiku, configuring anyway");
    }

    if let Err(err) = haiku.configure(&mut settings, &mut env) {
        let Some(code) = fatal_exit(&err) else {
            return Err(anyhow::Error::new(err).context("Configuring Haiku build"));
        };
        eprintln!("{err}");
        return Ok(code);
    }

    let report = json!({
        "platform": haiku.name(),
        "settings": settings,
        "env": env,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(ExitCode::SUCCESS)
}

fn fatal_exit(err: &HaikuError) -> Option<ExitCode> {
    let code = err.exit_code()?;
    Some(ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX)))
}
