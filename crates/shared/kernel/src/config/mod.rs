use crate::error::{KernelError, KernelErrorExt};
use config::{Config, Environment, File};
use hkc_domain::Settings;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment variables overriding file settings (`HKC__TARGET=release`).
pub const ENV_PREFIX: &str = "HKC";

/// Base name of the settings file looked up when no path is given (`hkconf.toml`, ...).
pub const DEFAULT_SETTINGS_FILE: &str = "hkconf";

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from `path`. Without a path it looks for an optional
///    `hkconf.*` file in the current working directory.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `HKC__`.
///    Nested structures are accessed using double underscores (e.g., `HKC__BUILTIN__FREETYPE`
///    maps to `builtin.freetype`).
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given configuration file cannot be found.
/// * The content of the file or environment does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use hkc_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct BuildConfig {
///     jobs: usize,
/// }
///
/// let cfg: BuildConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, KernelError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    info!(path = %effective_path.display(), required, "Loading settings");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Loads the build [`Settings`] record.
///
/// # Errors
/// See [`load_config`].
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<Settings, KernelError> {
    load_config(path)
}
