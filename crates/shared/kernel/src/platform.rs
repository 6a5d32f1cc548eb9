//! The contract between a target platform and the build orchestrator.

use hkc_domain::{BuildEnv, OptionSpec, Settings};
use std::borrow::Cow;

/// A build target platform.
///
/// The orchestrator asks every platform whether it [`is_active`](Platform::is_active)
/// and [`can_build`](Platform::can_build) on this host, merges [`options`](Platform::options)
/// into its own option set, applies [`flags`](Platform::flags) as defaults, and finally calls
/// [`configure`](Platform::configure) once with the settings record and the environment it owns.
pub trait Platform {
    type Error: std::error::Error + Send + Sync + 'static;

    fn is_active(&self) -> bool {
        true
    }

    /// Display name.
    fn name(&self) -> &'static str;

    /// Whether the current host can build for this platform.
    fn can_build(&self) -> bool;

    /// Platform-specific options, on top of the orchestrator's common ones.
    fn options(&self) -> Vec<OptionSpec>;

    /// Default overrides for common settings.
    fn flags(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Mutates `env` (and coupled `settings`) for this platform.
    ///
    /// # Errors
    /// Implementation-specific; see the platform's error type.
    fn configure(&self, settings: &mut Settings, env: &mut BuildEnv) -> Result<(), Self::Error>;
}

/// Facts about the machine running the configuration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Operating system name, e.g. `haiku`, `linux`.
    pub os: Cow<'static, str>,
    /// Machine architecture, e.g. `x86_64`, `x86`.
    pub machine: Cow<'static, str>,
    pub pointer_width: u32,
}

impl Host {
    #[must_use]
    pub fn current() -> Self {
        Self {
            os: Cow::Borrowed(std::env::consts::OS),
            machine: Cow::Borrowed(std::env::consts::ARCH),
            pointer_width: usize::BITS,
        }
    }

    pub fn new(
        os: impl Into<Cow<'static, str>>,
        machine: impl Into<Cow<'static, str>>,
        pointer_width: u32,
    ) -> Self {
        Self { os: os.into(), machine: machine.into(), pointer_width }
    }

    #[must_use]
    pub const fn is_64bit(&self) -> bool {
        self.pointer_width > 32
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::current()
    }
}
