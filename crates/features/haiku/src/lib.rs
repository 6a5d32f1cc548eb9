//! # Haiku Platform
//!
//! Platform detection and compiler-flag configuration for Haiku builds.
//!
//! [`Haiku`] implements [`Platform`]: it tells the orchestrator whether this host can build
//! for Haiku, declares the Haiku-specific options, and mutates the [`BuildEnv`] for one
//! configuration pass:
//!
//! 1. Target mode: optimization, debug symbols and debug defines.
//! 2. Sanitizers, LTO, `-pipe`, the static C++ runtime and the `gcc-x86` toolchain.
//! 3. Third-party libraries: bundled ones need nothing, system ones are resolved
//!    through `pkg-config` (see [`deps`]). A system bullet older than
//!    [`deps::MIN_BULLET_VERSION`] aborts with [`HaikuError::DependencyTooOld`].
//! 4. The fixed Haiku include path, defines and system libraries.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hkc_domain::{BuildEnv, Settings};
//! use hkc_haiku::Haiku;
//! use hkc_kernel::Platform;
//!
//! let haiku = Haiku::new();
//! let mut settings = Settings::default();
//! let mut env = BuildEnv::with_jobs(8);
//!
//! if haiku.can_build() {
//!     haiku.configure(&mut settings, &mut env).unwrap();
//! }
//! ```

mod configure;
pub mod deps;
mod error;
pub mod options;

pub use crate::configure::{
    CC, CXX, PLATFORM_DEFINES, PLATFORM_INCLUDE, PLATFORM_LIBS, SANITIZER_SUFFIX,
};
pub use crate::error::{EXIT_DEPENDENCY_TOO_OLD, HaikuError, HaikuErrorExt};

use crate::deps::Resolver;
use hkc_domain::{BuildEnv, OptionSpec, Settings};
use hkc_kernel::process::{CommandRunner, SystemRunner};
use hkc_kernel::{Host, Platform};
use tracing::{info, instrument};

pub const NAME: &str = "Haiku";

/// The Haiku build platform.
#[derive(Debug)]
pub struct Haiku<R = SystemRunner> {
    runner: R,
    host: Host,
}

impl Haiku {
    /// Haiku platform querying the real `pkg-config` on the current host.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl Default for Haiku {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> Haiku<R> {
    /// Uses `runner` for every external command.
    pub fn with_runner(runner: R) -> Self {
        Self { runner, host: Host::current() }
    }

    /// Overrides the detected host.
    #[must_use]
    pub fn with_host(mut self, host: Host) -> Self {
        self.host = host;
        self
    }

    pub const fn host(&self) -> &Host {
        &self.host
    }

    pub const fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: CommandRunner> Platform for Haiku<R> {
    type Error = HaikuError;

    fn name(&self) -> &'static str {
        NAME
    }

    fn can_build(&self) -> bool {
        self.host.os.starts_with("haiku")
    }

    fn options(&self) -> Vec<OptionSpec> {
        options::platform_options()
    }

    #[instrument(skip_all, fields(target = %settings.target, jobs = env.jobs))]
    fn configure(&self, settings: &mut Settings, env: &mut BuildEnv) -> Result<(), HaikuError> {
        configure::apply_build_type(settings, env);
        configure::resolve_bits(settings, &self.host);
        configure::apply_sanitizers(settings.sanitizers(), env);
        if settings.use_lto {
            configure::apply_lto(env);
        }
        configure::apply_toolchain(settings, env);

        Resolver::new(&self.runner, &self.host).resolve(settings, env)?;

        configure::apply_platform_flags(env);

        info!(
            bits = %settings.bits,
            suffix = %env.extra_suffix,
            cc_flags = env.cc_flags.len(),
            link_flags = env.link_flags.len(),
            libs = env.libs.len(),
            "Configured Haiku build"
        );
        Ok(())
    }
}
