use hkc_domain::Library;
use hkc_kernel::KernelError;
use std::borrow::Cow;

/// Process exit status used when a system library is older than required.
pub const EXIT_DEPENDENCY_TOO_OLD: i32 = 255;

/// Errors raised while configuring a Haiku build.
#[hkc_derive::hkc_error]
pub enum HaikuError {
    /// A system package query failed (missing package, missing `pkg-config`, bad output).
    #[error("System package query failed{}: {source}", format_context(.context))]
    Kernel { source: KernelError, context: Option<Cow<'static, str>> },

    /// A system library was requested but the installed version is too old.
    #[error(
        "{library}: System version {found} does not match minimal requirements ({required}){}. Aborting.",
        format_context(.context)
    )]
    DependencyTooOld {
        library: Library,
        found: String,
        required: &'static str,
        context: Option<Cow<'static, str>>,
    },
}

impl HaikuError {
    /// The process exit status this error demands, if it is fatal for the whole build.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::DependencyTooOld { .. } => Some(EXIT_DEPENDENCY_TOO_OLD),
            Self::Kernel { .. } => None,
        }
    }
}
