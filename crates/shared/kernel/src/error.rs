use std::borrow::Cow;

/// Errors raised by the shared configuration plumbing.
#[hkc_derive::hkc_error]
pub enum KernelError {
    /// Settings could not be loaded or deserialized.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// The external command could not be started (missing binary, permissions).
    #[error("Failed to spawn command{}: {source}", format_context(.context))]
    Spawn { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The external command ran but exited unsuccessfully.
    #[error("Command `{command}` failed with {status}{}: {stderr}", format_context(.context))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
        context: Option<Cow<'static, str>>,
    },

    /// The external command printed something that is not UTF-8.
    #[error("Command output is not valid UTF-8{}: {source}", format_context(.context))]
    Utf8 { source: std::string::FromUtf8Error, context: Option<Cow<'static, str>> },

    /// A version string could not be parsed.
    #[error("Malformed version{}: '{value}'", format_context(.context))]
    MalformedVersion { value: String, context: Option<Cow<'static, str>> },

    #[error("Internal kernel error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
