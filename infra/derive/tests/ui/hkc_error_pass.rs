use hkc_derive::hkc_error;
use std::borrow::Cow;

#[hkc_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[cfg(unix)]
    #[error("UTF-8 error{}: {source}", format_context(.context))]
    Utf8 { source: std::string::FromUtf8Error, context: Option<Cow<'static, str>> },

    #[error("Too old{}: {found}", format_context(.context))]
    TooOld { found: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {}
