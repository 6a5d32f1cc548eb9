//! # Domain Models
//!
//! Pure build-configuration types with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O or process spawning, just data and simple helpers.

pub mod env;
pub mod options;
pub mod settings;

pub use crate::env::{BuildEnv, EnvVar, ParsedFlags};
pub use crate::options::{OptionKind, OptionSpec};
pub use crate::settings::{
    Bits, BundledLibs, DebugSymbols, Library, Optimize, SanitizerSet, Settings, TargetMode,
};
