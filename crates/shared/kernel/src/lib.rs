//! Kernel utilities shared across platforms.
//! Keep this crate lightweight: settings loading, external command execution,
//! `pkg-config` queries and version comparison.
//!
//! ## Querying a system package
//! ```rust,no_run
//! use hkc_kernel::pkgconfig::PkgConfig;
//! use hkc_kernel::process::SystemRunner;
//!
//! let runner = SystemRunner;
//! let flags = PkgConfig::new(&runner).flags(&["libzstd"]).unwrap();
//! println!("{:?}", flags.libs);
//! ```
pub mod config;
mod error;
pub mod pkgconfig;
pub mod platform;
pub mod process;
pub mod version;

pub use crate::error::{KernelError, KernelErrorExt};
pub use crate::platform::{Host, Platform};
pub use hkc_domain as domain;
