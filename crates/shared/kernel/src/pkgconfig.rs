//! System package queries through `pkg-config`.

use crate::error::KernelError;
use crate::process::CommandRunner;
use crate::version::Version;
use hkc_domain::{EnvVar, ParsedFlags};
use tracing::debug;

pub const PKG_CONFIG: &str = "pkg-config";

/// Compiler options whose argument is the following token.
const PAIRED_CC_OPTIONS: &[&str] = &["-isystem", "-include", "-idirafter", "-imacros", "-iquote"];

/// Options the compiler and the linker both need, besides every `+...` option.
const SHARED_OPTIONS: &[&str] = &["-pthread", "-fopenmp"];

/// Queries `pkg-config` through a [`CommandRunner`].
#[derive(Debug)]
pub struct PkgConfig<'r, R: ?Sized> {
    runner: &'r R,
}

impl<'r, R: CommandRunner + ?Sized> PkgConfig<'r, R> {
    pub const fn new(runner: &'r R) -> Self {
        Self { runner }
    }

    /// Runs `pkg-config <packages> --cflags --libs` and classifies the output.
    ///
    /// # Errors
    /// Propagates the runner error when a package is unknown or `pkg-config` is missing.
    pub fn flags(&self, packages: &[&str]) -> Result<ParsedFlags, KernelError> {
        let mut args = packages.to_vec();
        args.extend(["--cflags", "--libs"]);

        let output = self.runner.run(PKG_CONFIG, &args)?;
        let flags = parse_flags(&output);
        debug!(?packages, ?flags, "Resolved system package flags");
        Ok(flags)
    }

    /// Runs `pkg-config <package> --modversion`.
    ///
    /// # Errors
    /// Propagates the runner error, or [`KernelError::MalformedVersion`] for unparsable output.
    pub fn modversion(&self, package: &str) -> Result<Version, KernelError> {
        let raw = self.runner.run(PKG_CONFIG, &[package, "--modversion"])?;
        let version = Version::parse(&raw)?;
        debug!(package, %version, "Resolved system package version");
        Ok(version)
    }
}

/// Splits compiler/linker options into the environment lists they belong to.
#[must_use]
pub fn parse_flags(output: &str) -> ParsedFlags {
    let mut flags = ParsedFlags::default();
    let mut tokens = output.split_whitespace();

    while let Some(arg) = tokens.next() {
        let mut attached = |prefix: &str, var: EnvVar, tokens: &mut std::str::SplitWhitespace<'_>| {
            let rest = arg.strip_prefix(prefix)?;
            let value = if rest.is_empty() { tokens.next()? } else { rest };
            flags.push(var, value);
            Some(())
        };

        let handled = attached("-I", EnvVar::CppPath, &mut tokens)
            .or_else(|| attached("-L", EnvVar::LibPath, &mut tokens))
            .or_else(|| attached("-l", EnvVar::Libs, &mut tokens))
            .or_else(|| attached("-D", EnvVar::CppDefines, &mut tokens));
        if handled.is_some() {
            continue;
        }

        if arg.starts_with("-Wl,") || arg == "-rdynamic" {
            flags.push(EnvVar::LinkFlags, arg);
        } else if SHARED_OPTIONS.contains(&arg) || arg.starts_with('+') {
            flags.push(EnvVar::CcFlags, arg);
            flags.push(EnvVar::LinkFlags, arg);
        } else if PAIRED_CC_OPTIONS.contains(&arg) {
            match tokens.next() {
                Some(value) => flags.push(EnvVar::CcFlags, format!("{arg} {value}")),
                None => flags.push(EnvVar::CcFlags, arg),
            }
        } else if arg.starts_with('-') {
            flags.push(EnvVar::CcFlags, arg);
        } else {
            // Bare archives or shared objects, e.g. `/usr/lib/libfoo.a`.
            flags.push(EnvVar::Libs, arg);
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::FakeRunner;

    #[test]
    fn classifies_common_pkg_config_output() {
        let flags = parse_flags(
            "-I/system/develop/headers/freetype2 -DFT_STATIC=1 -pthread \
             -L/system/lib -lfreetype -Wl,--as-needed -fPIC",
        );

        assert_eq!(flags.cpp_path, ["/system/develop/headers/freetype2"]);
        assert_eq!(flags.cpp_defines, ["FT_STATIC=1"]);
        assert_eq!(flags.lib_path, ["/system/lib"]);
        assert_eq!(flags.libs, ["freetype"]);
        assert_eq!(flags.cc_flags, ["-pthread", "-fPIC"]);
        assert_eq!(flags.link_flags, ["-pthread", "-Wl,--as-needed"]);
    }

    #[test]
    fn detached_arguments_are_joined() {
        let flags = parse_flags("-I /opt/include -isystem /opt/sys -l ogg /usr/lib/libvpx.a");

        assert_eq!(flags.cpp_path, ["/opt/include"]);
        assert_eq!(flags.cc_flags, ["-isystem /opt/sys"]);
        assert_eq!(flags.libs, ["ogg", "/usr/lib/libvpx.a"]);
    }

    #[test]
    fn plus_options_go_to_compiler_and_linker() {
        let flags = parse_flags("+DA1.0 -O2");

        assert_eq!(flags.cc_flags, ["+DA1.0", "-O2"]);
        assert_eq!(flags.link_flags, ["+DA1.0"]);
    }

    #[test]
    fn empty_output_yields_no_flags() {
        assert!(parse_flags("  \n").is_empty());
    }

    #[test]
    fn flags_query_appends_cflags_and_libs() {
        let runner = FakeRunner::new()
            .respond("pkg-config theora theoradec --cflags --libs", "-ltheora -ltheoradec");
        let flags = PkgConfig::new(&runner).flags(&["theora", "theoradec"]).unwrap();

        assert_eq!(flags.libs, ["theora", "theoradec"]);
        assert_eq!(runner.calls(), ["pkg-config theora theoradec --cflags --libs"]);
    }

    #[test]
    fn modversion_parses_reported_version() {
        let runner = FakeRunner::new().respond("pkg-config bullet --modversion", "2.89\n");
        let version = PkgConfig::new(&runner).modversion("bullet").unwrap();

        assert_eq!(version, Version::parse("2.89").unwrap());
    }

    #[test]
    fn modversion_rejects_garbage() {
        let runner = FakeRunner::new().respond("pkg-config bullet --modversion", "unknown");
        let err = PkgConfig::new(&runner).modversion("bullet").unwrap_err();

        assert!(matches!(err, KernelError::MalformedVersion { .. }));
    }
}
