//! Bundled-vs-system third-party library resolution.

use crate::error::{HaikuError, HaikuErrorExt};
use hkc_domain::{BuildEnv, EnvVar, Library, Settings};
use hkc_kernel::Host;
use hkc_kernel::pkgconfig::PkgConfig;
use hkc_kernel::process::CommandRunner;
use hkc_kernel::version::Version;
use tracing::{debug, error};

/// Oldest system bullet accepted.
pub const MIN_BULLET_VERSION: &str = "2.89";

/// freetype links libpng and zlib internally, so the three are bundled or system together.
pub const FREETYPE_GROUP: [Library; 3] = [Library::Freetype, Library::Libpng, Library::Zlib];

/// Machines the bundled libtheora has GCC x86 assembly for.
const X86_MACHINES: &[&str] = &["x86_64", "x86", "i386", "i586"];

/// No pkg-config file is shipped for these; link by name.
const MBEDTLS_LIBS: &[&str] = &["mbedtls", "mbedcrypto", "mbedx509"];

const MINIUPNPC_INCLUDES: &[&str] =
    &["/system/develop/headers/miniupnpc", "/system/develop/headers/x86/miniupnpc"];

/// `pkg-config` packages providing a system library.
///
/// Empty for libraries without a pkg-config file (zlib is part of the base system libs).
#[must_use]
pub const fn system_packages(lib: Library) -> &'static [&'static str] {
    match lib {
        Library::Libwebp => &["libwebp"],
        Library::Freetype => &["freetype2"],
        Library::Libpng => &["libpng16"],
        Library::Bullet => &["bullet"],
        Library::Enet => &["libenet"],
        Library::Squish => &["libsquish"],
        Library::Zstd => &["libzstd"],
        Library::Libtheora => &["theora", "theoradec"],
        Library::Libvpx => &["vpx"],
        Library::Libvorbis => &["vorbis", "vorbisfile"],
        Library::Opus => &["opus", "opusfile"],
        Library::Libogg => &["ogg"],
        Library::Wslay => &["libwslay"],
        Library::Pcre2 => &["libpcre2-32"],
        Library::Zlib | Library::Mbedtls | Library::Miniupnpc => &[],
    }
}

pub(crate) struct Resolver<'a, R: ?Sized> {
    pkg: PkgConfig<'a, R>,
    host: &'a Host,
}

impl<'a, R: CommandRunner + ?Sized> Resolver<'a, R> {
    pub(crate) const fn new(runner: &'a R, host: &'a Host) -> Self {
        Self { pkg: PkgConfig::new(runner), host }
    }

    /// Resolves every library in dependency order.
    ///
    /// Stops at the first failure; nothing after the failing library touches `env`.
    pub(crate) fn resolve(
        &self,
        settings: &mut Settings,
        env: &mut BuildEnv,
    ) -> Result<(), HaikuError> {
        self.link_if_system(settings, env, Library::Libwebp)?;

        couple_freetype(settings);
        self.link_if_system(settings, env, Library::Freetype)?;
        self.link_if_system(settings, env, Library::Libpng)?;

        if !settings.is_bundled(Library::Bullet) {
            self.check_bullet_version()?;
            self.link(env, Library::Bullet)?;
        }

        self.link_if_system(settings, env, Library::Enet)?;
        self.link_if_system(settings, env, Library::Squish)?;
        self.link_if_system(settings, env, Library::Zstd)?;

        // Order matters: system theora/vorbis/opus pull the system ogg in.
        if !settings.is_bundled(Library::Libtheora) {
            force_system(settings, Library::Libogg, Library::Libtheora);
            force_system(settings, Library::Libvorbis, Library::Libtheora);
            self.link(env, Library::Libtheora)?;
        }
        self.link_if_system(settings, env, Library::Libvpx)?;
        if !settings.is_bundled(Library::Libvorbis) {
            force_system(settings, Library::Libogg, Library::Libvorbis);
            self.link(env, Library::Libvorbis)?;
        }
        if !settings.is_bundled(Library::Opus) {
            force_system(settings, Library::Libogg, Library::Opus);
            self.link(env, Library::Opus)?;
        }
        self.link_if_system(settings, env, Library::Libogg)?;

        if settings.is_bundled(Library::Libtheora) && is_x86(&self.host.machine) {
            settings.x86_libtheora_opt_gcc = true;
        }

        self.link_if_system(settings, env, Library::Wslay)?;

        if !settings.is_bundled(Library::Mbedtls) {
            env.append(EnvVar::Libs, MBEDTLS_LIBS.iter().copied());
        }

        if !settings.is_bundled(Library::Miniupnpc) {
            for include in MINIUPNPC_INCLUDES {
                env.prepend(EnvVar::CppPath, [*include]);
            }
            env.append(EnvVar::Libs, ["miniupnpc"]);
        }

        self.link_if_system(settings, env, Library::Pcre2)
    }

    fn link_if_system(
        &self,
        settings: &Settings,
        env: &mut BuildEnv,
        lib: Library,
    ) -> Result<(), HaikuError> {
        if settings.is_bundled(lib) { Ok(()) } else { self.link(env, lib) }
    }

    fn link(&self, env: &mut BuildEnv, lib: Library) -> Result<(), HaikuError> {
        let flags =
            self.pkg.flags(system_packages(lib)).context(format!("Linking system {lib}"))?;
        env.merge_flags(flags);
        Ok(())
    }

    fn check_bullet_version(&self) -> Result<(), HaikuError> {
        let found = self.pkg.modversion("bullet").context("Querying system bullet version")?;
        let required = Version::parse(MIN_BULLET_VERSION)?;

        if found < required {
            error!(
                library = %Library::Bullet,
                %found,
                required = MIN_BULLET_VERSION,
                "System version does not match minimal requirements, aborting"
            );
            return Err(HaikuError::DependencyTooOld {
                library: Library::Bullet,
                found: found.to_string(),
                required: MIN_BULLET_VERSION,
                context: None,
            });
        }

        debug!(%found, "System bullet accepted");
        Ok(())
    }
}

/// Bundles the whole freetype group as soon as one member is bundled.
fn couple_freetype(settings: &mut Settings) {
    if !FREETYPE_GROUP.iter().any(|lib| settings.is_bundled(*lib)) {
        return;
    }
    for lib in FREETYPE_GROUP {
        if !settings.is_bundled(lib) {
            debug!(library = %lib, "Forcing bundled mode to match the freetype group");
            settings.set_bundled(lib, true);
        }
    }
}

fn force_system(settings: &mut Settings, lib: Library, required_by: Library) {
    if settings.is_bundled(lib) {
        debug!(library = %lib, %required_by, "Forcing system mode for a system dependency");
        settings.set_bundled(lib, false);
    }
}

fn is_x86(machine: &str) -> bool {
    !machine.is_empty() && X86_MACHINES.iter().any(|known| known.contains(machine))
}
