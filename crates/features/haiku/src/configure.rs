use hkc_domain::{Bits, BuildEnv, DebugSymbols, EnvVar, Optimize, SanitizerSet, Settings, TargetMode};
use hkc_kernel::Host;

pub const CC: &str = "gcc-x86";
pub const CXX: &str = "g++-x86";

pub const PLATFORM_INCLUDE: &str = "#platform/haiku";

pub const PLATFORM_DEFINES: &[&str] = &[
    "HAIKU_ENABLED",
    "UNIX_ENABLED",
    "OPENGL_ENABLED",
    "GLES_ENABLED",
    "MEDIA_KIT_ENABLED",
    "MIDI2_KIT_ENABLED",
];

pub const PLATFORM_LIBS: &[&str] = &["be", "game", "media", "midi2", "network", "bnetapi", "z", "GL"];

/// Artifact name marker for sanitized builds.
pub const SANITIZER_SUFFIX: &str = "s";

const STATIC_CPP_FLAGS: &[&str] = &["-static-libgcc", "-static-libstdc++"];

pub(crate) fn apply_build_type(settings: &Settings, env: &mut BuildEnv) {
    match settings.target {
        TargetMode::Release => {
            env.prepend(EnvVar::CcFlags, [optimization_flag(settings.optimize, "-O3")]);
            prepend_debug_symbols(settings.debug_symbols, env);
        }
        TargetMode::ReleaseDebug => {
            env.prepend(EnvVar::CcFlags, [optimization_flag(settings.optimize, "-O2")]);
            env.prepend(EnvVar::CppDefines, ["DEBUG_ENABLED"]);
            prepend_debug_symbols(settings.debug_symbols, env);
        }
        TargetMode::Debug => {
            env.prepend(EnvVar::CcFlags, ["-g3"]);
            env.prepend(EnvVar::CppDefines, ["DEBUG_ENABLED", "DEBUG_MEMORY_ENABLED"]);
        }
    }
}

const fn optimization_flag(optimize: Optimize, speed: &'static str) -> &'static str {
    match optimize {
        Optimize::Speed => speed,
        Optimize::Size => "-Os",
    }
}

fn prepend_debug_symbols(level: DebugSymbols, env: &mut BuildEnv) {
    match level {
        DebugSymbols::Yes => env.prepend(EnvVar::CcFlags, ["-g1"]),
        DebugSymbols::Full => env.prepend(EnvVar::CcFlags, ["-g2"]),
        DebugSymbols::No => {}
    }
}

pub(crate) const fn resolve_bits(settings: &mut Settings, host: &Host) {
    if matches!(settings.bits, Bits::Default) {
        settings.bits = if host.is_64bit() { Bits::B64 } else { Bits::B32 };
    }
}

pub(crate) fn apply_sanitizers(sanitizers: SanitizerSet, env: &mut BuildEnv) {
    if sanitizers.is_empty() {
        return;
    }
    env.extra_suffix.push_str(SANITIZER_SUFFIX);

    for flag in sanitizers.iter().filter_map(SanitizerSet::flag) {
        env.append(EnvVar::CcFlags, [flag]);
        env.append(EnvVar::LinkFlags, [flag]);
    }
}

pub(crate) fn apply_lto(env: &mut BuildEnv) {
    env.append(EnvVar::CcFlags, ["-flto"]);
    let link = if env.jobs > 1 { format!("-flto={}", env.jobs) } else { "-flto".to_owned() };
    env.append(EnvVar::LinkFlags, [link]);
}

pub(crate) fn apply_toolchain(settings: &Settings, env: &mut BuildEnv) {
    env.append(EnvVar::CcFlags, ["-pipe"]);
    env.append(EnvVar::LinkFlags, ["-pipe"]);

    if settings.use_static_cpp {
        env.append(EnvVar::LinkFlags, STATIC_CPP_FLAGS.iter().copied());
    }

    CC.clone_into(&mut env.cc);
    CXX.clone_into(&mut env.cxx);
}

pub(crate) fn apply_platform_flags(env: &mut BuildEnv) {
    env.prepend(EnvVar::CppPath, [PLATFORM_INCLUDE]);
    env.append(EnvVar::CppDefines, PLATFORM_DEFINES.iter().copied());
    env.append(EnvVar::Libs, PLATFORM_LIBS.iter().copied());
}
