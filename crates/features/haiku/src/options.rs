use hkc_domain::{Library, OptionSpec};
use strum::IntoEnumIterator;

pub const DEBUG_SYMBOL_LEVELS: &[&str] = &["yes", "no", "full"];

/// Options specific to Haiku builds.
#[must_use]
pub fn platform_options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::boolean("use_lto", "Use link time optimization (LTO)", false),
        OptionSpec::boolean(
            "use_static_cpp",
            "Link libgcc and libstdc++ statically for better portability",
            false,
        ),
        OptionSpec::boolean(
            "use_ubsan",
            "Use GCC compiler undefined behavior sanitizer (UBSAN)",
            false,
        ),
        OptionSpec::boolean("use_asan", "Use GCC compiler address sanitizer (ASAN)", false),
        OptionSpec::boolean("use_lsan", "Use GCC compiler leak sanitizer (LSAN)", false),
        OptionSpec::boolean("use_tsan", "Use GCC compiler thread sanitizer (TSAN)", false),
        OptionSpec::enumerated(
            "debug_symbols",
            "Add debugging symbols to release builds",
            "yes",
            DEBUG_SYMBOL_LEVELS,
        ),
        OptionSpec::boolean(
            "separate_debug_symbols",
            "Create a separate file containing debugging symbols",
            false,
        ),
    ]
}

/// One `builtin_<library>` toggle per third-party library, bundled by default.
#[must_use]
pub fn bundled_options() -> Vec<OptionSpec> {
    Library::iter()
        .map(|lib| {
            OptionSpec::boolean(
                format!("builtin_{lib}"),
                format!("Use the built-in {lib} library"),
                true,
            )
        })
        .collect()
}
