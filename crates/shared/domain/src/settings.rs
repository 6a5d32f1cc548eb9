use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Build target mode.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
    AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TargetMode {
    Release,
    ReleaseDebug,
    #[default]
    Debug,
}

/// Optimization goal for release targets.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
    AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Optimize {
    #[default]
    Speed,
    Size,
}

/// Debug symbol level for release targets.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
    AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DebugSymbols {
    #[default]
    Yes,
    No,
    Full,
}

/// Target word size. `Default` is resolved from the host during configuration.
///
/// Deserializes from `"default"`, `"32"`, `"64"` or the bare integers `32`/`64`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
    AsRefStr,
)]
#[serde(try_from = "BitsRepr")]
pub enum Bits {
    #[default]
    #[serde(rename = "default")]
    #[strum(serialize = "default")]
    Default,
    #[serde(rename = "32")]
    #[strum(serialize = "32")]
    B32,
    #[serde(rename = "64")]
    #[strum(serialize = "64")]
    B64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BitsRepr {
    Number(i64),
    Text(String),
}

impl TryFrom<BitsRepr> for Bits {
    type Error = String;

    fn try_from(repr: BitsRepr) -> Result<Self, Self::Error> {
        let text = match repr {
            BitsRepr::Number(n) => n.to_string(),
            BitsRepr::Text(text) => text,
        };
        text.parse()
            .map_err(|_| format!("invalid bits `{text}`, expected `default`, `32` or `64`"))
    }
}

/// Third-party libraries that can be compiled from bundled source or linked from the system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
    AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Library {
    Libwebp,
    Freetype,
    Libpng,
    Zlib,
    Bullet,
    Enet,
    Squish,
    Zstd,
    Libtheora,
    Libvpx,
    Libvorbis,
    Opus,
    Libogg,
    Wslay,
    Mbedtls,
    Miniupnpc,
    Pcre2,
}

bitflags! {
    /// Compiler sanitizers enabled for a build.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SanitizerSet: u8 {
        const UNDEFINED = 1 << 0;
        const ADDRESS = 1 << 1;
        const LEAK = 1 << 2;
        const THREAD = 1 << 3;
    }
}

impl SanitizerSet {
    /// The `-fsanitize=` argument for a single sanitizer flag.
    #[must_use]
    pub fn flag(self) -> Option<&'static str> {
        [
            (Self::UNDEFINED, "-fsanitize=undefined"),
            (Self::ADDRESS, "-fsanitize=address"),
            (Self::LEAK, "-fsanitize=leak"),
            (Self::THREAD, "-fsanitize=thread"),
        ]
        .into_iter()
        .find_map(|(kind, flag)| (kind == self).then_some(flag))
    }
}

/// Bundled (`true`) or system-provided (`false`) mode per [`Library`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundledLibs {
    pub libwebp: bool,
    pub freetype: bool,
    pub libpng: bool,
    pub zlib: bool,
    pub bullet: bool,
    pub enet: bool,
    pub squish: bool,
    pub zstd: bool,
    pub libtheora: bool,
    pub libvpx: bool,
    pub libvorbis: bool,
    pub opus: bool,
    pub libogg: bool,
    pub wslay: bool,
    pub mbedtls: bool,
    pub miniupnpc: bool,
    pub pcre2: bool,
}

impl BundledLibs {
    /// Everything linked from the system.
    #[must_use]
    pub fn system() -> Self {
        let mut libs = Self::default();
        for lib in <Library as strum::IntoEnumIterator>::iter() {
            libs.set_bundled(lib, false);
        }
        libs
    }

    #[must_use]
    pub const fn is_bundled(&self, lib: Library) -> bool {
        *self.slot(lib)
    }

    pub fn set_bundled(&mut self, lib: Library, bundled: bool) {
        *self.slot_mut(lib) = bundled;
    }

    const fn slot(&self, lib: Library) -> &bool {
        match lib {
            Library::Libwebp => &self.libwebp,
            Library::Freetype => &self.freetype,
            Library::Libpng => &self.libpng,
            Library::Zlib => &self.zlib,
            Library::Bullet => &self.bullet,
            Library::Enet => &self.enet,
            Library::Squish => &self.squish,
            Library::Zstd => &self.zstd,
            Library::Libtheora => &self.libtheora,
            Library::Libvpx => &self.libvpx,
            Library::Libvorbis => &self.libvorbis,
            Library::Opus => &self.opus,
            Library::Libogg => &self.libogg,
            Library::Wslay => &self.wslay,
            Library::Mbedtls => &self.mbedtls,
            Library::Miniupnpc => &self.miniupnpc,
            Library::Pcre2 => &self.pcre2,
        }
    }

    const fn slot_mut(&mut self, lib: Library) -> &mut bool {
        match lib {
            Library::Libwebp => &mut self.libwebp,
            Library::Freetype => &mut self.freetype,
            Library::Libpng => &mut self.libpng,
            Library::Zlib => &mut self.zlib,
            Library::Bullet => &mut self.bullet,
            Library::Enet => &mut self.enet,
            Library::Squish => &mut self.squish,
            Library::Zstd => &mut self.zstd,
            Library::Libtheora => &mut self.libtheora,
            Library::Libvpx => &mut self.libvpx,
            Library::Libvorbis => &mut self.libvorbis,
            Library::Opus => &mut self.opus,
            Library::Libogg => &mut self.libogg,
            Library::Wslay => &mut self.wslay,
            Library::Mbedtls => &mut self.mbedtls,
            Library::Miniupnpc => &mut self.miniupnpc,
            Library::Pcre2 => &mut self.pcre2,
        }
    }
}

impl Default for BundledLibs {
    fn default() -> Self {
        Self {
            libwebp: true,
            freetype: true,
            libpng: true,
            zlib: true,
            bullet: true,
            enet: true,
            squish: true,
            zstd: true,
            libtheora: true,
            libvpx: true,
            libvorbis: true,
            opus: true,
            libogg: true,
            wslay: true,
            mbedtls: true,
            miniupnpc: true,
            pcre2: true,
        }
    }
}

/// The settings record supplied by the build orchestrator.
///
/// Configuration may rewrite some fields (`bits`, coupled `builtin` entries,
/// `x86_libtheora_opt_gcc`), so platforms receive it as `&mut`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub target: TargetMode,
    pub optimize: Optimize,
    pub bits: Bits,
    pub debug_symbols: DebugSymbols,
    pub separate_debug_symbols: bool,
    pub use_lto: bool,
    pub use_static_cpp: bool,
    pub use_ubsan: bool,
    pub use_asan: bool,
    pub use_lsan: bool,
    pub use_tsan: bool,
    pub builtin: BundledLibs,
    pub x86_libtheora_opt_gcc: bool,
}

impl Settings {
    /// Sanitizers requested through the `use_*san` toggles.
    #[must_use]
    pub fn sanitizers(&self) -> SanitizerSet {
        let mut set = SanitizerSet::empty();
        set.set(SanitizerSet::UNDEFINED, self.use_ubsan);
        set.set(SanitizerSet::ADDRESS, self.use_asan);
        set.set(SanitizerSet::LEAK, self.use_lsan);
        set.set(SanitizerSet::THREAD, self.use_tsan);
        set
    }

    pub fn set_sanitizers(&mut self, set: SanitizerSet) {
        self.use_ubsan = set.contains(SanitizerSet::UNDEFINED);
        self.use_asan = set.contains(SanitizerSet::ADDRESS);
        self.use_lsan = set.contains(SanitizerSet::LEAK);
        self.use_tsan = set.contains(SanitizerSet::THREAD);
    }

    #[must_use]
    pub const fn is_bundled(&self, lib: Library) -> bool {
        self.builtin.is_bundled(lib)
    }

    pub fn set_bundled(&mut self, lib: Library, bundled: bool) {
        self.builtin.set_bundled(lib, bundled);
    }
}
