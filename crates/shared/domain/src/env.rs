//! The build environment a platform mutates during configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// List-valued environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVar {
    CcFlags,
    LinkFlags,
    /// Entries are `NAME` or `NAME=value`.
    CppDefines,
    CppPath,
    LibPath,
    Libs,
}

impl EnvVar {
    /// Search paths keep the first occurrence when merged, everything else keeps the last.
    #[must_use]
    pub const fn keeps_first(self) -> bool {
        matches!(self, Self::CppPath | Self::LibPath)
    }
}

/// Compiler/linker flags produced by parsing a package-query output.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFlags {
    pub cc_flags: Vec<String>,
    pub link_flags: Vec<String>,
    pub cpp_defines: Vec<String>,
    pub cpp_path: Vec<String>,
    pub lib_path: Vec<String>,
    pub libs: Vec<String>,
}

impl ParsedFlags {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cc_flags.is_empty()
            && self.link_flags.is_empty()
            && self.cpp_defines.is_empty()
            && self.cpp_path.is_empty()
            && self.lib_path.is_empty()
            && self.libs.is_empty()
    }

    pub fn push(&mut self, var: EnvVar, value: impl Into<String>) {
        self.list_mut(var).push(value.into());
    }

    const fn list_mut(&mut self, var: EnvVar) -> &mut Vec<String> {
        match var {
            EnvVar::CcFlags => &mut self.cc_flags,
            EnvVar::LinkFlags => &mut self.link_flags,
            EnvVar::CppDefines => &mut self.cpp_defines,
            EnvVar::CppPath => &mut self.cpp_path,
            EnvVar::LibPath => &mut self.lib_path,
            EnvVar::Libs => &mut self.libs,
        }
    }

    fn into_vars(self) -> [(EnvVar, Vec<String>); 6] {
        [
            (EnvVar::CcFlags, self.cc_flags),
            (EnvVar::LinkFlags, self.link_flags),
            (EnvVar::CppDefines, self.cpp_defines),
            (EnvVar::CppPath, self.cpp_path),
            (EnvVar::LibPath, self.lib_path),
            (EnvVar::Libs, self.libs),
        ]
    }
}

/// Mutable build environment owned by the orchestrator.
///
/// `append` and `prepend` never deduplicate; only [`BuildEnv::merge_flags`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildEnv {
    pub cc: String,
    pub cxx: String,
    pub cc_flags: Vec<String>,
    pub link_flags: Vec<String>,
    pub cpp_defines: Vec<String>,
    pub cpp_path: Vec<String>,
    pub lib_path: Vec<String>,
    pub libs: Vec<String>,
    /// Marker appended to output artifact names.
    pub extra_suffix: String,
    /// Parallel build jobs configured by the orchestrator. Read only.
    pub jobs: usize,
}

impl Default for BuildEnv {
    fn default() -> Self {
        Self {
            cc: "cc".to_owned(),
            cxx: "c++".to_owned(),
            cc_flags: Vec::new(),
            link_flags: Vec::new(),
            cpp_defines: Vec::new(),
            cpp_path: Vec::new(),
            lib_path: Vec::new(),
            libs: Vec::new(),
            extra_suffix: String::new(),
            jobs: 1,
        }
    }
}

impl BuildEnv {
    #[must_use]
    pub fn with_jobs(jobs: usize) -> Self {
        Self { jobs: jobs.max(1), ..Self::default() }
    }

    const fn list_mut(&mut self, var: EnvVar) -> &mut Vec<String> {
        match var {
            EnvVar::CcFlags => &mut self.cc_flags,
            EnvVar::LinkFlags => &mut self.link_flags,
            EnvVar::CppDefines => &mut self.cpp_defines,
            EnvVar::CppPath => &mut self.cpp_path,
            EnvVar::LibPath => &mut self.lib_path,
            EnvVar::Libs => &mut self.libs,
        }
    }

    /// Appends `items` after the existing values, in order.
    pub fn append<I, S>(&mut self, var: EnvVar, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_mut(var).extend(items.into_iter().map(Into::into));
    }

    /// Inserts `items` before the existing values, keeping their relative order.
    pub fn prepend<I, S>(&mut self, var: EnvVar, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.list_mut(var);
        list.splice(0..0, items.into_iter().map(Into::into));
    }

    /// Appends every list of `flags`, then drops duplicates.
    ///
    /// Paths keep their left-most occurrence so earlier search directories win;
    /// other lists keep the right-most one so link order stays valid.
    pub fn merge_flags(&mut self, flags: ParsedFlags) {
        for (var, values) in flags.into_vars() {
            if values.is_empty() {
                continue;
            }
            let list = self.list_mut(var);
            list.extend(values);
            dedup(list, var.keeps_first());
        }
    }
}

fn dedup(list: &mut Vec<String>, keep_first: bool) {
    let mut seen = HashSet::with_capacity(list.len());
    if keep_first {
        list.retain(|v| seen.insert(v.clone()));
    } else {
        list.reverse();
        list.retain(|v| seen.insert(v.clone()));
        list.reverse();
    }
}
