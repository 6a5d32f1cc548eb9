use serde::Serialize;
use std::borrow::Cow;

/// Value shape of a declared option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionKind {
    Bool { default: bool },
    Enum { default: &'static str, allowed: &'static [&'static str] },
}

/// A user-configurable build option declared by a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
    #[serde(flatten)]
    pub kind: OptionKind,
}

impl OptionSpec {
    pub fn boolean(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        default: bool,
    ) -> Self {
        Self { name: name.into(), description: description.into(), kind: OptionKind::Bool { default } }
    }

    pub fn enumerated(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        default: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: OptionKind::Enum { default, allowed },
        }
    }

    /// Default rendered the way it would be written in a settings file.
    #[must_use]
    pub fn default_value(&self) -> Cow<'static, str> {
        match &self.kind {
            OptionKind::Bool { default } => Cow::Borrowed(if *default { "true" } else { "false" }),
            OptionKind::Enum { default, .. } => Cow::Borrowed(*default),
        }
    }

    #[must_use]
    pub fn allowed_values(&self) -> &'static [&'static str] {
        match &self.kind {
            OptionKind::Bool { .. } => &["true", "false"],
            OptionKind::Enum { allowed, .. } => *allowed,
        }
    }

    /// Checks a raw value against the option's allowed set.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.allowed_values().contains(&value)
    }
}
