use crate::error::KernelError;
use std::cmp::Ordering;
use std::fmt;

/// A dotted numeric version as reported by `pkg-config --modversion`.
///
/// Components compare numerically (`2.9 < 2.89`) and missing trailing
/// components count as zero (`2.89 == 2.89.0`). Trailing non-digit text in a
/// component is ignored (`3.0.0rc1` reads as `3.0.0`).
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u64>,
    raw: String,
}

impl Version {
    /// Parses a version string.
    ///
    /// # Errors
    /// Returns [`KernelError::MalformedVersion`] if any component does not start with a digit.
    pub fn parse(raw: &str) -> Result<Self, KernelError> {
        let raw = raw.trim();
        let malformed =
            || KernelError::MalformedVersion { value: raw.to_owned(), context: None };

        if raw.is_empty() {
            return Err(malformed());
        }

        let parts = raw
            .split('.')
            .map(|component| {
                let digits_end =
                    component.find(|c: char| !c.is_ascii_digit()).unwrap_or(component.len());
                component[..digits_end].parse::<u64>().map_err(|_| malformed())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { parts, raw: raw.to_owned() })
    }

    #[must_use]
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| {
                let lhs = self.parts.get(i).copied().unwrap_or(0);
                let rhs = other.parts.get(i).copied().unwrap_or(0);
                lhs.cmp(&rhs)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Version {}
