//! Status enums shared across the storefront.

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification.
///
/// Variant names follow the CSS classes the storefront templates use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Lowercase name, as used in templates.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serde() {
        let json = serde_json::to_string(&Severity::Danger).unwrap();
        assert_eq!(json, "\"danger\"");
    }

    #[test]
    fn test_severity_default_is_success() {
        assert_eq!(Severity::default(), Severity::Success);
    }
}
