use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical device config path used in findings and reports.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - usually just a file name (`core-sw1.conf`), but nested paths are kept as-is
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct DevicePath(String);

impl Default for DevicePath {
    fn default() -> Self {
        DevicePath::new(".")
    }
}

impl DevicePath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        // Avoid empty path; keep it explicit.
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }
}

impl From<&Utf8Path> for DevicePath {
    fn from(value: &Utf8Path) -> Self {
        DevicePath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for DevicePath {
    fn from(value: Utf8PathBuf) -> Self {
        DevicePath::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes_and_dot_prefix() {
        assert_eq!(DevicePath::new("./configs\\core-sw1.conf").as_str(), "configs/core-sw1.conf");
    }

    #[test]
    fn empty_input_stays_explicit() {
        assert_eq!(DevicePath::new("").as_str(), ".");
    }
}
