//! Runtime configuration
//!
//! Audit preferences resolve from environment variables, optionally
//! overridden by a TOML preferences file named by `PAUDIT_CONFIG`.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// System release file filtered for vendor markers
    pub release_file: String,

    /// Distribution names accepted in the release file (case-insensitive)
    pub vendor_markers: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            release_file: env::var(env_vars::RELEASE_FILE)
                .unwrap_or_else(|_| "/etc/issue".to_string()),
            vendor_markers: env::var(env_vars::VENDOR_MARKERS)
                .ok()
                .map(|raw| parse_marker_list(&raw))
                .unwrap_or_else(|| vec!["SUSE".to_string(), "Oracle".to_string()]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Patch category the audit is restricted to
    pub category: String,

    /// Patch severity the audit is restricted to
    pub severity: String,

    /// Product-line marker a candidate listing row must mention
    pub product_filter: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            category: env::var(env_vars::PATCH_CATEGORY)
                .unwrap_or_else(|_| "security".to_string()),
            severity: env::var(env_vars::PATCH_SEVERITY)
                .unwrap_or_else(|_| "critical".to_string()),
            product_filter: env::var(env_vars::PRODUCT_FILTER)
                .unwrap_or_else(|_| "SUSE-SLE-Product".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub host: HostConfig,
    pub patch: PatchConfig,
}

impl AuditConfig {
    /// Resolve configuration: the TOML file named by `PAUDIT_CONFIG` when
    /// set, environment-variable defaults otherwise
    pub fn load() -> Result<Self, ConfigError> {
        match env::var(env_vars::CONFIG_FILE) {
            Ok(path) => Self::load_from_path(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Deserialize preferences from a TOML file; absent fields keep their
    /// environment-variable defaults
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read preferences file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preferences file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

fn parse_marker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|marker| marker.trim().to_string())
        .filter(|marker| !marker.is_empty())
        .collect()
}

/// Environment variable names for configuration
pub mod env_vars {
    /// Path to an optional TOML preferences file
    pub const CONFIG_FILE: &str = "PAUDIT_CONFIG";

    // Host
    pub const RELEASE_FILE: &str = "PAUDIT_RELEASE_FILE";
    pub const VENDOR_MARKERS: &str = "PAUDIT_VENDOR_MARKERS";

    // Patch
    pub const PATCH_CATEGORY: &str = "PAUDIT_PATCH_CATEGORY";
    pub const PATCH_SEVERITY: &str = "PAUDIT_PATCH_SEVERITY";
    pub const PRODUCT_FILTER: &str = "PAUDIT_PRODUCT_FILTER";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let config = AuditConfig::default();
        assert_eq!(config.host.release_file, "/etc/issue");
        assert_eq!(config.host.vendor_markers, vec!["SUSE", "Oracle"]);
        assert_eq!(config.patch.category, "security");
        assert_eq!(config.patch.severity, "critical");
        assert_eq!(config.patch.product_filter, "SUSE-SLE-Product");
    }

    #[test]
    fn test_marker_list_parsing() {
        assert_eq!(parse_marker_list("SUSE,Oracle"), vec!["SUSE", "Oracle"]);
        assert_eq!(parse_marker_list(" SUSE , openSUSE ,"), vec!["SUSE", "openSUSE"]);
        assert!(parse_marker_list("").is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[patch]\nseverity = \"important\"").unwrap();

        let config = AuditConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.patch.severity, "important");
        assert_eq!(config.patch.category, "security");
        assert_eq!(config.host.release_file, "/etc/issue");
    }

    #[test]
    fn test_full_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[host]\nrelease_file = \"/etc/os-release\"\nvendor_markers = [\"Oracle\"]\n\n\
             [patch]\ncategory = \"security\"\nseverity = \"moderate\"\nproduct_filter = \"SUSE-SLE-Module\""
        )
        .unwrap();

        let config = AuditConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.host.release_file, "/etc/os-release");
        assert_eq!(config.host.vendor_markers, vec!["Oracle"]);
        assert_eq!(config.patch.severity, "moderate");
        assert_eq!(config.patch.product_filter, "SUSE-SLE-Module");
    }

    #[test]
    fn test_unreadable_file() {
        let result = AuditConfig::load_from_path(Path::new("/paudit/no/such/config.toml"));
        assert_matches!(result, Err(ConfigError::Read { .. }));
    }

    #[test]
    fn test_unparseable_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[").unwrap();

        let result = AuditConfig::load_from_path(file.path());
        assert_matches!(result, Err(ConfigError::Parse { .. }));
    }
}
