//! Host information collector
//!
//! Resolves hostname and OS release for the audited machine.

use log::debug;
use regex::RegexBuilder;

use crate::collectors::error::CollectError;
use crate::command::CommandRunner;
use crate::config::HostConfig;
use crate::report;

/// Sentinel reported when the release file yields no known vendor line
pub const UNKNOWN_OS_VERSION: &str = "Unknown OS Version";

// SLE greets with "Welcome to SUSE ..."; the prefix is stripped so the
// report shows the product name alone
const GREETING_PREFIX: &str = "Welcome to S";

/// Immutable host identity snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    hostname: String,
    os_version: String,
}

impl HostRecord {
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn os_version(&self) -> &str {
        &self.os_version
    }

    /// Two-column report surrounded by blank lines
    pub fn format_report(&self) -> String {
        let table = report::render_table(&[
            ("HOSTNAME", self.hostname.as_str()),
            ("VERSION OS", self.os_version.as_str()),
        ]);
        format!("\n\n{}\n\n", table)
    }
}

/// Collector for host identity data
pub struct HostCollector<'r> {
    runner: &'r dyn CommandRunner,
    config: HostConfig,
}

impl<'r> HostCollector<'r> {
    pub fn new(runner: &'r dyn CommandRunner, config: HostConfig) -> Self {
        Self { runner, config }
    }

    /// Build the immutable record from the two resolutions
    pub fn collect(&self) -> Result<HostRecord, CollectError> {
        let hostname = self.resolve_hostname()?;
        let os_version = self.resolve_os_version()?;
        debug!("host identity resolved: {} / {}", hostname, os_version);
        Ok(HostRecord {
            hostname,
            os_version,
        })
    }

    /// Raw trimmed `hostname` output; not validated further
    pub fn resolve_hostname(&self) -> Result<String, CollectError> {
        let output = self.runner.run("hostname", &[])?;
        Ok(output.stdout)
    }

    /// First release-file segment naming a known vendor, or the sentinel
    pub fn resolve_os_version(&self) -> Result<String, CollectError> {
        let output = self
            .runner
            .run("cat", &[self.config.release_file.as_str()])?;
        Ok(extract_os_version(
            &output.stdout,
            &self.config.vendor_markers,
        ))
    }
}

/// Filter release-file content for a vendor marker line
///
/// The greeting prefix is normalized away and the text split on '(' so
/// that "Welcome to SUSE Linux Enterprise Server 15 SP4  (x86_64)"
/// reduces to the product name segment.
pub fn extract_os_version(content: &str, vendor_markers: &[String]) -> String {
    let Some(matcher) = build_marker_matcher(vendor_markers) else {
        return UNKNOWN_OS_VERSION.to_string();
    };

    content
        .replace(GREETING_PREFIX, "S")
        .replace('(', "\n")
        .lines()
        .map(str::trim)
        .find(|line| matcher.is_match(line))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_OS_VERSION.to_string())
}

fn build_marker_matcher(vendor_markers: &[String]) -> Option<regex::Regex> {
    if vendor_markers.is_empty() {
        return None;
    }
    let pattern = vendor_markers
        .iter()
        .map(|marker| regex::escape(marker))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()
}
