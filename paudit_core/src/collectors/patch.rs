//! Patch information collector
//!
//! Resolves the most critical pending security patch and its remediation
//! deadline from zypper queries.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;

use crate::collectors::error::{CollectError, DateParseError};
use crate::command::CommandRunner;
use crate::config::PatchConfig;
use crate::report;

/// Day/month/year rendering used for created dates and deadlines
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Fixed remediation window added to the creation date (6 x 30 days,
/// NOT calendar months)
pub const REMEDIATION_WINDOW_DAYS: i64 = 180;

/// Message printed when no candidate patch exists
pub const NO_PATCHES_MESSAGE: &str = "No patches found.";

// `zypper list-patches --cve` column positions after splitting on '|'
const COL_ISSUE: usize = 1;
const COL_PATCH_NAME: usize = 2;

// Timestamp layouts observed in `zypper patch-info` output
const CREATED_ON_LAYOUTS: &[&str] = &[
    "%a %b %e %H:%M:%S %Y",    // Thu Jun 17 14:21:25 2021
    "%a %d %b %Y %I:%M:%S %p", // Thu 17 Jun 2021 02:21:25 PM
    "%Y-%m-%d %H:%M:%S",
];

/// Immutable patch audit outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchRecord {
    /// No critical security patch is pending
    NoneFound,
    /// The selected patch and its remediation data
    Found {
        patch_id: String,
        cve: String,
        created: String,
        summary: String,
        deadline: String,
    },
}

impl PatchRecord {
    pub fn patch_id(&self) -> Option<&str> {
        match self {
            PatchRecord::NoneFound => None,
            PatchRecord::Found { patch_id, .. } => Some(patch_id),
        }
    }

    /// Four-column report with a trailing blank line, or the fixed
    /// no-patches message
    pub fn format_report(&self) -> String {
        match self {
            PatchRecord::NoneFound => NO_PATCHES_MESSAGE.to_string(),
            PatchRecord::Found {
                cve,
                created,
                summary,
                deadline,
                ..
            } => {
                let table = report::render_table(&[
                    ("SUMMARY", summary.as_str()),
                    ("CVE", cve.as_str()),
                    ("DATE", created.as_str()),
                    ("DEADLINE", deadline.as_str()),
                ]);
                format!("{}\n\n", table)
            }
        }
    }
}

/// Candidate row selected from the patch listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPatch {
    pub patch_id: String,
    pub cve: String,
}

/// Collector for pending-patch data
pub struct PatchCollector<'r> {
    runner: &'r dyn CommandRunner,
    config: PatchConfig,
}

impl<'r> PatchCollector<'r> {
    pub fn new(runner: &'r dyn CommandRunner, config: PatchConfig) -> Self {
        Self { runner, config }
    }

    /// Resolve the patch state: one listing query selects the patch, one
    /// detail query resolves its creation date and summary
    pub fn collect(&self) -> Result<PatchRecord, CollectError> {
        let listing = self.runner.run("zypper", &["list-patches", "--cve"])?;
        let Some(selected) = select_top_patch(&listing.stdout, &self.config) else {
            debug!("no candidate rows in patch listing");
            return Ok(PatchRecord::NoneFound);
        };
        debug!("selected patch {} ({})", selected.patch_id, selected.cve);

        let details = self
            .runner
            .run("zypper", &["patch-info", selected.patch_id.as_str()])?;

        let created = reformat_created(detail_field(&details.stdout, "Created On").unwrap_or(""))?;
        let summary = detail_field(&details.stdout, "Summary")
            .unwrap_or("")
            .to_string();
        let deadline = deadline_from(&created)?;

        Ok(PatchRecord::Found {
            patch_id: selected.patch_id,
            cve: selected.cve,
            created,
            summary,
            deadline,
        })
    }
}

/// Apply the selection policy to raw listing output
///
/// Keeps rows mentioning the configured category, severity, and product
/// line, deduplicates on the trailing field (first occurrence wins), then
/// orders by the issue field descending and takes the winner. Identifier
/// and CVE come from the same row.
pub fn select_top_patch(listing: &str, config: &PatchConfig) -> Option<SelectedPatch> {
    let category = config.category.to_lowercase();
    let severity = config.severity.to_lowercase();
    let product = config.product_filter.to_lowercase();

    let mut seen = HashSet::new();
    let mut rows: Vec<Vec<&str>> = Vec::new();
    for line in listing.lines() {
        let lowered = line.to_lowercase();
        if !lowered.contains(&category)
            || !lowered.contains(&severity)
            || !lowered.contains(&product)
        {
            continue;
        }
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() <= COL_PATCH_NAME {
            continue;
        }
        let dedup_key = fields.last().copied().unwrap_or("").trim().to_string();
        if !seen.insert(dedup_key) {
            continue;
        }
        rows.push(fields);
    }

    // Stable sort keeps first-seen order among equal issue fields
    rows.sort_by(|a, b| b[COL_ISSUE].cmp(a[COL_ISSUE]));

    rows.first().map(|fields| SelectedPatch {
        patch_id: fields[COL_PATCH_NAME].trim().to_string(),
        cve: fields[COL_ISSUE].trim().to_string(),
    })
}

/// Extract the value of a labeled `patch-info` line ("Label : value")
pub fn detail_field<'a>(details: &'a str, label: &str) -> Option<&'a str> {
    details.lines().find_map(|line| {
        let rest = line.strip_prefix(label)?;
        let (padding, value) = rest.split_once(':')?;
        if !padding.trim().is_empty() {
            return None;
        }
        Some(value.trim())
    })
}

/// Reformat a `Created On` timestamp to day/month/year
pub fn reformat_created(raw: &str) -> Result<String, DateParseError> {
    let value = raw.trim();
    parse_created_date(value)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .ok_or_else(|| DateParseError::UnrecognizedTimestamp {
            value: value.to_string(),
        })
}

/// Remediation deadline: creation date plus the fixed 180-day window
pub fn deadline_from(created: &str) -> Result<String, DateParseError> {
    let date = NaiveDate::parse_from_str(created, DATE_FORMAT).map_err(|source| {
        DateParseError::InvalidDate {
            value: created.to_string(),
            source,
        }
    })?;
    let deadline = date + Duration::days(REMEDIATION_WINDOW_DAYS);
    Ok(deadline.format(DATE_FORMAT).to_string())
}

fn parse_created_date(value: &str) -> Option<NaiveDate> {
    if let Some(date) = parse_with_layouts(value) {
        return Some(date);
    }
    // Long zypper layouts end with a timezone name chrono cannot parse;
    // retry without the final token
    let (head, zone) = value.rsplit_once(' ')?;
    if !zone.is_empty() && zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return parse_with_layouts(head.trim_end());
    }
    None
}

fn parse_with_layouts(value: &str) -> Option<NaiveDate> {
    for layout in CREATED_ON_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(parsed.date());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
