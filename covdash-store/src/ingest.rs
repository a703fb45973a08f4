//! Raw coverage and usage exports, and joining them into records.
//!
//! Coverage comes from the test-coverage tool as a map keyed by API name;
//! usage comes from the client-code scanner as a list of rows whose counts
//! are decimal strings. A coverage entry without a usage row is an API
//! nobody calls.

use std::collections::HashMap;

use chrono::NaiveDate;
use covdash_core::ApiRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;

/// Client population assumed when an API has no usage row.
pub const DEFAULT_TOTAL_CLIENTS: u32 = 604;

/// Coverage metrics for one API, as exported by the coverage tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageEntry {
    /// Total lines of the implementation.
    pub full_size: u32,
    /// Lines exercised by tests.
    pub covered_lines: u32,
    /// Signature and brief description.
    #[serde(default)]
    pub apidoc: String,
}

/// Coverage export: API name to metrics.
///
/// Keeps the export's key order, so records built from it follow the file.
pub type ApiCoverage = IndexMap<String, CoverageEntry>;

/// One usage row, as exported by the client-code scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUsage {
    /// API name.
    pub api_name: String,
    /// Number of call sites, as a decimal string.
    pub usage_count: String,
    /// Size of the client population, as a decimal string.
    pub total_clients: String,
}

impl ApiUsage {
    /// Creates a usage row from numeric counts.
    pub fn new(api_name: impl Into<String>, usage_count: u32, total_clients: u32) -> Self {
        Self {
            api_name: api_name.into(),
            usage_count: usage_count.to_string(),
            total_clients: total_clients.to_string(),
        }
    }

    /// Parses both counts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCount`] if either count is not a
    /// non-negative integer.
    pub fn counts(&self) -> Result<(u32, u32), StoreError> {
        Ok((
            parse_count(&self.api_name, "usage_count", &self.usage_count)?,
            parse_count(&self.api_name, "total_clients", &self.total_clients)?,
        ))
    }
}

fn parse_count(api: &str, field: &'static str, value: &str) -> Result<u32, StoreError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| StoreError::InvalidCount {
            api: api.to_string(),
            field,
            value: value.to_string(),
        })
}

/// Joins coverage with usage into records dated `last_updated`.
///
/// Records follow the coverage map's order. Usage rows for APIs missing from
/// the coverage export are skipped; if an API has several usage rows, the
/// last one wins.
///
/// # Errors
///
/// Returns [`StoreError::InvalidCount`] for the first unparseable usage row
/// that belongs to a covered API.
pub fn join(
    coverage: &ApiCoverage,
    usage: &[ApiUsage],
    last_updated: NaiveDate,
) -> Result<Vec<ApiRecord>, StoreError> {
    let by_name: HashMap<&str, &ApiUsage> =
        usage.iter().map(|u| (u.api_name.as_str(), u)).collect();

    let orphans = by_name
        .keys()
        .filter(|name| !coverage.contains_key(**name))
        .count();
    if orphans > 0 {
        debug!(orphans, "Skipping usage rows without coverage data");
    }

    coverage
        .iter()
        .map(|(name, entry)| {
            let (usage_count, total_clients) = match by_name.get(name.as_str()) {
                Some(row) => row.counts()?,
                None => (0, DEFAULT_TOTAL_CLIENTS),
            };
            Ok(ApiRecord::builder(name.clone())
                .lines(entry.full_size, entry.covered_lines)
                .usage(usage_count, total_clients)
                .documentation(entry.apidoc.clone())
                .last_updated(last_updated)
                .build())
        })
        .collect()
}
