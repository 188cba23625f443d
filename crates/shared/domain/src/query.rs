//! Selection and paging value objects for list/get queries.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FILTER_KEY_CREATED_AT, FILTER_KEY_ID, LEGACY_TIMESTAMP_FORMAT};
use crate::error::{DomainError, DomainResult};

/// Selection criterion applied on top of the live-row predicate.
///
/// Multiple filters are combined with AND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    ById(String),
    ByCreatedAt(DateTime<Utc>),
}

impl Filter {
    /// Convert a key/value pair from a string map.
    ///
    /// Unknown keys are rejected instead of being ignored.
    pub fn from_pair(key: &str, value: &str) -> DomainResult<Self> {
        match key {
            FILTER_KEY_ID => Ok(Filter::ById(value.to_string())),
            FILTER_KEY_CREATED_AT => parse_timestamp(value).map(Filter::ByCreatedAt),
            other => Err(DomainError::validation(format!(
                "unsupported filter key '{}'",
                other
            ))),
        }
    }

    /// Convert a whole string map. Keys are processed in sorted order so the
    /// resulting filter list is deterministic.
    pub fn from_map(map: &HashMap<String, String>) -> DomainResult<Vec<Self>> {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| Filter::from_pair(key, &map[key]))
            .collect()
    }
}

fn parse_timestamp(value: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, LEGACY_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| DomainError::validation(format!("invalid created_at value '{}'", value)))
}

/// Row window for list queries.
///
/// A `limit` of zero means "no limit"; the offset is only honoured together
/// with a non-zero limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// All rows, no window.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Window to apply, if any.
    pub fn window(&self) -> Option<(u64, u64)> {
        if self.limit == 0 {
            None
        } else {
            Some((self.limit, self.offset))
        }
    }
}
