//! Inclusive creation-date bounds.

use bulk_delete_models::TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;

use crate::error::{CoreError, Result};

/// Parses a timestamp in the directory's format.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        CoreError::DateParse {
            value: value.to_string(),
            source,
        }
    })
}

/// Optional inclusive `[after, before]` window on creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest accepted creation time.
    pub after: Option<NaiveDateTime>,
    /// Latest accepted creation time.
    pub before: Option<NaiveDateTime>,
}

impl DateRange {
    /// Parses both bounds; empty strings count as absent.
    pub fn parse(after: Option<&str>, before: Option<&str>) -> Result<Self> {
        let parse_bound = |bound: Option<&str>| {
            bound
                .filter(|s| !s.trim().is_empty())
                .map(parse_timestamp)
                .transpose()
        };
        Ok(Self {
            after: parse_bound(after)?,
            before: parse_bound(before)?,
        })
    }

    /// Returns true when no bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    /// Tests an already parsed timestamp against the bounds.
    pub fn contains_time(&self, created_at: NaiveDateTime) -> bool {
        self.after.map_or(true, |after| created_at >= after)
            && self.before.map_or(true, |before| created_at <= before)
    }

    /// Parses `created_at` and tests it against the bounds.
    ///
    /// The timestamp is parsed even when the range is unbounded, so a
    /// malformed project timestamp is always reported.
    pub fn contains(&self, created_at: &str) -> Result<bool> {
        let created_at = parse_timestamp(created_at)?;
        Ok(self.contains_time(created_at))
    }
}

/// One-shot form of [`DateRange::contains`] taking raw bound strings.
pub fn in_range(created_at: &str, after: Option<&str>, before: Option<&str>) -> Result<bool> {
    DateRange::parse(after, before)?.contains(created_at)
}
