//! SQLite helper utilities for type conversion
//!
//! SQLite doesn't natively support UUIDs or timezone-aware timestamps like
//! PostgreSQL. This module converts between Rust types and the TEXT columns
//! used to store them.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Convert a UUID to a SQLite-compatible string
#[inline]
pub fn uuid_to_str(id: Uuid) -> String {
    id.to_string()
}

/// Parse a SQLite string back to a UUID
#[inline]
pub fn str_to_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| anyhow!("Invalid UUID '{}': {}", s, e))
}

/// Parse an ISO8601 string to DateTime
#[inline]
pub fn str_to_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Try parsing SQLite's datetime() format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
                .map_err(|e| anyhow!("Invalid datetime '{}': {}", s, e))
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_uuid_roundtrip() {
        let id = Uuid::new_v4();
        let s = uuid_to_str(id);
        let parsed = str_to_uuid(&s).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_invalid_uuid() {
        assert!(str_to_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_datetime_roundtrip() {
        let dt = Utc::now();
        let parsed = str_to_datetime(&dt.to_rfc3339()).unwrap();
        assert_eq!(dt.timestamp(), parsed.timestamp());
    }

    #[test]
    fn test_sqlite_datetime_format() {
        let parsed = str_to_datetime("2024-03-01 12:30:00").unwrap();
        assert_eq!(parsed.timestamp(), 1709296200);
    }
}
