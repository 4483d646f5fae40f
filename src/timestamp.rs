//! Timestamp conversion between artifact clocks and normalized UTC instants.
//!
//! AMCache carries two clock domains: Windows FILETIME tick counters
//! (entry write, file creation and modification times) and 32-bit POSIX
//! second counters (PE compilation and program installation times). Both
//! are UTC-based by definition, so conversion is pure arithmetic.

use chrono::{DateTime, Utc};
use std::fmt;

/// Seconds between the FILETIME epoch (1601-01-01) and the Unix epoch.
const FILETIME_UNIX_DIFF: i64 = 11_644_473_600;

/// Converts a Windows FILETIME to a UTC instant.
///
/// FILETIME counts 100-nanosecond intervals since 1601-01-01. Returns
/// `None` when the resulting instant is outside chrono's representable
/// range.
pub fn filetime_to_datetime(filetime: u64) -> Option<DateTime<Utc>> {
    let seconds = (filetime / 10_000_000) as i64 - FILETIME_UNIX_DIFF;
    let nanos = ((filetime % 10_000_000) * 100) as u32;

    DateTime::from_timestamp(seconds, nanos)
}

/// Converts a POSIX timestamp (seconds since 1970-01-01) to a UTC instant.
///
/// Returns `None` when the second count is outside chrono's representable
/// range.
pub fn posix_to_datetime(seconds: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(seconds).ok()?, 0)
}

/// Semantic role of the timestamp attached to an emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TimestampDescription {
    /// Metadata change time (PE compilation time for file entries).
    Change,

    /// File creation time.
    Creation,

    /// Program installation time.
    Installation,

    /// Content modification time.
    Modification,

    /// Registry key last written time.
    Written,
}

impl TimestampDescription {
    /// Returns the timeline label for this description.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampDescription::Change => "Metadata Modification Time",
            TimestampDescription::Creation => "Creation Time",
            TimestampDescription::Installation => "Installation Time",
            TimestampDescription::Modification => "Content Modification Time",
            TimestampDescription::Written => "Last Written Time",
        }
    }
}

impl fmt::Display for TimestampDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filetime_epoch() {
        let instant = filetime_to_datetime(0).unwrap();
        assert_eq!(instant.to_rfc3339(), "1601-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_filetime_conversion() {
        // 2017-01-01T00:00:00Z expressed as FILETIME ticks.
        let instant = filetime_to_datetime(131_277_024_000_000_000).unwrap();
        assert_eq!(instant.to_rfc3339(), "2017-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_filetime_sub_second_precision() {
        let instant = filetime_to_datetime(131_277_024_000_000_001).unwrap();
        assert_eq!(instant.timestamp_subsec_nanos(), 100);
    }

    #[test]
    fn test_posix_conversion() {
        let instant = posix_to_datetime(1_000_000_000).unwrap();
        assert_eq!(instant.to_rfc3339(), "2001-09-09T01:46:40+00:00");
    }

    #[test]
    fn test_posix_out_of_range() {
        assert!(posix_to_datetime(u64::MAX).is_none());
    }

    #[test]
    fn test_description_labels() {
        assert_eq!(TimestampDescription::Creation.as_str(), "Creation Time");
        assert_eq!(
            TimestampDescription::Modification.to_string(),
            "Content Modification Time"
        );
        assert_eq!(
            TimestampDescription::Change.as_str(),
            "Metadata Modification Time"
        );
        assert_eq!(
            TimestampDescription::Installation.as_str(),
            "Installation Time"
        );
        assert_eq!(TimestampDescription::Written.as_str(), "Last Written Time");
    }
}
