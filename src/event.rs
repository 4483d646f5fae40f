//! Event records produced by the decoder.
//!
//! Three record shapes exist: file entries (`Root\File` grandchildren),
//! program entries (`Root\Programs` children) and the generic key visit
//! emitted for every key. Each shape carries a `DATA_TYPE` tag string for
//! downstream routing; in-process consumers match on [`EventData`]
//! variants instead.

use crate::timestamp::TimestampDescription;
use chrono::{DateTime, Utc};

/// File entry event data, decoded from a `Root\File\%VOLUME%` sub key.
///
/// All fields are optional: a field is populated only when the source key
/// carries the corresponding value and it decodes cleanly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileEntry {
    /// Company name that created the product the file belongs to.
    pub company_name: Option<String>,

    /// Description of the file.
    pub file_description: Option<String>,

    /// File system file reference, for example `9-1` (MFT entry -
    /// sequence number).
    pub file_reference: Option<String>,

    /// Size of the file in bytes.
    pub file_size: Option<u64>,

    /// Version of the file.
    pub file_version: Option<String>,

    /// Full path of the file.
    pub full_path: Option<String>,

    /// Language code of the file.
    pub language_code: Option<u64>,

    /// Product name the file belongs to.
    pub product_name: Option<String>,

    /// GUID of the entry under the `Root\Programs` key the file belongs to.
    pub program_identifier: Option<String>,

    /// SHA-1 digest of the file.
    pub sha1: Option<String>,
}

impl FileEntry {
    /// Data type tag used for downstream event routing.
    pub const DATA_TYPE: &'static str = "windows:registry:amcache";
}

/// Program entry event data, decoded from a `Root\Programs` sub key.
///
/// All fields are optional: a field is populated only when the source key
/// carries the corresponding value and it decodes cleanly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProgramEntry {
    /// Type of entry (usually `AddRemoveProgram`).
    pub entry_type: Option<String>,

    /// File paths of the installed program.
    pub file_paths: Option<Vec<String>>,

    /// Files belonging to the program.
    pub files: Option<Vec<String>>,

    /// Language code of the program.
    pub language_code: Option<u64>,

    /// MSI package code of the program.
    pub msi_package_code: Option<String>,

    /// MSI product code of the program.
    pub msi_product_code: Option<String>,

    /// Name of the installed program.
    pub name: Option<String>,

    /// Package code of the program.
    pub package_code: Option<String>,

    /// Product code of the program.
    pub product_code: Option<String>,

    /// Publisher of the program.
    pub publisher: Option<String>,

    /// Uninstall registry key of the program.
    pub uninstall_key: Option<String>,

    /// Version of the program.
    pub version: Option<String>,
}

impl ProgramEntry {
    /// Data type tag used for downstream event routing.
    pub const DATA_TYPE: &'static str = "windows:registry:amcache:programs";
}

/// Generic registry key event data, emitted for every visited key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeyVisit {
    /// Full key path, backslash joined, always starting with `\Root`.
    pub key_path: String,

    /// Space-separated `name: value` summary, sorted lexically by value
    /// name; `None` when the key has no representable values.
    pub values: Option<String>,
}

impl KeyVisit {
    /// Data type tag used for downstream event routing.
    pub const DATA_TYPE: &'static str = "windows:registry:key_value";
}

/// Decoded event payload, one variant per record shape.
///
/// The mediator sink can pattern-match on the variant; the tag strings
/// are retained only for external serialization compatibility.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "data_type"))]
pub enum EventData {
    /// File entry record.
    #[cfg_attr(feature = "serde", serde(rename = "windows:registry:amcache"))]
    File(FileEntry),

    /// Program entry record.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "windows:registry:amcache:programs")
    )]
    Program(ProgramEntry),

    /// Generic key visit record.
    #[cfg_attr(feature = "serde", serde(rename = "windows:registry:key_value"))]
    KeyVisit(KeyVisit),
}

impl EventData {
    /// Returns the data type tag of the wrapped record.
    pub fn data_type(&self) -> &'static str {
        match self {
            EventData::File(_) => FileEntry::DATA_TYPE,
            EventData::Program(_) => ProgramEntry::DATA_TYPE,
            EventData::KeyVisit(_) => KeyVisit::DATA_TYPE,
        }
    }
}

/// One decoded event: a normalized instant, its semantic description and
/// the record payload.
///
/// A single record may appear in several events, one per distinct
/// timestamp field present in its source key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimestampedEvent {
    /// Normalized UTC instant.
    pub timestamp: DateTime<Utc>,

    /// Semantic role of the timestamp.
    pub description: TimestampDescription,

    /// Record payload.
    pub data: EventData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_tags() {
        let file = EventData::File(FileEntry::default());
        let program = EventData::Program(ProgramEntry::default());
        let visit = EventData::KeyVisit(KeyVisit {
            key_path: "\\Root".to_string(),
            values: None,
        });

        assert_eq!(file.data_type(), "windows:registry:amcache");
        assert_eq!(program.data_type(), "windows:registry:amcache:programs");
        assert_eq!(visit.data_type(), "windows:registry:key_value");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialized_records_carry_data_type_tag() {
        let data = EventData::File(FileEntry {
            sha1: Some("a94a8fe5ccb19ba61c4c0873d391e987982fbbd3".to_string()),
            ..FileEntry::default()
        });

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["data_type"], "windows:registry:amcache");
        assert_eq!(json["sha1"], "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3");
    }
}
