//! Registry value records and typed payload decoding.

use crate::error::{AmcacheError, Result};
use crate::utils::{read_utf16_string, split_multi_string};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::fmt;
use std::io::Cursor;

/// Registry value data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// No value type.
    None,

    /// String (null-terminated).
    String,

    /// String with environment variables.
    ExpandString,

    /// Binary data.
    Binary,

    /// 32-bit little-endian integer.
    Dword,

    /// 32-bit big-endian integer.
    DwordBigEndian,

    /// Symbolic link (Unicode).
    Link,

    /// Multiple strings.
    MultiString,

    /// Resource list.
    ResourceList,

    /// Full resource descriptor.
    FullResourceDescriptor,

    /// Resource requirements list.
    ResourceRequirementsList,

    /// 64-bit little-endian integer.
    Qword,

    /// Unknown or non-standard value type.
    /// Contains the raw type value.
    Unknown(u32),
}

impl ValueType {
    /// Parses a value type from a u32 type tag.
    ///
    /// Value types 0-11 are predefined by the Windows Registry
    /// specification; other tags are allowed and returned as
    /// `ValueType::Unknown`.
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => ValueType::None,
            1 => ValueType::String,
            2 => ValueType::ExpandString,
            3 => ValueType::Binary,
            4 => ValueType::Dword,
            5 => ValueType::DwordBigEndian,
            6 => ValueType::Link,
            7 => ValueType::MultiString,
            8 => ValueType::ResourceList,
            9 => ValueType::FullResourceDescriptor,
            10 => ValueType::ResourceRequirementsList,
            11 => ValueType::Qword,
            _ => ValueType::Unknown(value),
        }
    }

    /// Returns the name of this value type.
    pub fn name(&self) -> String {
        match self {
            ValueType::None => "REG_NONE".to_string(),
            ValueType::String => "REG_SZ".to_string(),
            ValueType::ExpandString => "REG_EXPAND_SZ".to_string(),
            ValueType::Binary => "REG_BINARY".to_string(),
            ValueType::Dword => "REG_DWORD".to_string(),
            ValueType::DwordBigEndian => "REG_DWORD_BIG_ENDIAN".to_string(),
            ValueType::Link => "REG_LINK".to_string(),
            ValueType::MultiString => "REG_MULTI_SZ".to_string(),
            ValueType::ResourceList => "REG_RESOURCE_LIST".to_string(),
            ValueType::FullResourceDescriptor => "REG_FULL_RESOURCE_DESCRIPTOR".to_string(),
            ValueType::ResourceRequirementsList => {
                "REG_RESOURCE_REQUIREMENTS_LIST".to_string()
            }
            ValueType::Qword => "REG_QWORD".to_string(),
            ValueType::Unknown(value) => format!("REG_UNKNOWN_{:#010x}", value),
        }
    }
}

/// A single value record as handed over by the hive reader.
///
/// Read-only input: a name (empty for the default value), a type tag and
/// the raw payload bytes. A `None` payload means the value carries no data
/// at all, rendered as `(empty)` in value summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRecord {
    /// Value name; empty for the key's default value.
    pub name: String,

    /// Value data type tag.
    pub data_type: ValueType,

    /// Raw payload bytes, or `None` when the value has no data.
    pub data: Option<Vec<u8>>,
}

impl ValueRecord {
    /// Creates a value record.
    pub fn new(name: impl Into<String>, data_type: ValueType, data: Option<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data_type,
            data,
        }
    }

    /// Returns the display name, `(default)` when the value is unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "(default)"
        } else {
            &self.name
        }
    }

    /// Decodes the raw payload according to the value's type tag.
    ///
    /// String types decode as UTF-16LE text, integer types widen to `u64`,
    /// multi-strings decode to an ordered list (which may be empty). All
    /// remaining types are opaque; only their payload length is retained.
    ///
    /// # Errors
    ///
    /// Returns an error naming this value when the payload is shorter than
    /// the declared integer width or is not valid UTF-16LE. Callers treat
    /// the value as absent and continue.
    pub fn decode(&self) -> Result<DecodedValue> {
        let data = self.data.as_deref().unwrap_or(&[]);

        match self.data_type {
            ValueType::String | ValueType::ExpandString | ValueType::Link => {
                Ok(DecodedValue::String(read_utf16_string(data, &self.name)?))
            }

            ValueType::Dword => {
                if data.len() < 4 {
                    return Err(AmcacheError::truncated_value(&self.name, 4, data.len()));
                }
                let mut cursor = Cursor::new(data);
                Ok(DecodedValue::Integer(u64::from(
                    cursor.read_u32::<LittleEndian>()?,
                )))
            }

            ValueType::DwordBigEndian => {
                if data.len() < 4 {
                    return Err(AmcacheError::truncated_value(&self.name, 4, data.len()));
                }
                let mut cursor = Cursor::new(data);
                Ok(DecodedValue::Integer(u64::from(
                    cursor.read_u32::<BigEndian>()?,
                )))
            }

            ValueType::Qword => {
                if data.len() < 8 {
                    return Err(AmcacheError::truncated_value(&self.name, 8, data.len()));
                }
                let mut cursor = Cursor::new(data);
                Ok(DecodedValue::Integer(cursor.read_u64::<LittleEndian>()?))
            }

            ValueType::MultiString => {
                let decoded = read_utf16_string(data, &self.name)?;
                Ok(DecodedValue::MultiString(split_multi_string(&decoded)))
            }

            // Remaining types (REG_BINARY, resource types, unknown tags)
            // are opaque; only the payload length is kept for display.
            _ => Ok(DecodedValue::Bytes(data.len())),
        }
    }
}

/// Decoded form of a value payload.
///
/// Transient: produced while one key is being processed and consumed by
/// field assignment or display formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Text from a string, expandable-string or link value.
    String(String),

    /// Integer from a 32-bit, big-endian 32-bit or 64-bit value.
    Integer(u64),

    /// Ordered list of strings from a multi-string value.
    MultiString(Vec<String>),

    /// Opaque payload; only the byte count is retained.
    Bytes(usize),
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::String(s) => f.write_str(s),
            DecodedValue::Integer(i) => write!(f, "{}", i),
            DecodedValue::MultiString(strings) => write!(f, "[{}]", strings.join(", ")),
            DecodedValue::Bytes(len) => write!(f, "({} bytes)", len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    #[test]
    fn test_value_type_from_u32() {
        assert_eq!(ValueType::from_u32(1), ValueType::String);
        assert_eq!(ValueType::from_u32(4), ValueType::Dword);
        assert_eq!(ValueType::from_u32(11), ValueType::Qword);
        assert!(matches!(ValueType::from_u32(999), ValueType::Unknown(999)));
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(ValueType::String.name(), "REG_SZ");
        assert_eq!(ValueType::MultiString.name(), "REG_MULTI_SZ");
        assert_eq!(ValueType::Qword.name(), "REG_QWORD");
    }

    #[test]
    fn test_decode_string() {
        let value = ValueRecord::new("0", ValueType::String, Some(utf16le("Firefox\0")));
        assert_eq!(
            value.decode().unwrap(),
            DecodedValue::String("Firefox".to_string())
        );
    }

    #[test]
    fn test_decode_dword() {
        let value = ValueRecord::new("3", ValueType::Dword, Some(vec![0x09, 0x04, 0, 0]));
        assert_eq!(value.decode().unwrap(), DecodedValue::Integer(0x0409));
    }

    #[test]
    fn test_decode_dword_big_endian() {
        let value = ValueRecord::new(
            "3",
            ValueType::DwordBigEndian,
            Some(vec![0, 0, 0x04, 0x09]),
        );
        assert_eq!(value.decode().unwrap(), DecodedValue::Integer(0x0409));
    }

    #[test]
    fn test_decode_qword() {
        let value = ValueRecord::new(
            "6",
            ValueType::Qword,
            Some(vec![0x00, 0x10, 0, 0, 0, 0, 0, 0]),
        );
        assert_eq!(value.decode().unwrap(), DecodedValue::Integer(0x1000));
    }

    #[test]
    fn test_decode_truncated_dword() {
        let value = ValueRecord::new("3", ValueType::Dword, Some(vec![0x01, 0x02]));
        let err = value.decode().unwrap_err();
        assert!(matches!(
            err,
            AmcacheError::TruncatedValue { expected: 4, actual: 2, .. }
        ));
    }

    #[test]
    fn test_decode_multi_string() {
        let value = ValueRecord::new(
            "Files",
            ValueType::MultiString,
            Some(utf16le("a\0b\0\0")),
        );
        assert_eq!(
            value.decode().unwrap(),
            DecodedValue::MultiString(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_decode_empty_multi_string() {
        let value = ValueRecord::new("Files", ValueType::MultiString, Some(Vec::new()));
        assert_eq!(value.decode().unwrap(), DecodedValue::MultiString(Vec::new()));
    }

    #[test]
    fn test_decode_binary_keeps_length_only() {
        let value = ValueRecord::new("blob", ValueType::Binary, Some(vec![1, 2, 3]));
        assert_eq!(value.decode().unwrap(), DecodedValue::Bytes(3));
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(DecodedValue::String("x".to_string()).to_string(), "x");
        assert_eq!(DecodedValue::Integer(42).to_string(), "42");
        assert_eq!(
            DecodedValue::MultiString(vec!["a".to_string(), "b".to_string()]).to_string(),
            "[a, b]"
        );
        assert_eq!(DecodedValue::MultiString(Vec::new()).to_string(), "[]");
        assert_eq!(DecodedValue::Bytes(12).to_string(), "(12 bytes)");
    }

    #[test]
    fn test_display_name() {
        let value = ValueRecord::new("", ValueType::String, None);
        assert_eq!(value.display_name(), "(default)");

        let value = ValueRecord::new("101", ValueType::String, None);
        assert_eq!(value.display_name(), "101");
    }
}
