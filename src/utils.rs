//! Utility functions for decoding raw registry value payloads.

use crate::error::{AmcacheError, Result};
use encoding_rs::UTF_16LE;

/// Reads a UTF-16LE string from a raw value payload, trimming null
/// terminators.
///
/// Registry strings are typically null-terminated. This function decodes
/// UTF-16LE data and removes trailing null characters.
///
/// # Errors
///
/// Returns an error if the data length is not even (UTF-16 requires 2-byte
/// units) or if the UTF-16 decoding fails. The error names the value the
/// payload belongs to.
pub fn read_utf16_string(data: &[u8], value_name: &str) -> Result<String> {
    if data.is_empty() {
        return Ok(String::new());
    }

    if data.len() % 2 != 0 {
        return Err(AmcacheError::invalid_utf16(value_name));
    }

    let (decoded, _encoding, had_errors) = UTF_16LE.decode(data);

    if had_errors {
        return Err(AmcacheError::invalid_utf16(value_name));
    }

    Ok(decoded.trim_end_matches('\0').to_string())
}

/// Splits a decoded REG_MULTI_SZ payload into its component strings.
///
/// Multi-string data is a sequence of null-terminated strings with an empty
/// string as terminator; empty components are dropped, so an all-null
/// payload yields an empty list.
pub fn split_multi_string(decoded: &str) -> Vec<String> {
    decoded
        .split('\0')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    #[test]
    fn test_read_utf16_string() {
        let data = utf16le("Hello");
        assert_eq!(read_utf16_string(&data, "0").unwrap(), "Hello");

        // Should trim trailing nulls
        let data_with_null = utf16le("Hello\0\0");
        assert_eq!(read_utf16_string(&data_with_null, "0").unwrap(), "Hello");
    }

    #[test]
    fn test_read_utf16_string_empty() {
        assert_eq!(read_utf16_string(&[], "0").unwrap(), "");
    }

    #[test]
    fn test_read_utf16_string_odd_length() {
        let result = read_utf16_string(&[0x41, 0x00, 0x42], "15");
        assert!(matches!(
            result,
            Err(AmcacheError::InvalidUtf16 { name }) if name == "15"
        ));
    }

    #[test]
    fn test_split_multi_string() {
        assert_eq!(split_multi_string("a\0b\0"), vec!["a", "b"]);
        assert_eq!(split_multi_string("a"), vec!["a"]);
    }

    #[test]
    fn test_split_multi_string_empty() {
        assert!(split_multi_string("").is_empty());
        assert!(split_multi_string("\0\0").is_empty());
    }
}
