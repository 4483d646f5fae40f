//! Field mapping tables translating raw AMCache value names into record
//! attributes.
//!
//! AMCache stores attributes under terse hexadecimal value names. Each
//! table below is a static, ordered list of (value name, field) pairs;
//! the decoder looks values up by exact, case-sensitive name and assigns
//! the decoded scalar to the matching field. Assignment is an exhaustive
//! `match` over the field enums, so the set of assignable fields is fixed
//! at compile time.

use crate::event::{FileEntry, ProgramEntry};
use crate::value::DecodedValue;

/// Attributes of a [`FileEntry`] populated from file reference key values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileField {
    /// Product name the file belongs to.
    ProductName,
    /// Company name that created the product.
    CompanyName,
    /// Language code of the file.
    LanguageCode,
    /// Version of the file.
    FileVersion,
    /// Size of the file in bytes.
    FileSize,
    /// Description of the file.
    FileDescription,
    /// Full path of the file.
    FullPath,
    /// GUID of the owning program entry.
    ProgramIdentifier,
    /// SHA-1 digest of the file.
    Sha1,
}

/// Value name to attribute mapping for file reference keys.
pub const FILE_KEY_FIELDS: &[(&str, FileField)] = &[
    ("0", FileField::ProductName),
    ("1", FileField::CompanyName),
    ("3", FileField::LanguageCode),
    ("5", FileField::FileVersion),
    ("6", FileField::FileSize),
    ("c", FileField::FileDescription),
    ("15", FileField::FullPath),
    ("100", FileField::ProgramIdentifier),
    ("101", FileField::Sha1),
];

/// Attributes of a [`ProgramEntry`] populated from program key values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramField {
    /// Name of the installed program.
    Name,
    /// Version of the program.
    Version,
    /// Publisher of the program.
    Publisher,
    /// Language code of the program.
    LanguageCode,
    /// Type of entry.
    EntryType,
    /// Uninstall registry key of the program.
    UninstallKey,
    /// File paths of the installed program.
    FilePaths,
    /// Product code of the program.
    ProductCode,
    /// Package code of the program.
    PackageCode,
    /// MSI product code of the program.
    MsiProductCode,
    /// MSI package code of the program.
    MsiPackageCode,
    /// Files belonging to the program.
    Files,
}

/// Value name to attribute mapping for program keys.
pub const PROGRAM_KEY_FIELDS: &[(&str, ProgramField)] = &[
    ("0", ProgramField::Name),
    ("1", ProgramField::Version),
    ("2", ProgramField::Publisher),
    ("3", ProgramField::LanguageCode),
    ("6", ProgramField::EntryType),
    ("7", ProgramField::UninstallKey),
    ("d", ProgramField::FilePaths),
    ("f", ProgramField::ProductCode),
    ("10", ProgramField::PackageCode),
    ("11", ProgramField::MsiProductCode),
    ("12", ProgramField::MsiPackageCode),
    ("Files", ProgramField::Files),
];

/// Value holding a file entry's write time (FILETIME).
pub const FILE_ENTRY_WRITE_TIME: &str = "17";

/// Value holding the file creation time (FILETIME).
pub const FILE_CREATION_TIME: &str = "12";

/// Value holding the file modification time (FILETIME).
pub const FILE_MODIFICATION_TIME: &str = "11";

/// Value holding the PE compilation time (POSIX seconds).
pub const FILE_COMPILATION_TIME: &str = "f";

/// Value holding a program's installation time (POSIX seconds).
pub const PROGRAM_INSTALLATION_TIME: &str = "a";

/// Assigns a decoded value to a file entry attribute.
///
/// A decoded value whose type does not match the attribute leaves the
/// field unset, the same treatment as an absent value. SHA-1 text keeps
/// only the 40-character digest: some AMCache versions prepend four zero
/// characters, which are stripped here.
pub fn assign_file_field(entry: &mut FileEntry, field: FileField, value: DecodedValue) {
    match (field, value) {
        (FileField::ProductName, DecodedValue::String(s)) => entry.product_name = Some(s),
        (FileField::CompanyName, DecodedValue::String(s)) => entry.company_name = Some(s),
        (FileField::LanguageCode, DecodedValue::Integer(i)) => entry.language_code = Some(i),
        (FileField::FileVersion, DecodedValue::String(s)) => entry.file_version = Some(s),
        (FileField::FileSize, DecodedValue::Integer(i)) => entry.file_size = Some(i),
        (FileField::FileDescription, DecodedValue::String(s)) => {
            entry.file_description = Some(s)
        }
        (FileField::FullPath, DecodedValue::String(s)) => entry.full_path = Some(s),
        (FileField::ProgramIdentifier, DecodedValue::String(s)) => {
            entry.program_identifier = Some(s)
        }
        (FileField::Sha1, DecodedValue::String(s)) => entry.sha1 = Some(strip_sha1_padding(s)),
        _ => {}
    }
}

/// Assigns a decoded value to a program entry attribute.
///
/// A decoded value whose type does not match the attribute leaves the
/// field unset, the same treatment as an absent value.
pub fn assign_program_field(entry: &mut ProgramEntry, field: ProgramField, value: DecodedValue) {
    match (field, value) {
        (ProgramField::Name, DecodedValue::String(s)) => entry.name = Some(s),
        (ProgramField::Version, DecodedValue::String(s)) => entry.version = Some(s),
        (ProgramField::Publisher, DecodedValue::String(s)) => entry.publisher = Some(s),
        (ProgramField::LanguageCode, DecodedValue::Integer(i)) => {
            entry.language_code = Some(i)
        }
        (ProgramField::EntryType, DecodedValue::String(s)) => entry.entry_type = Some(s),
        (ProgramField::UninstallKey, DecodedValue::String(s)) => entry.uninstall_key = Some(s),
        (ProgramField::FilePaths, DecodedValue::MultiString(v)) => entry.file_paths = Some(v),
        (ProgramField::ProductCode, DecodedValue::String(s)) => entry.product_code = Some(s),
        (ProgramField::PackageCode, DecodedValue::String(s)) => entry.package_code = Some(s),
        (ProgramField::MsiProductCode, DecodedValue::String(s)) => {
            entry.msi_product_code = Some(s)
        }
        (ProgramField::MsiPackageCode, DecodedValue::String(s)) => {
            entry.msi_package_code = Some(s)
        }
        (ProgramField::Files, DecodedValue::MultiString(v)) => entry.files = Some(v),
        _ => {}
    }
}

/// Strips the four-zero prefix some AMCache versions prepend to the SHA-1
/// value.
fn strip_sha1_padding(digest: String) -> String {
    match digest.strip_prefix("0000") {
        Some(stripped) => stripped.to_string(),
        None => digest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(FILE_KEY_FIELDS.len(), 9);
        assert_eq!(PROGRAM_KEY_FIELDS.len(), 12);
    }

    #[test]
    fn test_sha1_padding_stripped() {
        let mut entry = FileEntry::default();
        assign_file_field(
            &mut entry,
            FileField::Sha1,
            DecodedValue::String(format!("0000{}", "ab".repeat(20))),
        );
        assert_eq!(entry.sha1.as_deref(), Some("ab".repeat(20).as_str()));
    }

    #[test]
    fn test_sha1_without_padding_unchanged() {
        let mut entry = FileEntry::default();
        assign_file_field(
            &mut entry,
            FileField::Sha1,
            DecodedValue::String("1234abcd".to_string()),
        );
        assert_eq!(entry.sha1.as_deref(), Some("1234abcd"));
    }

    #[test]
    fn test_type_mismatch_leaves_field_unset() {
        let mut entry = FileEntry::default();
        assign_file_field(
            &mut entry,
            FileField::FileSize,
            DecodedValue::String("not a size".to_string()),
        );
        assert_eq!(entry.file_size, None);

        let mut program = ProgramEntry::default();
        assign_program_field(
            &mut program,
            ProgramField::FilePaths,
            DecodedValue::Integer(7),
        );
        assert_eq!(program.file_paths, None);
    }

    #[test]
    fn test_program_files_assignment() {
        let mut program = ProgramEntry::default();
        assign_program_field(
            &mut program,
            ProgramField::Files,
            DecodedValue::MultiString(vec!["a.exe".to_string(), "b.dll".to_string()]),
        );
        assert_eq!(
            program.files,
            Some(vec!["a.exe".to_string(), "b.dll".to_string()])
        );
    }
}
