//! Registry key nodes as handed over by the external hive reader.

use crate::value::ValueRecord;

/// A single key in a parsed registry tree.
///
/// This is the crate's input contract: an external registry reader owns the
/// hive binary format and produces a fully parsed tree of `KeyNode`s. The
/// decoder only reads it — names, the last written timestamp, values and
/// sub keys, all in hive order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyNode {
    /// Key name.
    pub name: String,

    /// Last written timestamp (Windows FILETIME).
    pub last_written: u64,

    /// Values of this key, in hive order.
    pub values: Vec<ValueRecord>,

    /// Sub keys of this key, in hive order.
    pub subkeys: Vec<KeyNode>,
}

impl KeyNode {
    /// Creates a key node with no values or sub keys.
    ///
    /// # Arguments
    ///
    /// * `name` - Key name
    /// * `last_written` - Last written timestamp as a FILETIME tick count
    pub fn new(name: impl Into<String>, last_written: u64) -> Self {
        Self {
            name: name.into(),
            last_written,
            values: Vec::new(),
            subkeys: Vec::new(),
        }
    }

    /// Looks up a value by exact, case-sensitive name.
    pub fn value(&self, name: &str) -> Option<&ValueRecord> {
        self.values.iter().find(|value| value.name == name)
    }

    /// Looks up a direct sub key by exact, case-sensitive name.
    pub fn subkey(&self, name: &str) -> Option<&KeyNode> {
        self.subkeys.iter().find(|subkey| subkey.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    #[test]
    fn test_value_lookup_is_case_sensitive() {
        let mut key = KeyNode::new("Programs", 0);
        key.values
            .push(ValueRecord::new("f", ValueType::String, None));

        assert!(key.value("f").is_some());
        assert!(key.value("F").is_none());
    }

    #[test]
    fn test_subkey_lookup() {
        let mut key = KeyNode::new("Root", 0);
        key.subkeys.push(KeyNode::new("File", 0));

        assert!(key.subkey("File").is_some());
        assert!(key.subkey("file").is_none());
        assert!(key.subkey("Programs").is_none());
    }
}
