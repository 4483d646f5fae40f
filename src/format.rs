//! Human-readable rendering of a key's values for generic registry events.

use crate::key::KeyNode;
use crate::sink::EventSink;
use std::collections::BTreeMap;

/// Renders a key's values as a deterministic summary string.
///
/// Values named in `names_to_skip` (case-insensitive) are left out. The
/// default value renders as `(default)`, a null payload as `(empty)`,
/// multi-strings as `[a, b]` (an empty list as `[]`), string and integer
/// types as their text form, and opaque payloads as `(N bytes)`. Entries
/// are `name: value` pairs joined by single spaces, sorted lexically by
/// value name regardless of hive order.
///
/// Returns `None` when the key has no representable values. A value whose
/// payload fails to decode is reported to the sink as a warning and left
/// out of the summary.
pub fn values_summary<S: EventSink + ?Sized>(
    key: &KeyNode,
    names_to_skip: &[&str],
    sink: &mut S,
) -> Option<String> {
    let names_to_skip: Vec<String> = names_to_skip
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();

    let mut entries = BTreeMap::new();
    for value in &key.values {
        let display_name = value.display_name();
        if names_to_skip.contains(&display_name.to_ascii_lowercase()) {
            continue;
        }

        let rendered = if value.data.is_none() {
            "(empty)".to_string()
        } else {
            match value.decode() {
                Ok(decoded) => decoded.to_string(),
                Err(error) => {
                    sink.produce_warning(format!(
                        "Unable to read data from value: {} with error: {}",
                        display_name, error
                    ));
                    continue;
                }
            }
        };

        entries.insert(display_name.to_string(), rendered);
    }

    if entries.is_empty() {
        return None;
    }

    Some(
        entries
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join(" "),
    )
}
