//! AMCache tree traversal and event production.
//!
//! The walker visits every key of the parsed tree depth-first in pre-order
//! and emits a generic key-visit event per key. Keys directly under
//! `Root\File` (two levels down, one per file reference) and `Root\Programs`
//! (one level down, one per program) additionally produce specialized
//! records with one event per timestamp field present.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::event::{EventData, FileEntry, KeyVisit, ProgramEntry, TimestampedEvent};
use crate::format::values_summary;
use crate::key::KeyNode;
use crate::mapping::{
    assign_file_field, assign_program_field, FILE_COMPILATION_TIME, FILE_CREATION_TIME,
    FILE_ENTRY_WRITE_TIME, FILE_KEY_FIELDS, FILE_MODIFICATION_TIME, PROGRAM_INSTALLATION_TIME,
    PROGRAM_KEY_FIELDS,
};
use crate::sink::EventSink;
use crate::timestamp::{filetime_to_datetime, posix_to_datetime, TimestampDescription};
use crate::value::DecodedValue;

/// Name of the key anchoring all AMCache content.
const ROOT_KEY_NAME: &str = "Root";

/// First-level key holding per-volume file reference entries.
const FILE_KEY_NAME: &str = "File";

/// First-level key holding installed program entries.
const PROGRAMS_KEY_NAME: &str = "Programs";

/// Decoder for parsed AMCache.hve registry trees.
///
/// A decoder is stateless and reusable: each call to
/// [`decode`](Self::decode) walks one artifact tree with its own fresh
/// path stack and streams events into the caller's sink. Running
/// independent trees on separate threads needs no coordination.
#[derive(Debug, Default)]
pub struct AmcacheDecoder;

impl AmcacheDecoder {
    /// Creates a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decodes one parsed AMCache tree, streaming events into the sink.
    ///
    /// `hive_root` is the hive's root key as produced by the external
    /// registry reader; the AMCache content is expected under its `Root`
    /// sub key. A missing `Root` key produces a single warning and no
    /// events. Decode faults at individual values produce warnings and
    /// never stop the traversal.
    #[instrument(skip_all)]
    pub fn decode<S: EventSink + ?Sized>(&self, hive_root: &KeyNode, sink: &mut S) {
        let Some(root_key) = hive_root.subkey(ROOT_KEY_NAME) else {
            warn!("root key missing from hive tree");
            sink.produce_warning("Root key missing from AMCache.hve file.".to_string());
            return;
        };

        self.decode_root_key(root_key, sink);
    }

    /// Walks the `Root` key: generic events for the whole tree first,
    /// then the specialized `File` and `Programs` passes per first-level
    /// sub key.
    fn decode_root_key<S: EventSink + ?Sized>(&self, root_key: &KeyNode, sink: &mut S) {
        self.produce_key_visit_event(root_key, "\\Root", sink);

        let mut segments = vec![String::new(), ROOT_KEY_NAME.to_string()];
        for subkey in &root_key.subkeys {
            segments.push(subkey.name.clone());
            self.decode_subkey(subkey, &mut segments, sink);
            segments.pop();

            if subkey.name == FILE_KEY_NAME {
                self.decode_file_key(subkey, sink);
            } else if subkey.name == PROGRAMS_KEY_NAME {
                self.decode_programs_key(subkey, sink);
            }
        }
    }

    /// Depth-first pre-order walk emitting a generic event for every key.
    fn decode_subkey<S: EventSink + ?Sized>(
        &self,
        key: &KeyNode,
        segments: &mut Vec<String>,
        sink: &mut S,
    ) {
        let key_path = segments.join("\\");
        self.produce_key_visit_event(key, &key_path, sink);

        for subkey in &key.subkeys {
            segments.push(subkey.name.clone());
            self.decode_subkey(subkey, segments, sink);
            segments.pop();
        }
    }

    /// Emits the generic key-visit event for one key, timestamped with the
    /// key's last written time.
    fn produce_key_visit_event<S: EventSink + ?Sized>(
        &self,
        key: &KeyNode,
        key_path: &str,
        sink: &mut S,
    ) {
        debug!(key_path = %key_path, "visiting key");

        let values = values_summary(key, &[], sink);
        let data = EventData::KeyVisit(KeyVisit {
            key_path: key_path.to_string(),
            values,
        });

        let Some(timestamp) = filetime_to_datetime(key.last_written) else {
            sink.produce_warning(format!(
                "Last written time out of range for key: {}",
                key_path
            ));
            return;
        };

        sink.produce_event(TimestampedEvent {
            timestamp,
            description: TimestampDescription::Written,
            data,
        });
    }

    /// Decodes the `Root\File` key: its sub keys are volumes, their sub
    /// keys are file reference entries.
    fn decode_file_key<S: EventSink + ?Sized>(&self, file_key: &KeyNode, sink: &mut S) {
        for volume_key in &file_key.subkeys {
            for file_reference_key in &volume_key.subkeys {
                self.decode_file_reference_key(file_reference_key, sink);
            }
        }
    }

    /// Decodes one file reference key into a [`FileEntry`] record and up
    /// to four timestamped events, one per timestamp value present.
    fn decode_file_reference_key<S: EventSink + ?Sized>(&self, key: &KeyNode, sink: &mut S) {
        let mut entry = FileEntry {
            file_reference: decode_file_reference(&key.name),
            ..FileEntry::default()
        };

        for &(value_name, field) in FILE_KEY_FIELDS {
            let Some(value) = key.value(value_name) else {
                continue;
            };
            match value.decode() {
                Ok(decoded) => assign_file_field(&mut entry, field, decoded),
                Err(error) => sink.produce_warning(format!(
                    "Unable to read data from value: {} with error: {}",
                    value_name, error
                )),
            }
        }

        let data = EventData::File(entry);
        self.produce_time_event(
            key,
            FILE_ENTRY_WRITE_TIME,
            TimestampDescription::Modification,
            filetime_to_datetime,
            &data,
            sink,
        );
        self.produce_time_event(
            key,
            FILE_CREATION_TIME,
            TimestampDescription::Creation,
            filetime_to_datetime,
            &data,
            sink,
        );
        self.produce_time_event(
            key,
            FILE_MODIFICATION_TIME,
            TimestampDescription::Modification,
            filetime_to_datetime,
            &data,
            sink,
        );
        self.produce_time_event(
            key,
            FILE_COMPILATION_TIME,
            TimestampDescription::Change,
            posix_to_datetime,
            &data,
            sink,
        );
    }

    /// Decodes the `Root\Programs` key: each sub key is one program entry.
    fn decode_programs_key<S: EventSink + ?Sized>(&self, programs_key: &KeyNode, sink: &mut S) {
        for program_key in &programs_key.subkeys {
            self.decode_program_key(program_key, sink);
        }
    }

    /// Decodes one program key into a [`ProgramEntry`] record and one
    /// installation event, emitted only when the installation time value
    /// is present.
    fn decode_program_key<S: EventSink + ?Sized>(&self, key: &KeyNode, sink: &mut S) {
        let mut entry = ProgramEntry::default();

        for &(value_name, field) in PROGRAM_KEY_FIELDS {
            let Some(value) = key.value(value_name) else {
                continue;
            };
            match value.decode() {
                Ok(decoded) => assign_program_field(&mut entry, field, decoded),
                Err(error) => sink.produce_warning(format!(
                    "Unable to read data from value: {} with error: {}",
                    value_name, error
                )),
            }
        }

        let data = EventData::Program(entry);
        self.produce_time_event(
            key,
            PROGRAM_INSTALLATION_TIME,
            TimestampDescription::Installation,
            posix_to_datetime,
            &data,
            sink,
        );
    }

    /// Emits one timestamped event for the named timestamp value, if the
    /// value is present and decodes to an integer in the clock's range.
    fn produce_time_event<S: EventSink + ?Sized>(
        &self,
        key: &KeyNode,
        value_name: &str,
        description: TimestampDescription,
        convert: fn(u64) -> Option<DateTime<Utc>>,
        data: &EventData,
        sink: &mut S,
    ) {
        let Some(value) = key.value(value_name) else {
            return;
        };

        let counter = match value.decode() {
            Ok(DecodedValue::Integer(counter)) => counter,
            Ok(_) => return,
            Err(error) => {
                sink.produce_warning(format!(
                    "Unable to read data from value: {} with error: {}",
                    value_name, error
                ));
                return;
            }
        };

        let Some(timestamp) = convert(counter) else {
            sink.produce_warning(format!("Timestamp out of range in value: {}", value_name));
            return;
        };

        sink.produce_event(TimestampedEvent {
            timestamp,
            description,
            data: data.clone(),
        });
    }
}

/// Decodes a file reference key name into its display form.
///
/// NTFS references embed a sequence number and an MFT entry around a
/// `0000` separator, decoded as `{entry}-{sequence}` in decimal; FAT
/// references are a single hexadecimal number, decoded to decimal text.
/// Unparseable names yield `None`.
fn decode_file_reference(name: &str) -> Option<String> {
    match name.split_once("0000") {
        Some((sequence, entry)) => {
            let entry = u64::from_str_radix(entry, 16).ok()?;
            let sequence = u64::from_str_radix(sequence, 16).ok()?;
            Some(format!("{}-{}", entry, sequence))
        }
        None => {
            let reference = u64::from_str_radix(name, 16).ok()?;
            Some(reference.to_string())
        }
    }
}
