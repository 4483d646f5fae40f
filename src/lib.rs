//! # AMCache Artifact Decoder
//!
//! Decodes a parsed Windows AMCache.hve registry tree into a normalized,
//! timestamped event stream for incident timeline reconstruction.
//!
//! ## Features
//!
//! - **Streaming output**: events and warnings are pushed to a caller
//!   supplied sink in traversal order, never buffered or reordered
//! - **Graceful degradation**: a fault at one value or key never prevents
//!   sibling keys or values from being processed
//! - **Type-safe records**: fixed field enumerations per record shape, so
//!   every mappable attribute is known at compile time
//! - **Deterministic**: re-running on an unmodified tree produces an
//!   identical event sequence
//!
//! ## Architecture
//!
//! The decoder is built on several layers:
//!
//! 1. **Input tree** ([`KeyNode`]/[`ValueRecord`]): the already-parsed
//!    registry tree handed over by an external hive reader
//! 2. **Value decoding** ([`DecodedValue`]): typed payload decoding per
//!    registry value type tag
//! 3. **Field mapping** (`mapping`): static tables translating raw value
//!    names (hex digit strings) into record attributes
//! 4. **Tree walking** ([`AmcacheDecoder`]): depth-first pre-order
//!    traversal emitting generic key-visit events everywhere, plus
//!    specialized file and program entry events under `Root\File` and
//!    `Root\Programs`
//!
//! ## Event stream
//!
//! Every visited key yields one generic event timestamped with the key's
//! last written time. File reference keys yield up to four additional
//! events (entry write, creation, modification, compilation time) and
//! program keys one (installation time), each sharing one decoded record.
//!
//! ## Examples
//!
//! ```
//! use amcache_parser::{AmcacheDecoder, EventCollector, KeyNode, ValueRecord, ValueType};
//!
//! // The tree as handed over by the external hive reader.
//! let mut root = KeyNode::new("Root", 131_277_024_000_000_000);
//! root.values.push(ValueRecord::new(
//!     "a",
//!     ValueType::Dword,
//!     Some(vec![1, 0, 0, 0]),
//! ));
//!
//! let mut hive_root = KeyNode::new("{amcache}", 0);
//! hive_root.subkeys.push(root);
//!
//! let decoder = AmcacheDecoder::new();
//! let mut sink = EventCollector::new();
//! decoder.decode(&hive_root, &mut sink);
//!
//! for event in &sink.events {
//!     println!(
//!         "{} [{}] {}",
//!         event.timestamp,
//!         event.description,
//!         event.data.data_type()
//!     );
//! }
//! # assert_eq!(sink.events.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decoder;
pub mod error;
pub mod event;
pub mod format;
pub mod key;
pub mod mapping;
pub mod sink;
pub mod timestamp;
pub mod utils;
pub mod value;

// Re-export main types for convenience
pub use decoder::AmcacheDecoder;
pub use error::{AmcacheError, Result};
pub use event::{EventData, FileEntry, KeyVisit, ProgramEntry, TimestampedEvent};
pub use key::KeyNode;
pub use sink::{EventCollector, EventSink};
pub use timestamp::TimestampDescription;
pub use value::{DecodedValue, ValueRecord, ValueType};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
