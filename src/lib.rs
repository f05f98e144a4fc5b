//! # MISB KLV - STANAG 4609 metadata decoding
//!
//! Decoder for the KLV metadata multiplexed into UAS motion imagery streams.
//!
//! ## Key Features
//!
//! - **Local sets**: MISB ST 0601 UAS Datalink, ST 0102 Security, ST 0903 VMTI
//! - **IMAPB**: MISB ST 1201 floating point mapping
//! - **Playback clock**: recorded time stamps replayed on wall-clock time
//! - **Synchronization**: telemetry bound to video presentation time stamps
//!
//! ## Quick Start
//!
//! ```rust
//! use misb_klv::{LocalSetDecoder, LocalSetEncoder, TagRegistry, TagSet};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TagRegistry::with_standard_catalog());
//! let decoder = LocalSetDecoder::new(Arc::clone(&registry));
//!
//! // Build a packet
//! let mut encoder = LocalSetEncoder::new(TagSet::UasLocalSet);
//! encoder.add_precision_time_stamp(1_553_622_777_014_894);
//! let packet = encoder.encode_packet().unwrap();
//!
//! // Decode it
//! let decoded = decoder.decode_packet(&packet).unwrap();
//! assert!(decoded.valid);
//! assert!((decoded.precision_time_stamp().unwrap() - 1_553_622_777.014_894).abs() < 1e-6);
//! ```
//!
//! ## Modules
//!
//! - [`protocol`]: BER lengths, BER-OID tags, universal keys, checksums
//! - [`imapb`]: IMAPB codec
//! - [`tags`]: Tag definitions and registry
//! - [`catalog`]: Standard tag catalogs
//! - [`decoder`]: Local set and packet decoding
//! - [`encoder`]: Local set and packet encoding
//! - [`clock`]: Playback clock
//! - [`sync`]: Telemetry / video synchronization
//! - [`pipeline`]: Decoding and synchronization for one stream
//! - [`reader`]: Packet splitting of raw byte streams
//! - [`metrics`]: Decode statistics

// Modules
pub mod catalog;
pub mod clock;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod imapb;
pub mod metrics;
pub mod pipeline;
pub mod protocol;
pub mod reader;
pub mod sync;
pub mod tags;

// Re-exports for convenient access
pub use clock::{ClockState, SharedClock, SimulationClock};
pub use config::PipelineConfig;
pub use decoder::{DecodedPacket, DecodedSet, LocalSetDecoder, Value};
pub use encoder::LocalSetEncoder;
pub use error::{ConfigError, DecodeError, KlvError, Result};
pub use imapb::ImapB;
pub use metrics::DecodeMetrics;
pub use pipeline::{PipelineOutput, SyncListener, TelemetryPipeline};
pub use protocol::{ChecksumKind, UniversalKey};
pub use reader::PacketReader;
pub use sync::{StreamSynchronizer, SyncConfig, SyncState, SyncTime, TelemetrySample};
pub use tags::{Encoding, EncodingKind, Packing, Tag, TagRegistry, TagSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
