//! Encoder module
//!
//! Builds local sets and complete packets. Used to simulate telemetry and to
//! produce test and benchmark input.
//!
//! ```rust
//! use misb_klv::{LocalSetEncoder, TagSet};
//!
//! let mut encoder = LocalSetEncoder::new(TagSet::UasLocalSet);
//! encoder
//!     .add_precision_time_stamp(1_553_622_777_014_894)
//!     .add_unsigned(0x41, 11, 1)
//!     .add_text(0x03, "MISSION 01");
//! let packet = encoder.encode_packet().unwrap();
//! assert_eq!(&packet[..4], &[0x06, 0x0E, 0x2B, 0x34]);
//! ```

use crate::decoder::{Value, PRECISION_TIME_STAMP_TAG};
use crate::error::{KlvError, Result};
use crate::imapb::ImapB;
use crate::protocol::{
    encode_ber_length, encode_ber_oid, ChecksumKind, CHECKSUM_SIZE, CHECKSUM_TAG,
};
use crate::tags::{Encoding, Tag, TagSet};

/// Builder for one local set
#[derive(Debug, Clone)]
pub struct LocalSetEncoder {
    tag_set: TagSet,
    /// Leading BER-OID id of a VTarget pack
    target_id: Option<u32>,
    /// (tag, value) in insertion order
    elements: Vec<(u32, Vec<u8>)>,
}

impl LocalSetEncoder {
    /// Create an empty set
    pub fn new(tag_set: TagSet) -> Self {
        Self {
            tag_set,
            target_id: None,
            elements: Vec::new(),
        }
    }

    /// Create an empty VTarget pack for `target_id`
    pub fn vtarget(target_id: u32) -> Self {
        Self {
            tag_set: TagSet::VTargetPack,
            target_id: Some(target_id),
            elements: Vec::new(),
        }
    }

    /// Set being encoded
    pub fn tag_set(&self) -> TagSet {
        self.tag_set
    }

    /// Add a tag with raw value bytes
    pub fn add_raw(&mut self, id: u32, value: Vec<u8>) -> &mut Self {
        self.elements.push((id, value));
        self
    }

    /// Add an unsigned integer on `len` bytes (big-endian, truncated to fit)
    pub fn add_unsigned(&mut self, id: u32, value: u64, len: usize) -> &mut Self {
        let len = len.clamp(1, 8);
        self.add_raw(id, value.to_be_bytes()[8 - len..].to_vec())
    }

    /// Add a signed integer on `len` bytes (two's complement)
    pub fn add_signed(&mut self, id: u32, value: i64, len: usize) -> &mut Self {
        let len = len.clamp(1, 8);
        self.add_raw(id, value.to_be_bytes()[8 - len..].to_vec())
    }

    /// Add text as UTF-8 bytes
    pub fn add_text(&mut self, id: u32, value: &str) -> &mut Self {
        self.add_raw(id, value.as_bytes().to_vec())
    }

    /// Add an IMAPB encoded real
    pub fn add_imapb(&mut self, id: u32, codec: &ImapB, value: f64) -> &mut Self {
        self.add_raw(id, codec.encode(value))
    }

    /// Add the precision time stamp, microseconds since the POSIX epoch
    pub fn add_precision_time_stamp(&mut self, micros: u64) -> &mut Self {
        self.add_unsigned(PRECISION_TIME_STAMP_TAG, micros, 8)
    }

    /// Add a nested local set
    pub fn add_set(&mut self, id: u32, set: &LocalSetEncoder) -> &mut Self {
        self.add_raw(id, set.encode_local_set())
    }

    /// Add a series of BER-length-prefixed sets
    pub fn add_series(&mut self, id: u32, sets: &[LocalSetEncoder]) -> &mut Self {
        let mut value = Vec::new();
        for set in sets {
            let bytes = set.encode_local_set();
            encode_ber_length(bytes.len(), &mut value);
            value.extend(bytes);
        }
        self.add_raw(id, value)
    }

    /// Add a value using the tag's encoding
    pub fn add_value(&mut self, tag: &Tag, value: &Value) -> Result<&mut Self> {
        let bytes = encode_value(tag, value)?;
        Ok(self.add_raw(tag.id, bytes))
    }

    /// Number of elements added
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been added
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Encode the set body, without key, length or checksum
    pub fn encode_local_set(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if let Some(target_id) = self.target_id {
            encode_ber_oid(target_id, &mut out);
        }

        let skip_checksum = self.tag_set.checksum() != ChecksumKind::None;
        for (id, value) in &self.elements {
            // checksum is appended by encode_packet
            if skip_checksum && *id == CHECKSUM_TAG {
                continue;
            }
            encode_ber_oid(*id, &mut out);
            encode_ber_length(value.len(), &mut out);
            out.extend_from_slice(value);
        }
        out
    }

    /// Encode a standalone packet: designator, BER length, set, checksum
    pub fn encode_packet(&self) -> Result<Vec<u8>> {
        let designator = self.tag_set.designator().ok_or_else(|| {
            KlvError::InvalidParameter(format!("{} has no packet designator", self.tag_set))
        })?;
        let kind = self.tag_set.checksum();
        let has_checksum = kind != ChecksumKind::None;

        let body = self.encode_local_set();
        let length = if has_checksum {
            body.len() + 2 + CHECKSUM_SIZE
        } else {
            body.len()
        };

        let mut packet = designator.0.to_vec();
        encode_ber_length(length, &mut packet);
        packet.extend(body);

        if has_checksum {
            packet.push(CHECKSUM_TAG as u8);
            packet.push(CHECKSUM_SIZE as u8);
            if let Some(checksum) = kind.compute(&packet) {
                packet.extend_from_slice(&checksum.to_be_bytes());
            }
        }
        Ok(packet)
    }
}

fn encode_value(tag: &Tag, value: &Value) -> Result<Vec<u8>> {
    let unsupported = || {
        KlvError::InvalidParameter(format!(
            "cannot encode {:?} as {} for tag {} ({})",
            value, tag.encoding, tag.id, tag.name
        ))
    };

    let bytes = match (tag.encoding, value) {
        (Encoding::UInt(n), _) => {
            let v = value.as_u64().ok_or_else(unsupported)?;
            be_bytes(v, n)
        }
        (Encoding::Int(n), Value::Signed(v)) => be_bytes(*v as u64, n),
        (Encoding::Int(n), Value::Unsigned(v)) => be_bytes(*v, n),
        (Encoding::UIntVar, _) => {
            let v = value.as_u64().ok_or_else(unsupported)?;
            be_bytes(v, min_unsigned_len(v))
        }
        (Encoding::IntVar, Value::Signed(v)) => be_bytes(*v as u64, min_signed_len(*v)),
        (Encoding::Utf8 | Encoding::Ascii, Value::Text(s)) => s.as_bytes().to_vec(),
        (Encoding::Utf16, Value::Text(s)) => s.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        (Encoding::ImapB { min, max, len }, _) => {
            let v = value.as_f64().ok_or_else(unsupported)?;
            ImapB::new(min, max, len)?.encode(v)
        }
        (
            Encoding::Mapped {
                signed,
                len,
                range,
                span,
                offset,
            },
            _,
        ) => {
            let v = value.as_f64().ok_or_else(unsupported)?;
            let raw = ((v - offset) * span / range).round();
            let bits = 8 * len.clamp(1, 8) as u32;
            if signed {
                // the most negative code is reserved as an error marker
                let limit = i64::MAX >> (64 - bits);
                be_bytes((raw as i64).clamp(-limit, limit) as u64, len)
            } else {
                let limit = u64::MAX >> (64 - bits);
                be_bytes((raw.max(0.0) as u64).min(limit), len)
            }
        }
        (Encoding::PrecisionTimeStamp, _) => {
            let seconds = value.as_f64().ok_or_else(unsupported)?;
            be_bytes((seconds * 1e6).round() as u64, 8)
        }
        (_, Value::Bytes(bytes)) => bytes.clone(),
        _ => return Err(unsupported()),
    };

    Ok(bytes)
}

fn be_bytes(value: u64, len: usize) -> Vec<u8> {
    let len = len.clamp(1, 8);
    value.to_be_bytes()[8 - len..].to_vec()
}

fn min_unsigned_len(value: u64) -> usize {
    (((64 - value.leading_zeros() as usize) + 7) / 8).max(1)
}

fn min_signed_len(value: i64) -> usize {
    (1..=8)
        .find(|&len| {
            let bits = 8 * len as u32;
            bits == 64 || (value >= -(1i64 << (bits - 1)) && value < (1i64 << (bits - 1)))
        })
        .unwrap_or(8)
}
