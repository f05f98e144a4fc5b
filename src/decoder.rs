//! Decoder module
//!
//! Turns KLV packets and local sets into [`DecodedSet`]s using the tag
//! registry. A malformed element aborts the whole decode; a checksum mismatch
//! only clears the packet's `valid` flag.

use crate::error::{DecodeError, Result};
use crate::imapb::{ImapB, MAX_IMAPB_LEN};
use crate::protocol::{
    decode_ber_length, decode_ber_oid, read_signed, read_unsigned, split_elements, Element,
    UniversalKey, CHECKSUM_SIZE, CHECKSUM_TAG, KEY_SIZE,
};
use crate::tags::{Encoding, Tag, TagRegistry, TagSet};
use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Local tag of the precision time stamp in ST 0601 and ST 0903
pub const PRECISION_TIME_STAMP_TAG: u32 = 0x02;

/// ST 0601 frame center latitude / longitude
const FRAME_CENTER_LAT_TAG: u32 = 0x17;
const FRAME_CENTER_LON_TAG: u32 = 0x18;
/// ST 0601 offset corner tags, latitude and longitude alternating
const OFFSET_CORNER_TAGS: std::ops::RangeInclusive<u32> = 0x1A..=0x21;

/// A decoded tag value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unsigned integer
    Unsigned(u64),
    /// Signed integer
    Signed(i64),
    /// Real value (IMAPB, linear mappings, timestamps in seconds)
    Real(f64),
    /// Text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Nested local set
    Set(DecodedSet),
    /// Series of local sets
    Series(Vec<DecodedSet>),
}

impl Value {
    /// Numeric value as `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Unsigned(v) => Some(*v as f64),
            Value::Signed(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Unsigned integer value
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            Value::Signed(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Nested set
    pub fn as_set(&self) -> Option<&DecodedSet> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Series of sets
    pub fn as_series(&self) -> Option<&[DecodedSet]> {
        match self {
            Value::Series(s) => Some(s),
            _ => None,
        }
    }
}

/// Decoded local set: (tag, value) entries in wire order
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSet {
    tag_set: TagSet,
    entries: Vec<(Arc<Tag>, Value)>,
    unknown_tags: usize,
}

impl DecodedSet {
    /// Create an empty set
    pub fn new(tag_set: TagSet) -> Self {
        Self {
            tag_set,
            entries: Vec::new(),
            unknown_tags: 0,
        }
    }

    /// Set these entries belong to
    pub fn tag_set(&self) -> TagSet {
        self.tag_set
    }

    /// Append an entry
    pub fn push(&mut self, tag: Arc<Tag>, value: Value) {
        self.entries.push((tag, value));
    }

    /// First value of a local tag
    pub fn get(&self, id: u32) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(tag, _)| tag.id == id)
            .map(|(_, value)| value)
    }

    /// First value of a tag by display name
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(tag, _)| tag.name == name)
            .map(|(_, value)| value)
    }

    /// Whether a local tag is present
    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Entries in wire order
    pub fn entries(&self) -> &[(Arc<Tag>, Value)] {
        &self.entries
    }

    /// Iterate over (tag, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<Tag>, &Value)> {
        self.entries.iter().map(|(tag, value)| (tag, value))
    }

    /// Number of decoded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was decoded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Skipped unregistered tags, nested sets included
    pub fn unknown_tags(&self) -> usize {
        self.unknown_tags
            + self
                .entries
                .iter()
                .map(|(_, value)| match value {
                    Value::Set(set) => set.unknown_tags(),
                    Value::Series(sets) => sets.iter().map(DecodedSet::unknown_tags).sum(),
                    _ => 0,
                })
                .sum::<usize>()
    }

    /// Precision time stamp in seconds since the POSIX epoch
    pub fn precision_time_stamp(&self) -> Option<f64> {
        match self.tag_set {
            TagSet::UasLocalSet | TagSet::VmtiLocalSet => {
                self.get(PRECISION_TIME_STAMP_TAG)?.as_f64()
            }
            _ => None,
        }
    }

    /// Replace the precision time stamp, seconds
    pub fn set_precision_time_stamp(&mut self, seconds: f64) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|(tag, _)| tag.id == PRECISION_TIME_STAMP_TAG)
        {
            Some((_, value)) => {
                *value = Value::Real(seconds);
                true
            }
            None => false,
        }
    }

    fn resolve_offset_corners(&mut self) {
        let lat = self.get(FRAME_CENTER_LAT_TAG).and_then(Value::as_f64);
        let lon = self.get(FRAME_CENTER_LON_TAG).and_then(Value::as_f64);

        for (tag, value) in self.entries.iter_mut() {
            if !OFFSET_CORNER_TAGS.contains(&tag.id) {
                continue;
            }
            // 0x1A, 0x1C, 0x1E, 0x20 are latitudes
            let center = if tag.id % 2 == 0 { lat } else { lon };
            if let (Value::Real(offset), Some(center)) = (value, center) {
                *offset += center;
            }
        }
    }
}

impl Serialize for DecodedSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, value) in &self.entries {
            map.serialize_entry(&tag.name, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Unsigned(v) => serializer.serialize_u64(*v),
            Value::Signed(v) => serializer.serialize_i64(*v),
            Value::Real(v) => serializer.serialize_f64(*v),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
                serializer.serialize_str(&hex)
            }
            Value::Set(set) => set.serialize(serializer),
            Value::Series(sets) => {
                let mut seq = serializer.serialize_seq(Some(sets.len()))?;
                for set in sets {
                    seq.serialize_element(set)?;
                }
                seq.end()
            }
        }
    }
}

/// A decoded standalone packet
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPacket {
    /// Universal label that introduced the packet
    pub designator: UniversalKey,
    /// Decoded local set
    pub set: DecodedSet,
    /// False when the checksum did not match
    pub valid: bool,
    /// Checksum carried by the packet, if any
    pub checksum: Option<u16>,
    /// Bytes consumed: key, length and value
    pub size: usize,
}

impl DecodedPacket {
    /// Precision time stamp in seconds
    pub fn precision_time_stamp(&self) -> Option<f64> {
        self.set.precision_time_stamp()
    }

    /// Precision time stamp as a UTC date
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        let micros = (self.precision_time_stamp()? * 1e6).round() as i64;
        DateTime::from_timestamp_micros(micros)
    }
}

impl Serialize for DecodedPacket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("set", self.set.tag_set().name())?;
        map.serialize_entry("designator", &self.designator.to_string())?;
        map.serialize_entry("valid", &self.valid)?;
        map.serialize_entry("values", &self.set)?;
        map.end()
    }
}

/// Local set decoder
#[derive(Debug, Clone)]
pub struct LocalSetDecoder {
    registry: Arc<TagRegistry>,
    verify_checksum: bool,
    accepted: Vec<UniversalKey>,
}

impl LocalSetDecoder {
    /// Create a decoder accepting every standard designator
    pub fn new(registry: Arc<TagRegistry>) -> Self {
        let accepted = [
            TagSet::UasLocalSet,
            TagSet::SecurityLocalSet,
            TagSet::VmtiLocalSet,
        ]
        .iter()
        .filter_map(TagSet::designator)
        .collect();

        Self {
            registry,
            verify_checksum: true,
            accepted,
        }
    }

    /// Enable or disable checksum verification
    pub fn with_checksum_verification(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    /// Restrict the accepted packet designators
    pub fn with_accepted_designators(mut self, accepted: Vec<UniversalKey>) -> Self {
        self.accepted = accepted;
        self
    }

    /// Registry used for tag lookups
    pub fn registry(&self) -> &Arc<TagRegistry> {
        &self.registry
    }

    /// Whether a packet with this key would be decoded
    pub fn accepts(&self, key: &UniversalKey) -> bool {
        self.accepted.contains(key) && TagSet::from_designator(key).is_some()
    }

    /// Decode one packet: 16-byte key, BER length, local set
    ///
    /// Bytes past the declared length are ignored; [`DecodedPacket::size`]
    /// tells how many were consumed.
    pub fn decode_packet(&self, bytes: &[u8]) -> Result<DecodedPacket> {
        let designator = UniversalKey::from_slice(bytes).ok_or(DecodeError::BufferTooShort {
            needed: KEY_SIZE + 1,
            available: bytes.len(),
        })?;
        let tag_set = TagSet::from_designator(&designator)
            .filter(|_| self.accepted.contains(&designator))
            .ok_or_else(|| DecodeError::UnknownDesignator(designator.to_string()))?;

        let (length, length_size) = decode_ber_length(bytes, KEY_SIZE)?;
        let start = KEY_SIZE + length_size;
        let end = start + length;
        if end > bytes.len() {
            return Err(DecodeError::malformed(
                KEY_SIZE,
                format!(
                    "packet length {} extends past end of buffer ({} bytes left)",
                    length,
                    bytes.len() - start
                ),
            )
            .into());
        }

        let elements = split_elements(&bytes[start..end], start)?;
        let checksum_element = elements
            .iter()
            .rev()
            .find(|e| e.tag_id == CHECKSUM_TAG)
            .cloned();
        let set = self.decode_elements(tag_set, elements)?;

        let mut valid = true;
        let mut checksum = None;
        if let Some(element) = checksum_element {
            if element.value.len() == CHECKSUM_SIZE {
                let stored = u16::from_be_bytes([element.value[0], element.value[1]]);
                checksum = Some(stored);
                if self.verify_checksum {
                    if let Some(computed) = tag_set.checksum().compute(&bytes[..element.offset]) {
                        if computed != stored {
                            warn!(
                                "{} checksum mismatch: packet carries {:#06X}, computed {:#06X}",
                                tag_set, stored, computed
                            );
                            valid = false;
                        }
                    }
                }
            }
        } else {
            trace!("{} packet without checksum element", tag_set);
        }

        Ok(DecodedPacket {
            designator,
            set,
            valid,
            checksum,
            size: end,
        })
    }

    /// Decode the value bytes of a local set
    pub fn decode_local_set(&self, tag_set: TagSet, bytes: &[u8]) -> Result<DecodedSet> {
        self.decode_set_at(tag_set, bytes, 0)
    }

    fn decode_set_at(&self, tag_set: TagSet, bytes: &[u8], base: usize) -> Result<DecodedSet> {
        if tag_set == TagSet::VTargetPack {
            return self.decode_vtarget_pack(bytes, base);
        }
        let elements = split_elements(bytes, base)?;
        self.decode_elements(tag_set, elements)
    }

    /// VTarget packs open with a BER-OID target id, then plain elements
    fn decode_vtarget_pack(&self, bytes: &[u8], base: usize) -> Result<DecodedSet> {
        let (target_id, id_size) = decode_ber_oid(bytes, 0).map_err(|_| {
            DecodeError::malformed(base, "VTarget pack without target id")
        })?;

        let mut set = DecodedSet::new(TagSet::VTargetPack);
        set.push(
            self.registry.lookup(TagSet::VTargetPack, 0),
            Value::Unsigned(target_id as u64),
        );

        let elements = split_elements(&bytes[id_size..], base + id_size)?;
        let rest = self.decode_elements(TagSet::VTargetPack, elements)?;
        set.unknown_tags = rest.unknown_tags;
        set.entries.extend(rest.entries);
        Ok(set)
    }

    fn decode_elements(&self, tag_set: TagSet, elements: Vec<Element>) -> Result<DecodedSet> {
        let mut set = DecodedSet::new(tag_set);

        for element in elements {
            let tag = self.registry.lookup(tag_set, element.tag_id);
            if tag.is_unknown() {
                debug!(
                    "{}: skipping unknown tag {} ({} bytes)",
                    tag_set,
                    element.tag_id,
                    element.value.len()
                );
                set.unknown_tags += 1;
                continue;
            }

            let value = self.decode_value(&tag, &element)?;
            set.push(tag, value);
        }

        if tag_set == TagSet::UasLocalSet {
            set.resolve_offset_corners();
        }
        Ok(set)
    }

    fn decode_value(&self, tag: &Tag, element: &Element) -> Result<Value> {
        let bytes = element.value.as_slice();
        let mismatch = || DecodeError::EncodingMismatch {
            tag_id: tag.id,
            name: tag.name.clone(),
            encoding: tag.encoding.to_string(),
            len: bytes.len(),
        };

        let value = match tag.encoding {
            Encoding::None | Encoding::Binary | Encoding::Unsupported(_) => {
                Value::Bytes(bytes.to_vec())
            }
            Encoding::UInt(n) => {
                if bytes.len() != n {
                    return Err(mismatch().into());
                }
                Value::Unsigned(read_unsigned(bytes).ok_or_else(mismatch)?)
            }
            Encoding::Int(n) => {
                if bytes.len() != n {
                    return Err(mismatch().into());
                }
                Value::Signed(read_signed(bytes).ok_or_else(mismatch)?)
            }
            Encoding::UIntVar => Value::Unsigned(read_unsigned(bytes).ok_or_else(mismatch)?),
            Encoding::IntVar => Value::Signed(read_signed(bytes).ok_or_else(mismatch)?),
            Encoding::Utf8 | Encoding::Ascii => {
                Value::Text(String::from_utf8_lossy(bytes).into_owned())
            }
            Encoding::Utf16 => {
                if bytes.len() % 2 != 0 {
                    return Err(mismatch().into());
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                Value::Text(String::from_utf16_lossy(&units))
            }
            Encoding::ImapB { min, max, .. } => {
                if bytes.is_empty() || bytes.len() > MAX_IMAPB_LEN {
                    return Err(mismatch().into());
                }
                let codec = ImapB::new(min, max, bytes.len())?;
                Value::Real(codec.decode(bytes)?)
            }
            Encoding::Mapped {
                signed,
                len,
                range,
                span,
                offset,
            } => {
                if bytes.len() != len {
                    return Err(mismatch().into());
                }
                let raw = if signed {
                    read_signed(bytes).ok_or_else(mismatch)? as f64
                } else {
                    read_unsigned(bytes).ok_or_else(mismatch)? as f64
                };
                Value::Real(range / span * raw + offset)
            }
            Encoding::PrecisionTimeStamp => {
                if bytes.len() != 8 {
                    return Err(mismatch().into());
                }
                let micros = read_unsigned(bytes).ok_or_else(mismatch)?;
                Value::Real(micros as f64 / 1e6)
            }
            Encoding::Set(TagSet::Unknown) | Encoding::Series(TagSet::Unknown) => {
                Value::Bytes(bytes.to_vec())
            }
            Encoding::Set(nested) => {
                Value::Set(self.decode_set_at(nested, bytes, element.offset)?)
            }
            Encoding::Series(nested) => {
                Value::Series(self.decode_series(nested, bytes, element.offset)?)
            }
        };

        Ok(value)
    }

    /// A series is a run of BER-length-prefixed sets
    fn decode_series(&self, tag_set: TagSet, bytes: &[u8], base: usize) -> Result<Vec<DecodedSet>> {
        let mut sets = Vec::new();
        let mut position = 0;

        while position < bytes.len() {
            let (length, length_size) = decode_ber_length(bytes, position)
                .map_err(|_| DecodeError::malformed(base + position, "truncated series length"))?;
            position += length_size;

            if position + length > bytes.len() {
                return Err(DecodeError::malformed(
                    base + position,
                    format!("series item of {} bytes extends past end of series", length),
                )
                .into());
            }
            sets.push(self.decode_set_at(
                tag_set,
                &bytes[position..position + length],
                base + position,
            )?);
            position += length;
        }

        Ok(sets)
    }
}
