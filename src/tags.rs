//! Tag definitions and the tag registry
//!
//! A [`Tag`] describes how to interpret one local tag of one local set:
//! - which set it belongs to ([`TagSet`])
//! - its local id and optional 16-byte universal key
//! - its value [`Encoding`] and engineering units
//!
//! The [`TagRegistry`] owns every tag for its whole lifetime and hands out
//! `Arc<Tag>` handles. Lookups never fail: an unregistered (set, id) pair
//! resolves to the UNKNOWN sentinel.

use crate::protocol::{ChecksumKind, UniversalKey};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Display name of the sentinel tag
pub const UNKNOWN_TAG_NAME: &str = "UNKNOWN TAG";

const UAS_DESIGNATOR: [u8; 16] = [
    0x06, 0x0E, 0x2B, 0x34, 0x02, 0x0B, 0x01, 0x01, 0x0E, 0x01, 0x03, 0x01, 0x01, 0x00, 0x00, 0x00,
];
const SECURITY_DESIGNATOR: [u8; 16] = [
    0x06, 0x0E, 0x2B, 0x34, 0x02, 0x03, 0x01, 0x01, 0x0E, 0x01, 0x03, 0x03, 0x02, 0x00, 0x00, 0x00,
];
const VMTI_DESIGNATOR: [u8; 16] = [
    0x06, 0x0E, 0x2B, 0x34, 0x02, 0x0B, 0x01, 0x01, 0x0E, 0x01, 0x03, 0x03, 0x06, 0x00, 0x00, 0x00,
];

/// Local set a tag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagSet {
    /// MISB ST 0601 UAS Datalink Local Set
    UasLocalSet,
    /// MISB ST 0102 Security Metadata Local Set
    SecurityLocalSet,
    /// MISB ST 0903 Video Moving Target Indicator Local Set
    VmtiLocalSet,
    /// MISB ST 0903 VTarget Pack (series element, no designator)
    VTargetPack,
    /// Sentinel set of the UNKNOWN tag
    Unknown,
}

impl TagSet {
    /// Every set, sentinel included
    pub const ALL: [TagSet; 5] = [
        TagSet::UasLocalSet,
        TagSet::SecurityLocalSet,
        TagSet::VmtiLocalSet,
        TagSet::VTargetPack,
        TagSet::Unknown,
    ];

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            TagSet::UasLocalSet => "UAS Datalink Local Set",
            TagSet::SecurityLocalSet => "Security Metadata Local Set",
            TagSet::VmtiLocalSet => "VMTI Local Set",
            TagSet::VTargetPack => "VTarget Pack",
            TagSet::Unknown => "Unknown",
        }
    }

    /// Defining document
    pub fn standard(&self) -> &'static str {
        match self {
            TagSet::UasLocalSet => "MISB ST 0601",
            TagSet::SecurityLocalSet => "MISB ST 0102",
            TagSet::VmtiLocalSet | TagSet::VTargetPack => "MISB ST 0903",
            TagSet::Unknown => "",
        }
    }

    /// 16-byte universal label introducing a standalone packet of this set
    pub fn designator(&self) -> Option<UniversalKey> {
        match self {
            TagSet::UasLocalSet => Some(UniversalKey(UAS_DESIGNATOR)),
            TagSet::SecurityLocalSet => Some(UniversalKey(SECURITY_DESIGNATOR)),
            TagSet::VmtiLocalSet => Some(UniversalKey(VMTI_DESIGNATOR)),
            TagSet::VTargetPack | TagSet::Unknown => None,
        }
    }

    /// Checksum protecting a standalone packet of this set
    pub fn checksum(&self) -> ChecksumKind {
        match self {
            TagSet::UasLocalSet => ChecksumKind::RunningSum16,
            TagSet::VmtiLocalSet => ChecksumKind::Crc16Ccitt,
            _ => ChecksumKind::None,
        }
    }

    /// Find the set a packet designator introduces
    pub fn from_designator(key: &UniversalKey) -> Option<TagSet> {
        TagSet::ALL
            .iter()
            .copied()
            .find(|set| set.designator().as_ref() == Some(key))
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bit packings not decoded into fields, surfaced as raw bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    /// Defined length pack
    Dlp,
    /// Variable length pack
    Vlp,
    /// Floating length pack
    Flp,
}

/// Coarse classification of an encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingKind {
    /// Raw bytes passthrough
    None,
    /// MISB ST 1201 floating point mapping
    ImapB,
    /// Any other encoding
    Other,
}

/// How a tag's value bytes are interpreted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encoding {
    /// Raw bytes passthrough
    None,
    /// Unsigned big-endian integer of exactly n bytes
    UInt(usize),
    /// Signed big-endian integer of exactly n bytes
    Int(usize),
    /// Unsigned integer of any length from 1 to 8 bytes
    UIntVar,
    /// Signed integer of any length from 1 to 8 bytes
    IntVar,
    /// UTF-8 text
    Utf8,
    /// UTF-16 big-endian text
    Utf16,
    /// ISO 646 (ASCII) text
    Ascii,
    /// Opaque binary value
    Binary,
    /// IMAPB mapping; `len` is the nominal length, the element's own length wins
    ImapB { min: f64, max: f64, len: usize },
    /// ST 0601 linear mapping `(range / span) * int + offset`
    Mapped {
        signed: bool,
        len: usize,
        range: f64,
        span: f64,
        offset: f64,
    },
    /// UINT64 microseconds since the POSIX epoch
    PrecisionTimeStamp,
    /// Nested local set
    Set(TagSet),
    /// Series of BER-length-prefixed local sets
    Series(TagSet),
    /// Bit packing kept as raw bytes
    Unsupported(Packing),
}

impl Encoding {
    /// Coarse kind of this encoding
    pub fn kind(&self) -> EncodingKind {
        match self {
            Encoding::None => EncodingKind::None,
            Encoding::ImapB { .. } => EncodingKind::ImapB,
            _ => EncodingKind::Other,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::None => write!(f, "NONE"),
            Encoding::UInt(n) => write!(f, "UINT{}", n * 8),
            Encoding::Int(n) => write!(f, "INT{}", n * 8),
            Encoding::UIntVar => write!(f, "UINT"),
            Encoding::IntVar => write!(f, "INT"),
            Encoding::Utf8 => write!(f, "UTF8"),
            Encoding::Utf16 => write!(f, "UTF16"),
            Encoding::Ascii => write!(f, "ISO646"),
            Encoding::Binary => write!(f, "BINARY"),
            Encoding::ImapB { min, max, len } => write!(f, "IMAPB({}, {}, {})", min, max, len),
            Encoding::Mapped { signed, len, .. } => {
                write!(f, "{}{} mapped", if *signed { "INT" } else { "UINT" }, len * 8)
            }
            Encoding::PrecisionTimeStamp => write!(f, "UINT64 timestamp"),
            Encoding::Set(set) => write!(f, "SET({})", set),
            Encoding::Series(set) => write!(f, "SERIES({})", set),
            Encoding::Unsupported(packing) => write!(f, "{:?}", packing),
        }
    }
}

/// Decoding metadata of one local tag
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Owning local set
    pub tag_set: TagSet,
    /// Local tag id
    pub id: u32,
    /// 16-byte universal key, when the standard defines one
    pub key: Option<UniversalKey>,
    /// Display name
    pub name: String,
    /// Value encoding
    pub encoding: Encoding,
    /// Engineering units
    pub units: Option<String>,
}

impl Tag {
    /// Create a tag without key or units
    pub fn new(tag_set: TagSet, id: u32, name: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            tag_set,
            id,
            key: None,
            name: name.into(),
            encoding,
            units: None,
        }
    }

    /// Set the universal key
    pub fn with_key(mut self, key: UniversalKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Set the engineering units
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Sentinel returned for unregistered tags
    pub fn unknown(id: u32) -> Self {
        Self::new(TagSet::Unknown, id, UNKNOWN_TAG_NAME, Encoding::None)
    }

    /// Whether this is the sentinel
    pub fn is_unknown(&self) -> bool {
        self.tag_set == TagSet::Unknown
    }
}

/// Thread-safe tag registry, partitioned by tag set
#[derive(Debug, Default)]
pub struct TagRegistry {
    sets: RwLock<HashMap<TagSet, Vec<Arc<Tag>>>>,
}

impl TagRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the ST 0601, 0102 and 0903 catalogs
    pub fn with_standard_catalog() -> Self {
        let registry = Self::new();
        crate::catalog::register_standard_catalog(&registry);
        registry
    }

    /// Append a tag to its set; with duplicate ids the first one registered wins
    pub fn register(&self, tag: Tag) -> Arc<Tag> {
        let tag = Arc::new(tag);
        let mut sets = self.sets.write().unwrap_or_else(|e| e.into_inner());
        sets.entry(tag.tag_set).or_default().push(Arc::clone(&tag));
        tag
    }

    /// Find a tag by set and local id, the UNKNOWN sentinel when absent
    pub fn lookup(&self, tag_set: TagSet, id: u32) -> Arc<Tag> {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        sets.get(&tag_set)
            .and_then(|tags| tags.iter().find(|tag| tag.id == id))
            .cloned()
            .unwrap_or_else(|| Arc::new(Tag::unknown(id)))
    }

    /// Find a tag by universal key across all sets
    pub fn lookup_by_key(&self, key: &UniversalKey) -> Option<Arc<Tag>> {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        TagSet::ALL
            .iter()
            .filter_map(|set| sets.get(set))
            .flat_map(|tags| tags.iter())
            .find(|tag| tag.key.as_ref() == Some(key))
            .cloned()
    }

    /// Tags of one set, in registration order
    pub fn tags(&self, tag_set: TagSet) -> Vec<Arc<Tag>> {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        sets.get(&tag_set).cloned().unwrap_or_default()
    }

    /// Total number of registered tags
    pub fn len(&self) -> usize {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        sets.values().map(Vec::len).sum()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
