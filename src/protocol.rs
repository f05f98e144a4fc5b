//! Wire format primitives for KLV
//!
//! This module defines the low level pieces shared by the decoder and encoder:
//! - BER short/long form lengths
//! - BER-OID local tag identifiers
//! - 16-byte universal keys (designators)
//! - Packet checksums

use crate::error::{ConfigError, DecodeError};
use crc::{Crc, CRC_16_IBM_3740};
use std::fmt;

/// Size of a SMPTE universal key in bytes
pub const KEY_SIZE: usize = 16;

/// Local tag id of the checksum element in every MISB local set
pub const CHECKSUM_TAG: u32 = 0x01;

/// Size of the checksum value in bytes
pub const CHECKSUM_SIZE: usize = 2;

/// CRC-16-CCITT (poly 0x1021, init 0xFFFF)
const CRC16_CCITT: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// 16-byte SMPTE ST 336 universal key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniversalKey(pub [u8; KEY_SIZE]);

impl UniversalKey {
    /// Parse a key from the hex notation used by the MISB documents,
    /// e.g. `"06 0E 2B 34 02 0B 01 01 0E 01 03 01 01 00 00 00"`
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let digits: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.')
            .collect();
        if !digits.is_ascii() || digits.len() != KEY_SIZE * 2 {
            return Err(ConfigError::InvalidDesignator(text.to_string()));
        }

        let mut key = [0u8; KEY_SIZE];
        for (i, byte) in key.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&digits[2 * i..2 * i + 2], 16)
                .map_err(|_| ConfigError::InvalidDesignator(text.to_string()))?;
        }
        Ok(Self(key))
    }

    /// Take the key from the head of a buffer
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let head: [u8; KEY_SIZE] = bytes.get(..KEY_SIZE)?.try_into().ok()?;
        Some(Self(head))
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Display for UniversalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Checksum algorithm protecting a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumKind {
    /// No checksum element
    #[default]
    None,
    /// 16-bit running sum, even bytes in the high octet (MISB ST 0601)
    RunningSum16,
    /// CRC-16-CCITT (MISB ST 0903 standalone packets)
    Crc16Ccitt,
}

impl ChecksumKind {
    /// Compute the checksum over `data`
    ///
    /// `data` spans the packet from the first key byte up to and including
    /// the checksum element's tag and length bytes.
    pub fn compute(&self, data: &[u8]) -> Option<u16> {
        match self {
            ChecksumKind::None => None,
            ChecksumKind::RunningSum16 => Some(running_sum16(data)),
            ChecksumKind::Crc16Ccitt => Some(CRC16_CCITT.checksum(data)),
        }
    }
}

/// MISB ST 0601 running 16-bit checksum
pub fn running_sum16(data: &[u8]) -> u16 {
    data.iter().enumerate().fold(0u16, |sum, (i, &byte)| {
        sum.wrapping_add((byte as u16) << (8 * ((i + 1) % 2)))
    })
}

/// Decode a BER length at `offset`, returning (length, bytes consumed)
pub fn decode_ber_length(buffer: &[u8], offset: usize) -> Result<(usize, usize), DecodeError> {
    let first = *buffer.get(offset).ok_or(DecodeError::BufferTooShort {
        needed: offset + 1,
        available: buffer.len(),
    })?;

    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let num_bytes = (first & 0x7F) as usize;
    if num_bytes == 0 || num_bytes > std::mem::size_of::<u32>() {
        return Err(DecodeError::malformed(
            offset,
            format!("unsupported BER long form with {} length bytes", num_bytes),
        ));
    }
    if offset + 1 + num_bytes > buffer.len() {
        return Err(DecodeError::BufferTooShort {
            needed: offset + 1 + num_bytes,
            available: buffer.len(),
        });
    }

    let length = buffer[offset + 1..offset + 1 + num_bytes]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    Ok((length, 1 + num_bytes))
}

/// Encode a length in BER short form when possible, long form otherwise
pub fn encode_ber_length(length: usize, out: &mut Vec<u8>) {
    if length < 0x80 {
        out.push(length as u8);
        return;
    }

    let bytes = (length as u64).to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

/// Decode a BER-OID value at `offset`, returning (value, bytes consumed)
///
/// Single byte for values below 128, which is the plain one-byte local tag.
pub fn decode_ber_oid(buffer: &[u8], offset: usize) -> Result<(u32, usize), DecodeError> {
    let mut value: u32 = 0;
    let mut consumed = 0;

    loop {
        let byte = *buffer.get(offset + consumed).ok_or(DecodeError::BufferTooShort {
            needed: offset + consumed + 1,
            available: buffer.len(),
        })?;
        consumed += 1;

        if consumed > 4 {
            return Err(DecodeError::malformed(offset, "BER-OID value too long"));
        }

        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok((value, consumed));
        }
    }
}

/// Encode a BER-OID value
pub fn encode_ber_oid(mut value: u32, out: &mut Vec<u8>) {
    let mut groups = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        groups.push(((value & 0x7F) as u8) | 0x80);
        value >>= 7;
    }
    out.extend(groups.iter().rev());
}

/// Big-endian unsigned integer of up to 8 bytes
pub fn read_unsigned(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    Some(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

/// Big-endian two's complement integer of up to 8 bytes
pub fn read_signed(bytes: &[u8]) -> Option<i64> {
    let raw = read_unsigned(bytes)?;
    let shift = 64 - 8 * bytes.len() as u32;
    Some(((raw << shift) as i64) >> shift)
}

/// One raw (tag, value) element as found in a local set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Local tag id
    pub tag_id: u32,
    /// Offset of the value within the buffer being parsed
    pub offset: usize,
    /// Encoded value
    pub value: Vec<u8>,
}

/// Split a local set into its raw elements
///
/// `base` is added to every reported offset so that errors and checksums can
/// refer to positions in the enclosing packet.
pub fn split_elements(buffer: &[u8], base: usize) -> Result<Vec<Element>, DecodeError> {
    let mut elements = Vec::new();
    let mut position = 0;

    while position < buffer.len() {
        let (tag_id, tag_len) = decode_ber_oid(buffer, position)
            .map_err(|e| relocate(e, base))?;
        position += tag_len;

        let (length, length_len) = decode_ber_length(buffer, position)
            .map_err(|e| relocate(e, base))?;
        position += length_len;

        if position + length > buffer.len() {
            return Err(DecodeError::malformed(
                base + position,
                format!(
                    "tag {} length {} extends past end of buffer ({} bytes left)",
                    tag_id,
                    length,
                    buffer.len() - position
                ),
            ));
        }

        elements.push(Element {
            tag_id,
            offset: base + position,
            value: buffer[position..position + length].to_vec(),
        });
        position += length;
    }

    Ok(elements)
}

fn relocate(err: DecodeError, base: usize) -> DecodeError {
    match err {
        DecodeError::MalformedRecord { offset, reason } => DecodeError::MalformedRecord {
            offset: base + offset,
            reason,
        },
        DecodeError::BufferTooShort { needed, available } => DecodeError::malformed(
            base + available,
            format!("truncated element, {} more bytes needed", needed - available),
        ),
        other => other,
    }
}
