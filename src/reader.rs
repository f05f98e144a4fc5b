//! Packet reader
//!
//! Splits a raw byte stream of concatenated KLV packets into complete packets
//! (16-byte key, BER length, value). Bytes that do not start a SMPTE universal
//! label are skipped and counted.

use crate::error::{DecodeError, KlvError, Result};
use crate::protocol::{decode_ber_length, KEY_SIZE};
use log::debug;
use std::io::{ErrorKind, Read};

/// First four bytes of every SMPTE universal label
pub const SMPTE_UL_PREFIX: [u8; 4] = [0x06, 0x0E, 0x2B, 0x34];

const CHUNK_SIZE: usize = 4096;

/// Iterator over the packets of a byte stream
#[derive(Debug)]
pub struct PacketReader<R: Read> {
    inner: R,
    buffer: Vec<u8>,
    /// Stream offset of `buffer[0]`
    position: u64,
    eof: bool,
    done: bool,
    skipped_bytes: u64,
    packets: u64,
}

impl<R: Read> PacketReader<R> {
    /// Wrap a byte source
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(CHUNK_SIZE),
            position: 0,
            eof: false,
            done: false,
            skipped_bytes: 0,
            packets: 0,
        }
    }

    /// Bytes skipped while looking for a key
    pub fn skipped_bytes(&self) -> u64 {
        self.skipped_bytes
    }

    /// Packets returned so far
    pub fn packets(&self) -> u64 {
        self.packets
    }

    /// Read the next complete packet, `None` at a clean end of stream
    pub fn next_packet(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            if !self.sync_to_key()? {
                return Ok(None);
            }

            let (length, length_size) = match decode_ber_length(&self.buffer, KEY_SIZE) {
                Ok(parsed) => parsed,
                Err(DecodeError::BufferTooShort { .. }) => {
                    if !self.fill()? {
                        return Err(self.truncated());
                    }
                    continue;
                }
                Err(err) => {
                    // not a packet after all, resync one byte further
                    debug!("bad length after key at offset {}: {}", self.position, err);
                    self.skip(1);
                    continue;
                }
            };

            let total = KEY_SIZE + length_size + length;
            let mut complete = true;
            while self.buffer.len() < total {
                if !self.fill()? {
                    complete = false;
                    break;
                }
            }
            if !complete {
                // a length that overruns the stream is corrupt when another key follows
                if self.skip_to_next_key(length) {
                    continue;
                }
                return Err(self.truncated());
            }

            let packet: Vec<u8> = self.buffer.drain(..total).collect();
            self.position += total as u64;
            self.packets += 1;
            return Ok(Some(packet));
        }
    }

    /// Drop bytes until the buffer starts with a universal label prefix
    fn sync_to_key(&mut self) -> Result<bool> {
        loop {
            if let Some(start) = self
                .buffer
                .windows(SMPTE_UL_PREFIX.len())
                .position(|w| w == SMPTE_UL_PREFIX)
            {
                self.skip(start);
                return Ok(true);
            }

            // keep a possible partial prefix at the tail
            let keep = (SMPTE_UL_PREFIX.len() - 1).min(self.buffer.len());
            let drop = self.buffer.len() - keep;
            self.skip(drop);

            if !self.fill()? {
                let rest = self.buffer.len();
                self.skip(rest);
                return Ok(false);
            }
        }
    }

    /// Read one more chunk; false at end of stream
    fn fill(&mut self) -> Result<bool> {
        if self.eof {
            return Ok(false);
        }
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(false);
                }
                Ok(n) => {
                    self.buffer.extend_from_slice(&chunk[..n]);
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Drop the current key and everything up to the next buffered key
    fn skip_to_next_key(&mut self, length: usize) -> bool {
        let next = self.buffer[1..]
            .windows(SMPTE_UL_PREFIX.len())
            .position(|w| w == SMPTE_UL_PREFIX);
        match next {
            Some(start) => {
                debug!(
                    "length {} at offset {} overruns the stream, resyncing {} bytes further",
                    length,
                    self.position,
                    start + 1
                );
                self.skip(start + 1);
                true
            }
            None => false,
        }
    }

    fn skip(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.buffer.drain(..count);
        self.position += count as u64;
        self.skipped_bytes += count as u64;
    }

    fn truncated(&self) -> KlvError {
        let eof = std::io::Error::new(ErrorKind::UnexpectedEof, "end of stream inside a packet");
        DecodeError::malformed(
            self.position as usize,
            format!("truncated packet ({} bytes available): {}", self.buffer.len(), eof),
        )
        .into()
    }
}

impl<R: Read> Iterator for PacketReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_packet() {
            Ok(Some(packet)) => Some(Ok(packet)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
