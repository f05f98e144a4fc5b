//! Metrics collection for KLV decoding
//!
//! Counts packets per local set, decode failures, checksum mismatches,
//! skipped tags and synchronization outcomes.

use crate::tags::TagSet;
use serde::Serialize;
use std::collections::HashMap;

/// Decode statistics collector
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecodeMetrics {
    /// Packets decoded, valid or not
    pub packets: u64,
    /// Bytes of decoded packets
    pub bytes: u64,
    /// Packets rejected as malformed
    pub malformed: u64,
    /// Packets rejected for an unaccepted designator
    pub unknown_designators: u64,
    /// Packets whose checksum did not match
    pub checksum_failures: u64,
    /// Unregistered tags skipped
    pub unknown_tags: u64,
    /// Telemetry samples bound to a video frame
    pub sync_bindings: u64,
    /// Telemetry samples dropped by the synchronizer
    pub dropped_samples: u64,
    /// Playback clock re-anchors
    pub clock_resets: u64,
    /// Packets per local set
    #[serde(skip)]
    pub set_distribution: HashMap<TagSet, u64>,
}

impl DecodeMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a decoded packet
    pub fn record_packet(
        &mut self,
        tag_set: TagSet,
        size: usize,
        valid: bool,
        unknown_tags: usize,
    ) {
        self.packets += 1;
        self.bytes += size as u64;
        self.unknown_tags += unknown_tags as u64;
        if !valid {
            self.checksum_failures += 1;
        }
        *self.set_distribution.entry(tag_set).or_insert(0) += 1;
    }

    /// Record a malformed packet
    pub fn record_malformed(&mut self) {
        self.malformed += 1;
    }

    /// Record a packet with an unaccepted designator
    pub fn record_unknown_designator(&mut self) {
        self.unknown_designators += 1;
    }

    /// Share of decoded packets with a matching checksum
    pub fn checksum_success_rate(&self) -> f64 {
        if self.packets == 0 {
            return 0.0;
        }
        (self.packets - self.checksum_failures) as f64 / self.packets as f64
    }

    /// Average packet size in bytes
    pub fn average_packet_size(&self) -> f64 {
        if self.packets == 0 {
            return 0.0;
        }
        self.bytes as f64 / self.packets as f64
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a human-readable report
    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== KLV Decode Metrics ===\n\n");

        report.push_str(&format!("Packets decoded: {}\n", self.packets));
        report.push_str(&format!("Bytes decoded: {} bytes\n", self.bytes));
        report.push_str(&format!(
            "Average packet size: {:.1} bytes\n",
            self.average_packet_size()
        ));
        report.push_str(&format!("Malformed packets: {}\n", self.malformed));
        report.push_str(&format!(
            "Unknown designators: {}\n",
            self.unknown_designators
        ));
        report.push_str(&format!(
            "Checksum failures: {} ({:.1}% ok)\n",
            self.checksum_failures,
            self.checksum_success_rate() * 100.0
        ));
        report.push_str(&format!("Unknown tags skipped: {}\n\n", self.unknown_tags));

        report.push_str("Local sets:\n");
        let mut sets: Vec<_> = self.set_distribution.iter().collect();
        sets.sort_by(|a, b| b.1.cmp(a.1));
        for (tag_set, count) in sets {
            report.push_str(&format!("  {}: {}\n", tag_set, count));
        }

        report.push_str(&format!(
            "\nSync bindings: {}, dropped samples: {}, clock resets: {}\n",
            self.sync_bindings, self.dropped_samples, self.clock_resets
        ));

        report
    }
}
