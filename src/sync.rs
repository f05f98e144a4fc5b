//! Telemetry / video stream synchronization
//!
//! Binds decoded telemetry samples to video presentation time stamps. This
//! module provides:
//! - [`SyncTime`], the (precision time stamp, PTS) pair that lets any later
//!   frame be placed on the telemetry clock
//! - a bounded pending buffer with a drop-oldest policy, never blocking the
//!   telemetry path
//! - a bounded history of recent frame PTS used for nearest-match binding

use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One telemetry sample as seen by the synchronizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    /// Precision time stamp carried by the packet, seconds
    pub precision_time_stamp: f64,
    /// Container time of the metadata access unit, seconds
    pub stream_time: f64,
}

impl TelemetrySample {
    /// Create a sample
    pub fn new(precision_time_stamp: f64, stream_time: f64) -> Self {
        Self {
            precision_time_stamp,
            stream_time,
        }
    }
}

/// Association between the telemetry clock and the video PTS clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncTime {
    /// Precision time stamp of the bound telemetry sample, seconds
    pub precision_time_stamp: f64,
    /// Presentation time stamp of the bound video frame, seconds
    pub presentation_time_stamp: f64,
}

impl SyncTime {
    /// Create a binding
    pub fn new(precision_time_stamp: f64, presentation_time_stamp: f64) -> Self {
        Self {
            precision_time_stamp,
            presentation_time_stamp,
        }
    }

    /// Absolute time of the frame presented at `pts`
    pub fn frame_time(&self, pts: f64) -> f64 {
        self.precision_time_stamp + (pts - self.presentation_time_stamp)
    }
}

/// Synchronizer states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No binding made yet
    #[default]
    Waiting,
    /// At least one sample bound to a frame
    Synchronized,
}

/// Configuration for synchronization behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Largest |stream_time - pts| accepted for a binding, seconds
    pub tolerance_secs: f64,
    /// Pending samples kept while waiting for a frame
    pub max_pending: usize,
    /// Recent frame PTS kept for matching
    pub max_frames: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: 0.05,
            max_pending: 64,
            max_frames: 256,
        }
    }
}

/// Stream synchronizer - binds telemetry samples to frame PTS
#[derive(Debug)]
pub struct StreamSynchronizer {
    /// Current state
    state: SyncState,
    /// Samples waiting for a frame, oldest first
    pending: VecDeque<TelemetrySample>,
    /// Recent frame PTS, oldest first
    frames: VecDeque<f64>,
    /// Most recent binding
    latest: Option<SyncTime>,
    /// Samples evicted from a full pending buffer
    dropped_samples: u64,
    /// Bindings made so far
    bindings: u64,
    /// Configuration
    config: SyncConfig,
}

impl StreamSynchronizer {
    /// Create a synchronizer with default configuration
    pub fn new() -> Self {
        Self::with_config(SyncConfig::default())
    }

    /// Create a synchronizer with custom configuration
    pub fn with_config(config: SyncConfig) -> Self {
        Self {
            state: SyncState::Waiting,
            pending: VecDeque::with_capacity(config.max_pending),
            frames: VecDeque::with_capacity(config.max_frames),
            latest: None,
            dropped_samples: 0,
            bindings: 0,
            config,
        }
    }

    /// Offer a telemetry sample
    ///
    /// Binds immediately when a known frame lies within tolerance, otherwise
    /// the sample waits in the pending buffer.
    pub fn push_telemetry(&mut self, sample: TelemetrySample) -> Option<SyncTime> {
        if let Some(pts) = self.nearest_frame(sample.stream_time) {
            return Some(self.bind(sample, pts));
        }

        if self.config.max_pending == 0 {
            self.dropped_samples += 1;
            return None;
        }
        if self.pending.len() >= self.config.max_pending {
            if let Some(evicted) = self.pending.pop_front() {
                self.dropped_samples += 1;
                warn!(
                    "sync buffer full ({} samples), dropping sample at stream time {:.3}",
                    self.config.max_pending, evicted.stream_time
                );
            }
        }
        self.pending.push_back(sample);
        None
    }

    /// Record a video frame and bind every pending sample it matches
    pub fn push_frame(&mut self, pts: f64) -> Vec<SyncTime> {
        if self.config.max_frames > 0 {
            if self.frames.len() >= self.config.max_frames {
                self.frames.pop_front();
            }
            self.frames.push_back(pts);
        }

        let tolerance = self.config.tolerance_secs;
        let (matched, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|sample| (sample.stream_time - pts).abs() <= tolerance);
        self.pending = waiting.into();

        matched
            .into_iter()
            .map(|sample| self.bind(sample, pts))
            .collect()
    }

    /// Most recent binding
    pub fn latest(&self) -> Option<SyncTime> {
        self.latest
    }

    /// Absolute time of the frame at `pts`, from the latest binding
    pub fn frame_time(&self, pts: f64) -> Option<f64> {
        self.latest.map(|sync| sync.frame_time(pts))
    }

    /// Current state
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Samples waiting for a frame
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Samples dropped from the pending buffer so far
    pub fn dropped_samples(&self) -> u64 {
        self.dropped_samples
    }

    /// Bindings made so far
    pub fn bindings(&self) -> u64 {
        self.bindings
    }

    /// Configuration in use
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Clear buffers, bindings and counters
    pub fn reset(&mut self) {
        self.state = SyncState::Waiting;
        self.pending.clear();
        self.frames.clear();
        self.latest = None;
        self.dropped_samples = 0;
        self.bindings = 0;
    }

    fn nearest_frame(&self, stream_time: f64) -> Option<f64> {
        self.frames
            .iter()
            .copied()
            .map(|pts| (pts, (pts - stream_time).abs()))
            .filter(|(_, distance)| *distance <= self.config.tolerance_secs)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(pts, _)| pts)
    }

    fn bind(&mut self, sample: TelemetrySample, pts: f64) -> SyncTime {
        let sync = SyncTime::new(sample.precision_time_stamp, pts);
        trace!(
            "bound precision time {:.6} to pts {:.6}",
            sync.precision_time_stamp,
            pts
        );
        self.latest = Some(sync);
        self.state = SyncState::Synchronized;
        self.bindings += 1;
        sync
    }
}

impl Default for StreamSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
