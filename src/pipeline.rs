//! Telemetry pipeline
//!
//! Owns the decoder, the playback clock and the stream synchronizer for one
//! motion imagery stream. Packets and video frames may arrive on different
//! threads; every piece of mutable state sits behind its own mutex.

use crate::clock::SharedClock;
use crate::config::PipelineConfig;
use crate::decoder::{DecodedPacket, LocalSetDecoder};
use crate::error::{DecodeError, KlvError, Result};
use crate::metrics::DecodeMetrics;
use crate::sync::{StreamSynchronizer, SyncTime, TelemetrySample};
use crate::tags::TagRegistry;
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// Receives every new telemetry/video binding
pub trait SyncListener: Send + Sync {
    /// Called once per binding, outside of the pipeline locks
    fn on_sync(&self, sync: &SyncTime);
}

impl<F> SyncListener for F
where
    F: Fn(&SyncTime) + Send + Sync,
{
    fn on_sync(&self, sync: &SyncTime) {
        self(sync)
    }
}

/// Result of processing one packet
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Decoded packet, time stamp rewritten under looped playback
    pub packet: DecodedPacket,
    /// Binding made by this packet, if any
    pub sync: Option<SyncTime>,
}

/// Decoding and synchronization for one stream
pub struct TelemetryPipeline {
    config: PipelineConfig,
    decoder: LocalSetDecoder,
    clock: SharedClock,
    synchronizer: Mutex<StreamSynchronizer>,
    metrics: Mutex<DecodeMetrics>,
    listeners: RwLock<Vec<Arc<dyn SyncListener>>>,
}

impl TelemetryPipeline {
    /// Create a pipeline; fails when the configuration does not validate
    pub fn new(config: PipelineConfig, registry: Arc<TagRegistry>) -> Result<Self> {
        config.validate()?;
        let decoder = LocalSetDecoder::new(registry)
            .with_checksum_verification(config.verify_checksum)
            .with_accepted_designators(config.designators()?);

        Ok(Self {
            synchronizer: Mutex::new(StreamSynchronizer::with_config(config.sync.clone())),
            config,
            decoder,
            clock: SharedClock::new(),
            metrics: Mutex::new(DecodeMetrics::new()),
            listeners: RwLock::new(Vec::new()),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Decoder in use
    pub fn decoder(&self) -> &LocalSetDecoder {
        &self.decoder
    }

    /// Register a binding listener
    pub fn add_listener(&self, listener: Arc<dyn SyncListener>) {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(listener);
    }

    /// Decode one packet received at container time `stream_time`
    pub fn process_packet(&self, stream_time: f64, bytes: &[u8]) -> Result<PipelineOutput> {
        let mut packet = match self.decoder.decode_packet(bytes) {
            Ok(packet) => packet,
            Err(err) => {
                let mut metrics = lock(&self.metrics);
                match err {
                    KlvError::Decode(DecodeError::UnknownDesignator(_)) => {
                        metrics.record_unknown_designator()
                    }
                    _ => metrics.record_malformed(),
                }
                return Err(err);
            }
        };

        if self.config.loop_playback {
            if let Some(recorded) = packet.precision_time_stamp() {
                let played = self.clock.convert(recorded);
                packet.set.set_precision_time_stamp(played);
            }
        }

        let sync = match packet.precision_time_stamp() {
            Some(precision) => {
                let mut synchronizer = lock(&self.synchronizer);
                let sync =
                    synchronizer.push_telemetry(TelemetrySample::new(precision, stream_time));
                let mut metrics = lock(&self.metrics);
                metrics.dropped_samples = synchronizer.dropped_samples();
                metrics.sync_bindings = synchronizer.bindings();
                sync
            }
            None => {
                debug!("{} packet without precision time stamp", packet.set.tag_set());
                None
            }
        };

        {
            let mut metrics = lock(&self.metrics);
            metrics.record_packet(
                packet.set.tag_set(),
                packet.size,
                packet.valid,
                packet.set.unknown_tags(),
            );
            metrics.clock_resets = self.clock.snapshot().resets();
        }

        if let Some(sync) = &sync {
            self.notify(std::slice::from_ref(sync));
        }
        Ok(PipelineOutput { packet, sync })
    }

    /// Record a video frame; returns the bindings it completed
    pub fn on_video_frame(&self, pts: f64) -> Vec<SyncTime> {
        let bound = {
            let mut synchronizer = lock(&self.synchronizer);
            let bound = synchronizer.push_frame(pts);
            lock(&self.metrics).sync_bindings = synchronizer.bindings();
            bound
        };
        self.notify(&bound);
        bound
    }

    /// Most recent binding
    pub fn latest_sync_time(&self) -> Option<SyncTime> {
        lock(&self.synchronizer).latest()
    }

    /// Absolute time of the frame presented at `pts`
    pub fn frame_time(&self, pts: f64) -> Option<f64> {
        lock(&self.synchronizer).frame_time(pts)
    }

    /// Snapshot of the metrics
    pub fn metrics(&self) -> DecodeMetrics {
        lock(&self.metrics).clone()
    }

    /// Reset clock, synchronizer and metrics (new playback session)
    pub fn reset(&self) {
        self.clock.reset();
        lock(&self.synchronizer).reset();
        lock(&self.metrics).reset();
    }

    fn notify(&self, bindings: &[SyncTime]) {
        if bindings.is_empty() {
            return;
        }
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for sync in bindings {
            for listener in &listeners {
                listener.on_sync(sync);
            }
        }
    }
}

impl std::fmt::Debug for TelemetryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryPipeline")
            .field("config", &self.config)
            .field("decoder", &self.decoder)
            .field("synchronizer", &self.synchronizer)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::wall_clock_now;
    use crate::encoder::LocalSetEncoder;
    use crate::tags::TagSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pipeline(config: PipelineConfig) -> TelemetryPipeline {
        TelemetryPipeline::new(config, Arc::new(TagRegistry::with_standard_catalog())).unwrap()
    }

    fn uas_packet(micros: u64) -> Vec<u8> {
        let mut encoder = LocalSetEncoder::new(TagSet::UasLocalSet);
        encoder
            .add_precision_time_stamp(micros)
            .add_unsigned(0x41, 11, 1);
        encoder.encode_packet().unwrap()
    }

    #[test]
    fn test_pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TelemetryPipeline>();
    }

    #[test]
    fn test_packet_then_frame_binds() {
        let pipeline = pipeline(PipelineConfig::default());
        let output = pipeline
            .process_packet(2.0, &uas_packet(1_553_622_777_000_000))
            .unwrap();
        assert!(output.sync.is_none());
        assert!(output.packet.valid);

        let bound = pipeline.on_video_frame(2.01);
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].presentation_time_stamp, 2.01);

        let frame_time = pipeline.frame_time(3.01).unwrap();
        assert!((frame_time - 1_553_622_778.0).abs() < 1e-6);
        assert_eq!(pipeline.metrics().sync_bindings, 1);
    }

    #[test]
    fn test_listeners_notified() {
        let pipeline = pipeline(PipelineConfig::default());
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        pipeline.add_listener(Arc::new(move |_: &SyncTime| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        pipeline.on_video_frame(1.0);
        let output = pipeline.process_packet(1.0, &uas_packet(10_000_000)).unwrap();
        assert!(output.sync.is_some());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.latest_sync_time(), output.sync);
    }

    #[test]
    fn test_looped_playback_rewrites_time() {
        let pipeline = pipeline(PipelineConfig::looped_playback());
        let first = pipeline.process_packet(0.0, &uas_packet(1_000_000)).unwrap();
        let second = pipeline.process_packet(1.0, &uas_packet(2_000_000)).unwrap();

        let t0 = first.packet.precision_time_stamp().unwrap();
        let t1 = second.packet.precision_time_stamp().unwrap();
        assert!((t0 - wall_clock_now()).abs() < 5.0);
        assert!((t1 - t0 - 1.0).abs() < 1e-6);

        // loop back to the start of the recording
        pipeline.process_packet(2.0, &uas_packet(1_000_000)).unwrap();
        assert_eq!(pipeline.metrics().clock_resets, 1);
    }

    #[test]
    fn test_errors_counted() {
        let pipeline = pipeline(PipelineConfig::default());
        let mut packet = uas_packet(1_000_000);
        packet.truncate(packet.len() - 3);
        assert!(pipeline.process_packet(0.0, &packet).is_err());

        let mut unknown = uas_packet(1_000_000);
        unknown[15] = 0x55;
        assert!(pipeline.process_packet(0.0, &unknown).is_err());

        let metrics = pipeline.metrics();
        assert_eq!(metrics.malformed, 1);
        assert_eq!(metrics.unknown_designators, 1);
        assert_eq!(metrics.packets, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.accepted_designators.push("nonsense".into());
        assert!(matches!(
            TelemetryPipeline::new(config, Arc::new(TagRegistry::new())),
            Err(KlvError::Config(_))
        ));
    }

    #[test]
    fn test_reset() {
        let pipeline = pipeline(PipelineConfig::default());
        pipeline.on_video_frame(1.0);
        pipeline.process_packet(1.0, &uas_packet(10_000_000)).unwrap();
        pipeline.reset();

        assert!(pipeline.latest_sync_time().is_none());
        assert_eq!(pipeline.metrics().packets, 0);
    }
}
