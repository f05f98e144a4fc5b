//! End-to-end tests: packet files through the reader, decoder, clock and
//! synchronizer

use approx::assert_abs_diff_eq;
use misb_klv::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufReader, Write};
use std::sync::{Arc, Mutex};

const FRAME_RATE: f64 = 30.0;
const START_MICROS: u64 = 1_700_000_000_000_000;

fn registry() -> Arc<TagRegistry> {
    Arc::new(TagRegistry::with_standard_catalog())
}

/// One ST 0601 packet per frame, 1/30 s apart
fn uas_packet(frame: u64) -> Vec<u8> {
    let registry = registry();
    let heading = registry.lookup(TagSet::UasLocalSet, 0x05);
    let latitude = registry.lookup(TagSet::UasLocalSet, 0x0D);

    let mut encoder = LocalSetEncoder::new(TagSet::UasLocalSet);
    encoder
        .add_precision_time_stamp(START_MICROS + frame * 1_000_000 / 30)
        .add_unsigned(0x41, 17, 1)
        .add_text(0x03, "MISSION01");
    encoder
        .add_value(&heading, &Value::Real((frame as f64 * 3.0) % 360.0))
        .unwrap()
        .add_value(&latitude, &Value::Real(38.5 + frame as f64 * 1e-4))
        .unwrap();
    encoder.encode_packet().unwrap()
}

#[test]
fn test_file_through_pipeline() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for frame in 0..90 {
        file.write_all(&uas_packet(frame)).unwrap();
        // filler between packets, as left by some demuxers
        if frame % 10 == 0 {
            file.write_all(&[0xFF; 7]).unwrap();
        }
    }
    file.flush().unwrap();

    let pipeline = TelemetryPipeline::new(PipelineConfig::default(), registry()).unwrap();
    let bindings = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&bindings);
    pipeline.add_listener(Arc::new(move |sync: &SyncTime| {
        seen.lock().unwrap().push(*sync);
    }));

    let mut reader = PacketReader::new(BufReader::new(File::open(file.path()).unwrap()));
    let mut decoded = 0;
    for (frame, packet) in reader.by_ref().enumerate() {
        let pts = frame as f64 / FRAME_RATE;
        pipeline.on_video_frame(pts);
        let output = pipeline.process_packet(pts, &packet.unwrap()).unwrap();
        assert!(output.packet.valid);
        assert!(output.sync.is_some());
        decoded += 1;
    }

    assert_eq!(decoded, 90);
    assert_eq!(reader.skipped_bytes(), 9 * 7);

    let metrics = pipeline.metrics();
    assert_eq!(metrics.packets, 90);
    assert_eq!(metrics.checksum_failures, 0);
    assert_eq!(metrics.sync_bindings, 90);
    assert_eq!(bindings.lock().unwrap().len(), 90);

    // frame 45 is 1.5 s into the recording
    let frame_time = pipeline.frame_time(45.0 / FRAME_RATE).unwrap();
    assert_abs_diff_eq!(frame_time, START_MICROS as f64 / 1e6 + 1.5, epsilon = 1e-4);
}

#[test]
fn test_decoded_values_survive_encoding() {
    let decoder = LocalSetDecoder::new(registry());
    let packet = decoder.decode_packet(&uas_packet(12)).unwrap();

    assert_eq!(packet.set.get(0x41), Some(&Value::Unsigned(17)));
    assert_eq!(
        packet.set.get_by_name("Mission ID").and_then(Value::as_str),
        Some("MISSION01")
    );
    assert_abs_diff_eq!(
        packet.set.get(0x05).and_then(Value::as_f64).unwrap(),
        36.0,
        epsilon = 360.0 / 65535.0
    );
    assert_abs_diff_eq!(
        packet.set.get(0x0D).and_then(Value::as_f64).unwrap(),
        38.5012,
        epsilon = 1e-7
    );
}

#[test]
fn test_telemetry_ahead_of_video() {
    let pipeline = TelemetryPipeline::new(
        PipelineConfig::with_sync(SyncConfig {
            max_pending: 8,
            ..SyncConfig::default()
        }),
        registry(),
    )
    .unwrap();

    // 20 packets before any frame: only the newest 8 wait
    for frame in 0..20 {
        let output = pipeline
            .process_packet(frame as f64 / FRAME_RATE, &uas_packet(frame))
            .unwrap();
        assert!(output.sync.is_none());
    }
    assert_eq!(pipeline.metrics().dropped_samples, 12);

    // samples 18 and 19 are both within 50 ms of the frame
    let bound = pipeline.on_video_frame(19.0 / FRAME_RATE);
    assert_eq!(bound.len(), 2);
    assert_eq!(pipeline.latest_sync_time(), Some(bound[1]));
    assert_abs_diff_eq!(
        bound[1].precision_time_stamp,
        (START_MICROS + 19 * 1_000_000 / 30) as f64 / 1e6,
        epsilon = 1e-6
    );
}

#[test]
fn test_looped_recording_replays_on_wall_clock() {
    let pipeline = TelemetryPipeline::new(PipelineConfig::looped_playback(), registry()).unwrap();
    let before = clock::wall_clock_now();

    let mut stamps = Vec::new();
    for pass in 0..2 {
        for frame in 0..30 {
            let stream_time = (pass * 30 + frame) as f64 / FRAME_RATE;
            let output = pipeline
                .process_packet(stream_time, &uas_packet(frame))
                .unwrap();
            stamps.push(output.packet.precision_time_stamp().unwrap());
        }
    }

    // first pass starts at the wall clock, not in the recording's past
    assert!(stamps[0] >= before - 1.0);
    assert!(stamps[0] < before + 60.0);
    for pair in stamps[..30].windows(2) {
        assert_abs_diff_eq!(pair[1] - pair[0], 1.0 / 30.0, epsilon = 1e-5);
    }
    assert_eq!(pipeline.metrics().clock_resets, 1);
    // second pass is re-anchored, never earlier than the first
    assert!(stamps[30] >= stamps[0]);
}

#[test]
fn test_imapb_random_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x4D_49_53_42);

    for _ in 0..500 {
        let min: f64 = rng.gen_range(-5_000.0..5_000.0);
        let width: f64 = rng.gen_range(0.5..20_000.0);
        let len = rng.gen_range(2..=4);
        let codec = ImapB::new(min, min + width, len).unwrap();

        for _ in 0..20 {
            let value = rng.gen_range(min..min + width);
            let decoded = codec.decode(&codec.encode(value)).unwrap();
            assert!(
                (decoded - value).abs() <= codec.precision() + 1e-9,
                "[{}, {}] on {} bytes: {} decoded as {}",
                min,
                min + width,
                len,
                value,
                decoded
            );
        }
    }
}

#[test]
fn test_vmti_packet_with_targets() {
    let registry = registry();
    let decoder = LocalSetDecoder::new(Arc::clone(&registry));

    let targets: Vec<LocalSetEncoder> = (1..=3u32)
        .map(|id| {
            let mut target = LocalSetEncoder::vtarget(id);
            target
                .add_unsigned(2, 1000 + id as u64, 3)
                .add_unsigned(5, 50 + id as u64, 1);
            target
        })
        .collect();

    let mut vmti = LocalSetEncoder::new(TagSet::VmtiLocalSet);
    vmti.add_precision_time_stamp(START_MICROS)
        .add_unsigned(5, 3, 1)
        .add_series(101, &targets);
    let packet = decoder.decode_packet(&vmti.encode_packet().unwrap()).unwrap();

    assert!(packet.valid);
    assert_eq!(packet.set.tag_set(), TagSet::VmtiLocalSet);
    let series = packet.set.get(101).and_then(Value::as_series).unwrap();
    assert_eq!(series.len(), 3);
    for (index, target) in series.iter().enumerate() {
        let id = index as u64 + 1;
        assert_eq!(target.get(0), Some(&Value::Unsigned(id)));
        assert_eq!(target.get(2), Some(&Value::Unsigned(1000 + id)));
        assert_eq!(target.get(5), Some(&Value::Unsigned(50 + id)));
    }
}

#[test]
fn test_vmti_target_with_location_and_mask() {
    let decoder = LocalSetDecoder::new(registry());

    let mut target = LocalSetEncoder::vtarget(9);
    target
        .add_unsigned(5, 80, 1)
        .add_raw(17, vec![0x27, 0xBA, 0x93, 0x6E, 0x1D, 0x4C, 0x03, 0xE8, 0x00, 0x0A])
        .add_raw(101, vec![0x01, 0x04, 0x00, 0x10, 0x20, 0x30]);

    let mut vmti = LocalSetEncoder::new(TagSet::VmtiLocalSet);
    vmti.add_precision_time_stamp(START_MICROS)
        .add_unsigned(5, 1, 1)
        .add_series(101, &[target]);
    let packet = decoder.decode_packet(&vmti.encode_packet().unwrap()).unwrap();

    assert!(packet.valid);
    let series = packet.set.get(101).and_then(Value::as_series).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].get(0), Some(&Value::Unsigned(9)));
    assert_eq!(series[0].get(5), Some(&Value::Unsigned(80)));
    assert_eq!(
        series[0].get(17).and_then(Value::as_bytes).map(<[u8]>::len),
        Some(10)
    );
    assert_eq!(
        series[0].get(101).and_then(Value::as_bytes),
        Some(&[0x01, 0x04, 0x00, 0x10, 0x20, 0x30][..])
    );
}
