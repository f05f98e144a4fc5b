//! Stress tests for the KLV decoder
//!
//! Run with: cargo test --release stress -- --ignored

use misb_klv::*;
use std::io::Cursor;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn uas_packet(i: u64) -> Vec<u8> {
    let mut encoder = LocalSetEncoder::new(TagSet::UasLocalSet);
    encoder
        .add_precision_time_stamp(1_600_000_000_000_000 + i * 33_333)
        .add_unsigned(0x41, 17, 1)
        .add_text(0x0A, "STRESS PLATFORM")
        .add_unsigned(0x05, i % 65_536, 2)
        .add_signed(0x0D, (i as i64 * 7919) % 0x7FFF_FFFF, 4)
        .add_signed(0x0E, -(i as i64 * 104_729) % 0x7FFF_FFFF, 4);
    encoder.encode_packet().unwrap()
}

#[test]
#[ignore] // Run manually with --ignored
fn stress_test_decoding() {
    let decoder = LocalSetDecoder::new(Arc::new(TagRegistry::with_standard_catalog()));
    let packets: Vec<_> = (0..1_000).map(uas_packet).collect();

    let iterations = 500_000;
    let start = Instant::now();

    for i in 0..iterations {
        let packet = decoder.decode_packet(&packets[i % packets.len()]).unwrap();
        assert!(packet.valid);
    }

    let elapsed = start.elapsed();
    let rate = iterations as f64 / elapsed.as_secs_f64();

    println!("Decoded {} packets in {:?}", iterations, elapsed);
    println!("Rate: {:.0} packets/second", rate);

    assert!(
        rate > 50_000.0,
        "Should decode at least 50k packets/s, got {:.0}",
        rate
    );
}

#[test]
#[ignore]
fn stress_test_reader() {
    let mut stream = Vec::new();
    for i in 0..100_000 {
        stream.extend(uas_packet(i));
    }
    let bytes = stream.len();

    let start = Instant::now();
    let mut reader = PacketReader::new(Cursor::new(stream));
    let count = reader.by_ref().filter(|p| p.is_ok()).count();
    let elapsed = start.elapsed();

    println!(
        "Split {} packets ({} bytes) in {:?}",
        count, bytes, elapsed
    );
    assert_eq!(count, 100_000);
    assert_eq!(reader.skipped_bytes(), 0);
}

#[test]
#[ignore]
fn stress_test_concurrent_pipeline() {
    let pipeline = Arc::new(
        TelemetryPipeline::new(
            PipelineConfig::default(),
            Arc::new(TagRegistry::with_standard_catalog()),
        )
        .unwrap(),
    );
    let frames = 100_000u64;
    let start = Instant::now();

    let video = {
        let pipeline = Arc::clone(&pipeline);
        thread::spawn(move || {
            for i in 0..frames {
                pipeline.on_video_frame(i as f64 / 30.0);
            }
        })
    };
    let telemetry = {
        let pipeline = Arc::clone(&pipeline);
        thread::spawn(move || {
            for i in 0..frames {
                pipeline
                    .process_packet(i as f64 / 30.0, &uas_packet(i))
                    .unwrap();
            }
        })
    };
    video.join().unwrap();
    telemetry.join().unwrap();

    let metrics = pipeline.metrics();
    println!("Processed {} packets in {:?}", frames, start.elapsed());
    println!("{}", metrics.report());

    assert_eq!(metrics.packets, frames);
    assert!(metrics.sync_bindings > 0);
    assert!(metrics.sync_bindings + metrics.dropped_samples <= frames);
}
