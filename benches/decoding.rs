//! Benchmarks for KLV decoding and encoding performance

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use misb_klv::{
    ImapB, LocalSetDecoder, LocalSetEncoder, PacketReader, TagRegistry, TagSet, Value,
};
use std::io::Cursor;
use std::sync::Arc;

fn registry() -> Arc<TagRegistry> {
    Arc::new(TagRegistry::with_standard_catalog())
}

fn generate_packets(count: u64) -> Vec<Vec<u8>> {
    let registry = registry();
    let heading = registry.lookup(TagSet::UasLocalSet, 0x05);
    let latitude = registry.lookup(TagSet::UasLocalSet, 0x0D);
    let longitude = registry.lookup(TagSet::UasLocalSet, 0x0E);

    (0..count)
        .map(|i| {
            let mut security = LocalSetEncoder::new(TagSet::SecurityLocalSet);
            security
                .add_unsigned(0x01, 1, 1)
                .add_text(0x03, "//US")
                .add_unsigned(0x16, 12, 2);

            let mut encoder = LocalSetEncoder::new(TagSet::UasLocalSet);
            encoder
                .add_precision_time_stamp(1_600_000_000_000_000 + i * 33_333)
                .add_unsigned(0x41, 17, 1)
                .add_text(0x0A, "BENCH PLATFORM")
                .add_set(0x30, &security);
            encoder
                .add_value(&heading, &Value::Real((i % 360) as f64))
                .and_then(|e| e.add_value(&latitude, &Value::Real(38.0 + i as f64 * 1e-5)))
                .and_then(|e| e.add_value(&longitude, &Value::Real(-77.0 - i as f64 * 1e-5)))
                .unwrap();
            encoder.encode_packet().unwrap()
        })
        .collect()
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");

    let packets = generate_packets(1000);
    let decoder = LocalSetDecoder::new(registry());

    group.throughput(Throughput::Elements(1000));

    group.bench_function("decode_1000_packets", |b| {
        b.iter(|| {
            for packet in &packets {
                let decoded = decoder.decode_packet(packet);
                black_box(decoded).ok();
            }
        })
    });

    let unchecked = LocalSetDecoder::new(registry()).with_checksum_verification(false);
    group.bench_function("decode_1000_packets_unchecked", |b| {
        b.iter(|| {
            for packet in &packets {
                let decoded = unchecked.decode_packet(packet);
                black_box(decoded).ok();
            }
        })
    });

    group.finish();
}

fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader");

    let stream: Vec<u8> = generate_packets(1000).concat();
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("split_1000_packets", |b| {
        b.iter(|| {
            let count = PacketReader::new(Cursor::new(stream.as_slice())).count();
            black_box(count);
        })
    });

    group.finish();
}

fn bench_imapb(c: &mut Criterion) {
    let mut group = c.benchmark_group("imapb");

    let codec = ImapB::new(-900.0, 19_000.0, 3).unwrap();
    let values: Vec<f64> = (0..1000).map(|i| -900.0 + i as f64 * 19.9).collect();
    let encoded: Vec<Vec<u8>> = values.iter().map(|&v| codec.encode(v)).collect();

    group.throughput(Throughput::Elements(1000));

    group.bench_function("encode_1000", |b| {
        b.iter(|| {
            for &v in &values {
                black_box(codec.encode(v));
            }
        })
    });

    group.bench_function("decode_1000", |b| {
        b.iter(|| {
            for bytes in &encoded {
                black_box(codec.decode(bytes)).ok();
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_decoding, bench_reader, bench_imapb);
criterion_main!(benches);
