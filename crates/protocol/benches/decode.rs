//! Benchmarks for line decoding and classification
//!
//! These benchmarks verify that:
//! 1. Decoding cost is flat across value types (no allocation per line)
//! 2. Timestamp classification is cheap enough to run before every decode
//! 3. Rejecting a malformed line costs no more than accepting a good one

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use tally_protocol::{
    LineEncoder, LineSlice, TypedValue, Uuid, decode_line, is_timestamp_line,
};

/// Encode a data line carrying `value`
fn build_line(value: &TypedValue<'_>, with_agent: bool) -> Vec<u8> {
    let id = Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440000);
    let agent = with_agent.then_some(b"agent-01".as_slice());
    let mut buf = Vec::with_capacity(96);
    LineEncoder::new()
        .encode(&mut buf, b'M', id, agent, b"system.cpu.load", value)
        .expect("bench line encodes");
    buf
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_line");

    let cases = [
        ("double", TypedValue::Double(0.75)),
        ("uint64", TypedValue::UInt64(18_446_744_073_709_551_615)),
        ("int32", TypedValue::Int32(-42)),
        ("string", TypedValue::String(LineSlice::new(b"status=ok", 0))),
        ("absent", TypedValue::Absent),
    ];

    for (name, value) in cases {
        let line = build_line(&value, true);
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| black_box(decode_line(black_box(&line), true)))
        });
    }

    let line = build_line(&TypedValue::Double(0.75), false);
    group.bench_function("double_no_agent", |b| {
        b.iter(|| black_box(decode_line(black_box(&line), false)))
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_timestamp_line");
    group.throughput(Throughput::Elements(1));

    let timestamp = b"1700000000000".to_vec();
    group.bench_function("timestamp", |b| {
        b.iter(|| black_box(is_timestamp_line(black_box(&timestamp))))
    });

    let data = build_line(&TypedValue::Double(0.75), true);
    group.bench_function("data_line", |b| {
        b.iter(|| black_box(is_timestamp_line(black_box(&data))))
    });

    group.finish();
}

fn bench_reject(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_reject");

    let overflow = b"M\t550e8400-e29b-41d4-a716-446655440000\tcpu\tL99999999999999999999".to_vec();
    group.bench_function("numeric_overflow", |b| {
        b.iter(|| black_box(decode_line(black_box(&overflow), false)))
    });

    let field_count = b"M\t550e8400-e29b-41d4-a716-446655440000\tcpu".to_vec();
    group.bench_function("field_count", |b| {
        b.iter(|| black_box(decode_line(black_box(&field_count), false)))
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_classify, bench_reject);
criterion_main!(benches);
