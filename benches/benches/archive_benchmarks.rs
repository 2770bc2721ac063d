use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zarchive::{
    demo::DemoRecord, serialize_from_bytes, serialize_to_bytes, Archive, Serializable,
};
use zarchive_error::ArchiveResult;

/// Тот же `i32`, но без быстрого пути: последовательность идёт поэлементно.
#[derive(Debug, Default, Clone, Copy)]
struct Wrapper(i32);

impl Serializable for Wrapper {
    fn serialize<A: Archive>(
        &mut self,
        ar: &mut A,
    ) -> ArchiveResult<()> {
        ar.transcode(&mut self.0)
    }
}

fn bench_sequence_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_write");
    for size in [16usize, 1_024, 65_536] {
        let plain: Vec<i32> = (0..size as i32).collect();
        let wrapped: Vec<Wrapper> = plain.iter().copied().map(Wrapper).collect();
        group.throughput(Throughput::Bytes((size * 4) as u64));

        group.bench_with_input(BenchmarkId::new("bulk", size), &plain, |b, v| {
            b.iter(|| {
                let mut v = v.clone();
                black_box(serialize_to_bytes(black_box(&mut v)).unwrap());
            })
        });
        group.bench_with_input(BenchmarkId::new("per_element", size), &wrapped, |b, v| {
            b.iter(|| {
                let mut v = v.clone();
                black_box(serialize_to_bytes(black_box(&mut v)).unwrap());
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("sequence_read");
    for size in [16usize, 1_024, 65_536] {
        let mut plain: Vec<i32> = (0..size as i32).collect();
        let mut wrapped: Vec<Wrapper> = plain.iter().copied().map(Wrapper).collect();
        let plain_bytes = serialize_to_bytes(&mut plain).unwrap();
        let wrapped_bytes = serialize_to_bytes(&mut wrapped).unwrap();
        group.throughput(Throughput::Bytes((size * 4) as u64));

        group.bench_with_input(BenchmarkId::new("bulk", size), &plain_bytes, |b, bytes| {
            b.iter(|| {
                let mut out: Vec<i32> = Vec::new();
                serialize_from_bytes(&mut out, black_box(bytes)).unwrap();
                black_box(out);
            })
        });
        group.bench_with_input(
            BenchmarkId::new("per_element", size),
            &wrapped_bytes,
            |b, bytes| {
                b.iter(|| {
                    let mut out: Vec<Wrapper> = Vec::new();
                    serialize_from_bytes(&mut out, black_box(bytes)).unwrap();
                    black_box(out);
                })
            },
        );
    }
    group.finish();
}

fn bench_record_roundtrip(c: &mut Criterion) {
    let record = DemoRecord::sample();
    c.bench_function("demo record roundtrip", |b| {
        b.iter(|| {
            let bytes = serialize_to_bytes(&mut record.clone()).unwrap();
            let mut out = DemoRecord::default();
            serialize_from_bytes(&mut out, black_box(&bytes)).unwrap();
            black_box(out);
        })
    });
}

fn bench_strings(c: &mut Criterion) {
    let words: Vec<String> = (0..1_000).map(|i| format!("word-{i}")).collect();
    c.bench_function("write 1000 strings", |b| {
        b.iter(|| {
            let mut v = words.clone();
            black_box(serialize_to_bytes(black_box(&mut v)).unwrap());
        })
    });
}

criterion_group!(
    benches,
    bench_sequence_paths,
    bench_record_roundtrip,
    bench_strings
);
criterion_main!(benches);
