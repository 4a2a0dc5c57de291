//! Performance benchmarks for oxihuff-huffman
//!
//! This benchmark suite evaluates:
//! - Compression/decompression throughput
//! - Table versus tree decoding
//! - Compression ratios for various data patterns

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxihuff_huffman::{DecodeStrategy, HuffConfig, compress, decompress_with, encode};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - a single symbol (one-bit codes)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - all 256 symbols, near 8-bit codes
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            // Linear congruential generator
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - skewed frequencies over a small alphabet
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }
}

const SIZES: [(&str, usize); 3] = [
    ("4KB", 4 * 1024),
    ("64KB", 64 * 1024),
    ("1MB", 1024 * 1024),
];

const PATTERNS: [(&str, PatternGenerator); 3] = [
    ("uniform", test_data::uniform as PatternGenerator),
    ("random", test_data::random as PatternGenerator),
    ("text", test_data::text_like as PatternGenerator),
];

fn bench_compression_speed(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_speed");

    for (size_name, size) in SIZES {
        for (pattern_name, generator) in PATTERNS {
            let data = generator(size);
            let id = format!("{}/{}", size_name, pattern_name);

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &data, |b, data| {
                b.iter(|| {
                    let compressed = compress(black_box(data)).unwrap();
                    black_box(compressed);
                });
            });
        }
    }

    group.finish();
}

fn bench_decompression_speed(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_speed");

    let strategies = [("table", DecodeStrategy::Table), ("tree", DecodeStrategy::Tree)];

    for (size_name, size) in SIZES {
        for (pattern_name, generator) in PATTERNS {
            let compressed = compress(&generator(size)).unwrap();

            for (strategy_name, strategy) in strategies {
                let config = HuffConfig::new().with_decode_strategy(strategy);
                let id = format!("{}/{}/{}", size_name, pattern_name, strategy_name);

                group.throughput(Throughput::Bytes(size as u64));
                group.bench_with_input(
                    BenchmarkId::from_parameter(&id),
                    &compressed,
                    |b, compressed| {
                        b.iter(|| {
                            let decompressed =
                                decompress_with(black_box(compressed), config).unwrap();
                            black_box(decompressed);
                        });
                    },
                );
            }
        }
    }

    group.finish();
}

fn bench_compression_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_ratio");
    group.sample_size(10);

    for (pattern_name, generator) in PATTERNS {
        let data = generator(64 * 1024);
        let stats = encode(&data).unwrap().stats();
        println!(
            "{}: {} -> {} bytes ({:.2} bits/symbol, {:.1}% saved)",
            pattern_name,
            stats.original_size,
            stats.compressed_size,
            stats.bits_per_symbol(),
            stats.space_savings()
        );

        group.bench_with_input(BenchmarkId::from_parameter(pattern_name), &data, |b, data| {
            b.iter(|| {
                let container = encode(black_box(data)).unwrap();
                black_box(container.stats().compression_ratio());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compression_speed,
    bench_decompression_speed,
    bench_compression_ratio
);
criterion_main!(benches);
