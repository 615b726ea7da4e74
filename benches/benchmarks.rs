use std::str::FromStr;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use decimal_infinite::{decode, encode, encode_to_vec, BigDecimal, DecimalKey};

// ---------------------------------------------------------------------------
// Input generation
// ---------------------------------------------------------------------------

/// Build a decimal string of `n` significant digits: "1234567890123..." with a
/// decimal point after the third digit.
fn make_large_decimal(n: usize) -> String {
    let mut s = String::with_capacity(n + 1);
    for i in 0..n {
        if i == 3 {
            s.push('.');
        }
        s.push(char::from(b'0' + (((i % 9) + 1) as u8))); // 1-9 repeating
    }
    s
}

fn inputs() -> Vec<(&'static str, BigDecimal)> {
    vec![
        ("small", BigDecimal::from(42)),
        ("medium", BigDecimal::from_str("-123.456789").unwrap()),
        ("tiny_exponent", BigDecimal::from_str("7.5E-4000").unwrap()),
        ("large_100d", BigDecimal::from_str(&make_large_decimal(100)).unwrap()),
        ("very_large_1000d", BigDecimal::from_str(&make_large_decimal(1000)).unwrap()),
    ]
}

// ---------------------------------------------------------------------------
// Encoding benchmarks
// ---------------------------------------------------------------------------

fn bench_encode(c: &mut Criterion) {
    let mut g = c.benchmark_group("encode");

    for (name, value) in inputs() {
        g.bench_with_input(BenchmarkId::new("encode", name), &value, |b, v| {
            b.iter(|| encode(black_box(v)));
        });
        g.bench_with_input(BenchmarkId::new("encode_to_vec", name), &value, |b, v| {
            b.iter(|| encode_to_vec(black_box(v)));
        });
    }

    // DecimalKey parsing normalizes before encoding
    g.bench_function("key_from_str/medium", |b| {
        b.iter(|| black_box("-123.456789").parse::<DecimalKey>().unwrap());
    });
    g.bench_function("key_from_u64", |b| {
        b.iter(|| DecimalKey::from(black_box(123_456_789_u64)));
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Decoding benchmarks
// ---------------------------------------------------------------------------

fn bench_decode(c: &mut Criterion) {
    let mut g = c.benchmark_group("decode");

    for (name, value) in inputs() {
        let bytes = encode_to_vec(&value);
        g.bench_with_input(BenchmarkId::new("decode", name), &bytes, |b, bytes| {
            b.iter(|| decode(black_box(bytes)).unwrap());
        });
    }

    let key: DecimalKey = "-123.456789".parse().unwrap();
    g.bench_with_input(BenchmarkId::new("display", "medium"), &key, |b, k| {
        b.iter(|| format!("{}", black_box(k)));
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Comparison benchmarks
// ---------------------------------------------------------------------------

fn bench_compare(c: &mut Criterion) {
    let mut g = c.benchmark_group("compare");

    let a: DecimalKey = "123.456789".parse().unwrap();
    let b: DecimalKey = "987.654321".parse().unwrap();
    let a_large: DecimalKey = make_large_decimal(100).parse().unwrap();
    let b_large: DecimalKey = make_large_decimal(100).replace('1', "2").parse().unwrap();

    // Equal values
    let a_clone = a.clone();
    g.bench_function("cmp/equal", |bench| {
        bench.iter(|| black_box(&a).cmp(black_box(&a_clone)));
    });

    // Different values: medium
    g.bench_function("cmp/different_medium", |bench| {
        bench.iter(|| black_box(&a).cmp(black_box(&b)));
    });

    // Different values: large (100 digits)
    g.bench_function("cmp/different_large", |bench| {
        bench.iter(|| black_box(&a_large).cmp(black_box(&b_large)));
    });

    // Numeric comparison of the decoded values, for reference
    let da = a_large.to_big_decimal().unwrap();
    let db = b_large.to_big_decimal().unwrap();
    g.bench_function("cmp/big_decimal_large", |bench| {
        bench.iter(|| black_box(&da).cmp(black_box(&db)));
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Round-trip benchmarks
// ---------------------------------------------------------------------------

fn bench_roundtrip(c: &mut Criterion) {
    let mut g = c.benchmark_group("roundtrip");

    for (name, value) in inputs().into_iter().take(3) {
        g.bench_with_input(BenchmarkId::new("encode_decode", name), &value, |b, v| {
            b.iter(|| decode(&encode_to_vec(black_box(v))).unwrap());
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_compare,
    bench_roundtrip
);
criterion_main!(benches);
