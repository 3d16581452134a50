//! Lexer throughput benchmarks.
//!
//! `raw` measures the allocation-free scanner alone (no keyword resolution,
//! no escape validation, no positions). `cooked` measures the full token
//! stream a parser would consume.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lua_lexer::{scan, scan_to_list};
use lua_lexer_core::{Cursor, LexerConfig, RawScanner, RawTag};

/// Generate N small Lua functions exercising most token families.
fn generate_n_functions(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "-- helper {i}\n\
                 local function f{i}(a, b, ...)\n  \
                   local t = {{ x = 0x{i:X}, y = {i}.5e-1, s = \"v\\t{i}\" }}\n  \
                   if a ~= b and #t >= 1 then return a // b .. [[done]] end\n  \
                   return t.x << 2\n\
                 end\n"
            )
        })
        .collect()
}

fn bench_raw_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer/raw/throughput");

    for num_functions in [10, 100, 1000, 5000] {
        let source = generate_n_functions(num_functions);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_functions),
            &source,
            |b, src| {
                b.iter(|| {
                    let mut scanner = RawScanner::new(Cursor::new(src), LexerConfig::default());
                    loop {
                        let tok = scanner.next_token();
                        if tok.tag == RawTag::Eof {
                            break;
                        }
                        black_box(tok);
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_cooked_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer/cooked/throughput");

    for num_functions in [10, 100, 1000, 5000] {
        let source = generate_n_functions(num_functions);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_functions),
            &source,
            |b, src| {
                b.iter(|| {
                    for tok in scan(src) {
                        black_box(tok);
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_collect(c: &mut Criterion) {
    let source = generate_n_functions(1000);
    c.bench_function("lexer/cooked/scan_to_list", |b| {
        b.iter(|| black_box(scan_to_list(black_box(&source))));
    });
}

criterion_group!(
    benches,
    bench_raw_throughput,
    bench_cooked_throughput,
    bench_collect
);
criterion_main!(benches);
