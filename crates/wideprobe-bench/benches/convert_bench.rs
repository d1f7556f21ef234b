//! Benchmarks for the safe wcstombs model.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wideprobe_core::convert::{model_conversion_output, wide_to_multibyte};
use wideprobe_core::wide::terminated_fill;

fn bench_ascii_fill(c: &mut Criterion) {
    let src = terminated_fill(4096, 'x' as u32);
    let mut dest = vec![0u8; 4096];
    c.bench_function("wide_to_multibyte/ascii_4096", |b| {
        b.iter(|| wide_to_multibyte(black_box(&mut dest), black_box(&src), 4096))
    });
}

fn bench_multibyte_mix(c: &mut Criterion) {
    let mut src: Vec<u32> = "héllo wörld 𝄞".chars().cycle().take(1024).map(u32::from).collect();
    src.push(0);
    let mut dest = vec![0u8; 4096];
    c.bench_function("wide_to_multibyte/mixed_1024", |b| {
        b.iter(|| wide_to_multibyte(black_box(&mut dest), black_box(&src), 4096))
    });
}

fn bench_probe_path(c: &mut Criterion) {
    let input = [0x41u8, 0, 0, 0, 0x42, 0, 0, 0];
    c.bench_function("model_conversion_output/probe_input", |b| {
        b.iter(|| model_conversion_output(black_box(&input)))
    });
}

criterion_group!(benches, bench_ascii_fill, bench_multibyte_mix, bench_probe_path);
criterion_main!(benches);
