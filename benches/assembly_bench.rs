/// Assembly benchmarks
/// Measures container writers and full tool dispatch
use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;
use suntyn_tools::assembly::png::{write_png, ColorMode, ImageSpec};
use suntyn_tools::assembly::segment::{crc32, encode_segment};
use suntyn_tools::assembly::{assemble, AssemblyContext, ToolOptions, UploadedFileInfo};
use suntyn_tools::catalog;

fn segment_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");

    for size in [64usize, 4 * 1024, 256 * 1024] {
        let payload = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("crc32", size), &payload, |b, p| {
            b.iter(|| crc32(&[b"IDAT", black_box(p)]))
        });
        group.bench_with_input(BenchmarkId::new("encode_segment", size), &payload, |b, p| {
            b.iter(|| encode_segment(*b"IDAT", black_box(p)))
        });
    }

    group.finish();
}

fn png_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("png");
    group.measurement_time(Duration::from_secs(10));

    for (w, h) in [(256u32, 256u32), (1920, 1080)] {
        group.throughput(Throughput::Elements(u64::from(w) * u64::from(h)));
        for color in [ColorMode::Rgb, ColorMode::Rgba] {
            let spec = ImageSpec::clamped(w, h, color);
            let id = format!("{:?}/{}x{}", color, w, h);
            group.bench_with_input(BenchmarkId::new("write_png", id), &spec, |b, s| {
                b.iter(|| write_png(black_box(s)).unwrap())
            });
        }
    }

    group.finish();
}

fn dispatch_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let upload = UploadedFileInfo::new(
        "report.pdf",
        "application/pdf",
        Bytes::from_static(b"%PDF-1.4\n1 0 obj\n<< /Type /Page >>\nendobj\n"),
    );
    let files = [upload];
    let options = ToolOptions::new();

    for id in [
        "pdf-merger",
        "pan-validator",
        "audio-converter",
        "video-converter",
        "json-formatter",
    ] {
        let tool = catalog::resolve(id).unwrap();
        group.bench_function(id, |b| {
            b.iter(|| {
                let ctx = AssemblyContext::now();
                assemble(tool, black_box(&files), &options, &ctx).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    segment_benchmarks,
    png_benchmarks,
    dispatch_benchmarks
);
criterion_main!(benches);
