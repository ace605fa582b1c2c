// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the docscan-document crate. Measures multi-page
// PDF assembly from in-memory page images at the default A4 page size.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use docscan_core::PageSize;
use docscan_document::{ImageProcessor, PdfWriter};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Three 400x560 pages fitted to A4 and serialised into one PDF.
fn bench_three_page_pdf(c: &mut Criterion) {
    let pages: Vec<DynamicImage> = (0..3u8)
        .map(|i| {
            DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 560, Rgb([i * 60, 128, 200])))
        })
        .collect();

    c.bench_function("three_page_pdf (400x560)", |b| {
        b.iter(|| {
            let mut writer = PdfWriter::new("bench", PageSize::A4_200DPI);
            for page in &pages {
                let fitted = ImageProcessor::from_dynamic(black_box(page.clone()))
                    .fit_within(PageSize::A4_200DPI)
                    .into_dynamic();
                writer.add_page(&fitted).unwrap();
            }
            black_box(writer.finish().unwrap());
        });
    });
}

/// Downscaling a camera-sized page to the A4 pixel budget.
fn bench_fit_camera_page(c: &mut Criterion) {
    let photo = DynamicImage::ImageRgb8(RgbImage::from_pixel(3000, 4000, Rgb([220, 220, 210])));

    c.bench_function("fit_within A4 (3000x4000)", |b| {
        b.iter(|| {
            let fitted = ImageProcessor::from_dynamic(black_box(photo.clone()))
                .fit_within(PageSize::A4_200DPI);
            black_box(fitted.into_dynamic());
        });
    });
}

criterion_group!(benches, bench_three_page_pdf, bench_fit_camera_page);
criterion_main!(benches);
