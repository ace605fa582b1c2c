// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image-to-PDF compositor.
//
// Decoding, resizing, and serialisation are CPU-bound and the output is
// written synchronously, so the whole composition runs on tokio's blocking
// pool. Nothing is written unless every input page decodes and the composed
// document draws them in order; the file appears by rename, never half-written.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use docscan_bridge::PdfCompositor;
use docscan_core::error::{DocscanError, Result};
use docscan_core::types::ExportRequest;
use tracing::{info, instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::pdf::reader::PdfReader;
use crate::pdf::writer::PdfWriter;

/// Title embedded in every exported PDF.
const DOCUMENT_TITLE: &str = "Scanned document";

/// Local `PdfCompositor` backed by `image` + `printpdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImagePdfCompositor;

impl ImagePdfCompositor {
    pub fn new() -> Self {
        Self
    }

    /// Compose synchronously. Exposed for callers that already run off the
    /// async runtime (benchmarks, CLI tools).
    #[instrument(
        skip_all,
        fields(pages = request.image_paths.len(), output = %request.output_name)
    )]
    pub fn compose_blocking(request: &ExportRequest) -> Result<PathBuf> {
        validate(request)?;

        let budget = request.page_size.scaled(request.quality);
        let mut writer = PdfWriter::new(DOCUMENT_TITLE, request.page_size);
        let mut expected = Vec::with_capacity(request.image_paths.len());
        for path in &request.image_paths {
            let page = ImageProcessor::open(path)?.fit_within(budget);
            expected.push(vec![(page.width(), page.height())]);
            writer.add_page(&page.into_dynamic())?;
        }
        let bytes = writer.finish()?;

        // Checked in memory so a bad document never reaches the output dir.
        let drawn = PdfReader::from_bytes(&bytes)?.drawn_image_sizes()?;
        if drawn != expected {
            warn!(?expected, ?drawn, "composed pages do not match the inputs");
            return Err(DocscanError::PdfError(format!(
                "composed {} pages that do not match the {} inputs",
                drawn.len(),
                expected.len()
            )));
        }

        std::fs::create_dir_all(&request.output_dir)?;
        let output_path = request.output_path();
        write_atomically(&output_path, &bytes)?;

        let absolute = std::path::absolute(&output_path)?;
        info!(
            path = %absolute.display(),
            pages = drawn.len(),
            bytes = bytes.len(),
            "PDF written"
        );
        Ok(absolute)
    }
}

#[async_trait]
impl PdfCompositor for ImagePdfCompositor {
    async fn compose(&self, request: &ExportRequest) -> Result<PathBuf> {
        let request = request.clone();
        tokio::task::spawn_blocking(move || Self::compose_blocking(&request))
            .await
            .map_err(|e| DocscanError::PdfError(format!("composition task failed: {e}")))?
    }
}

fn validate(request: &ExportRequest) -> Result<()> {
    if request.image_paths.is_empty() {
        return Err(DocscanError::InvalidRequest("no images to compose".into()));
    }

    let name = Path::new(&request.output_name);
    let is_plain_file_name = name.file_name().is_some_and(|n| n == name.as_os_str());
    let is_pdf = name
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_plain_file_name || !is_pdf {
        return Err(DocscanError::InvalidRequest(format!(
            "output name `{}` must be a plain file name ending in .pdf",
            request.output_name
        )));
    }

    if request.page_size.width == 0 || request.page_size.height == 0 {
        return Err(DocscanError::InvalidRequest("page size must be non-zero".into()));
    }

    Ok(())
}

/// Sidecar written next to `path` and renamed over it once complete.
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.part"))
}

/// Write `bytes` to `path` so that readers see either nothing or the whole
/// document. A failed write leaves no file behind.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let partial = partial_path(path);
    let written = File::create(&partial)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&partial, path));

    if let Err(e) = written {
        if let Err(cleanup) = std::fs::remove_file(&partial) {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    path = %partial.display(),
                    error = %cleanup,
                    "could not remove partial output"
                );
            }
        }
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscan_core::types::PageSize;
    use image::{DynamicImage, Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32, shade: u8) -> PathBuf {
        let path = dir.join(name);
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([shade, shade, shade])))
            .save(&path)
            .unwrap();
        path
    }

    fn drawn_pages(path: &Path) -> Vec<Vec<(u32, u32)>> {
        let bytes = std::fs::read(path).unwrap();
        PdfReader::from_bytes(&bytes)
            .unwrap()
            .drawn_image_sizes()
            .unwrap()
    }

    fn request(paths: Vec<PathBuf>, out: &Path) -> ExportRequest {
        ExportRequest {
            image_paths: paths,
            output_name: "DocScanner-test.pdf".into(),
            page_size: PageSize::A4_200DPI,
            quality: 1.0,
            output_dir: out.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn composes_one_page_per_image() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_png(dir.path(), "a.png", 30, 40, 10),
            write_png(dir.path(), "b.png", 40, 30, 120),
            write_png(dir.path(), "c.png", 25, 25, 250),
        ];
        let out = dir.path().join("Download");

        let path = ImagePdfCompositor::new()
            .compose(&request(paths, &out))
            .await
            .unwrap();

        assert!(path.is_absolute());
        assert_eq!(path, out.join("DocScanner-test.pdf"));
        assert_eq!(drawn_pages(&path).len(), 3);
        assert!(!out.join(".DocScanner-test.pdf.part").exists());
    }

    #[tokio::test]
    async fn page_n_shows_image_n() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_png(dir.path(), "first.png", 31, 41, 10),
            write_png(dir.path(), "second.png", 52, 22, 120),
            write_png(dir.path(), "third.png", 17, 77, 250),
        ];

        let path = ImagePdfCompositor::new()
            .compose(&request(paths, dir.path()))
            .await
            .unwrap();

        assert_eq!(
            drawn_pages(&path),
            vec![vec![(31, 41)], vec![(52, 22)], vec![(17, 77)]]
        );
    }

    #[tokio::test]
    async fn failed_write_leaves_no_file_behind() {
        let dir = TempDir::new().unwrap();
        let paths = vec![write_png(dir.path(), "a.png", 10, 10, 0)];
        let req = request(paths, dir.path());
        // A directory squatting on the output name makes the final rename fail.
        std::fs::create_dir(req.output_path()).unwrap();

        let err = ImagePdfCompositor::new().compose(&req).await.unwrap_err();
        assert!(matches!(err, DocscanError::Io(_)));
        assert!(req.output_path().is_dir());
        assert!(!dir.path().join(".DocScanner-test.pdf.part").exists());
    }

    #[tokio::test]
    async fn reduced_quality_still_writes_every_page() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_png(dir.path(), "a.png", 400, 600, 10),
            write_png(dir.path(), "b.png", 600, 400, 90),
        ];
        let mut req = request(paths, dir.path());
        req.page_size = PageSize { width: 200, height: 300 };
        req.quality = 0.25;

        let path = ImagePdfCompositor::new().compose(&req).await.unwrap();
        let drawn = drawn_pages(&path);
        assert_eq!(drawn.len(), 2);
        // 200x300 at quality 0.25 leaves a 50x75 budget per page.
        assert_eq!(drawn, vec![vec![(50, 75)], vec![(50, 33)]]);
    }

    #[tokio::test]
    async fn missing_image_fails_without_output() {
        let dir = TempDir::new().unwrap();
        let good = write_png(dir.path(), "a.png", 10, 10, 0);
        let req = request(vec![good, dir.path().join("gone.png")], dir.path());

        let err = ImagePdfCompositor::new().compose(&req).await.unwrap_err();
        assert!(matches!(err, DocscanError::Io(_)));
        assert!(!req.output_path().exists());
    }

    #[tokio::test]
    async fn undecodable_image_fails() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.jpg");
        std::fs::write(&bogus, b"not really a jpeg").unwrap();
        let req = request(vec![bogus], dir.path());

        let err = ImagePdfCompositor::new().compose(&req).await.unwrap_err();
        assert!(matches!(err, DocscanError::ImageError(_)));
        assert!(!req.output_path().exists());
    }

    #[test]
    fn empty_request_is_invalid() {
        let req = request(Vec::new(), Path::new("/tmp"));
        assert!(matches!(
            ImagePdfCompositor::compose_blocking(&req),
            Err(DocscanError::InvalidRequest(_))
        ));
    }

    #[test]
    fn output_name_must_be_plain_pdf_name() {
        let mut req = request(vec![PathBuf::from("/tmp/a.png")], Path::new("/tmp"));

        req.output_name = "../escape.pdf".into();
        assert!(matches!(validate(&req), Err(DocscanError::InvalidRequest(_))));

        req.output_name = "scan.png".into();
        assert!(matches!(validate(&req), Err(DocscanError::InvalidRequest(_))));

        req.output_name = "scan.PDF".into();
        assert!(validate(&req).is_ok());
    }
}
