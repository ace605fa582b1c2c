// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — build a multi-page PDF from raster page images using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use docscan_core::error::DocscanError;
use docscan_core::types::PageSize;
use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

/// Accumulates one page per image and serialises them as a single PDF.
///
/// Pages appear in the order they were added. Every page has the same size;
/// each image is scaled to fill the page while keeping its aspect ratio, and
/// centred.
pub struct PdfWriter {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    /// Page size in device pixels.
    page_size: PageSize,
    /// Device pixels per inch, used to turn `page_size` into a page box.
    dpi: f32,
}

impl PdfWriter {
    /// Create a writer for pages of `page_size` device pixels.
    pub fn new(title: &str, page_size: PageSize) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            page_size,
            dpi: PageSize::DEFAULT_DPI,
        }
    }

    /// Page dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.page_size.dimensions_mm(self.dpi);
        (Mm(w_mm), Mm(h_mm))
    }

    /// Append `image` as the next page.
    #[instrument(
        skip_all,
        fields(page = self.pages.len() + 1, width = image.width(), height = image.height())
    )]
    pub fn add_page(&mut self, image: &DynamicImage) -> Result<(), DocscanError> {
        let img_width = image.width() as usize;
        let img_height = image.height() as usize;
        if img_width == 0 || img_height == 0 {
            return Err(DocscanError::ImageError("image has no pixels".into()));
        }

        // Convert to RGB8 for printpdf.
        let rgb_image = image.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: img_width,
            height: img_height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        let (page_w, page_h) = self.page_dimensions();
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;

        // Native size of the image at the page DPI.
        let img_w_pt = img_width as f32 / self.dpi * 72.0;
        let img_h_pt = img_height as f32 / self.dpi * 72.0;

        // Fill the page while preserving aspect ratio.
        let scale = (page_w_pt / img_w_pt).min(page_h_pt / img_h_pt);
        let rendered_w_pt = img_w_pt * scale;
        let rendered_h_pt = img_h_pt * scale;

        let x_offset = (page_w_pt - rendered_w_pt) / 2.0;
        let y_offset = (page_h_pt - rendered_h_pt) / 2.0;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x_offset)),
                translate_y: Some(Pt(y_offset)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(self.dpi),
                rotate: None,
            },
        }];

        self.pages.push(PdfPage::new(page_w, page_h, ops));
        debug!(rendered_w_pt, rendered_h_pt, scale, "Image placed on page");
        Ok(())
    }

    /// Serialise all pages added so far.
    pub fn finish(mut self) -> Result<Vec<u8>, DocscanError> {
        if self.pages.is_empty() {
            return Err(DocscanError::PdfError("no pages to write".into()));
        }

        let page_count = self.pages.len();
        self.doc.with_pages(self.pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings while saving");
        }

        info!(pages = page_count, bytes = output.len(), "PDF serialised");
        Ok(output)
    }
}
