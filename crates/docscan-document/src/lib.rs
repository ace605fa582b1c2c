// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-document — Turns captured page images into a multi-page PDF.
//
// Provides image loading and page fitting, a multi-page image PDF writer
// (`printpdf`), a minimal PDF inspector (`lopdf`), and the
// `ImagePdfCompositor` that implements the bridge's `PdfCompositor`.

pub mod compositor;
pub mod image;
pub mod pdf;

// Re-export the primary structs so callers can use `docscan_document::PdfReader` etc.
pub use compositor::ImagePdfCompositor;
pub use image::processor::ImageProcessor;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
