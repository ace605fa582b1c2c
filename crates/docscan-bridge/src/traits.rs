// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the capabilities the document
// session calls out to.

use std::path::PathBuf;

use async_trait::async_trait;
use docscan_core::error::Result;
use docscan_core::types::{ExportRequest, ImageRef};

/// Present the camera + crop UI and hand back the cropped page.
#[async_trait]
pub trait ImageCapture: Send + Sync {
    /// Capture and crop one page.
    ///
    /// Returns `Ok(None)` if the user cancelled. The returned reference points
    /// at an asset owned by the capture backend.
    async fn capture(&self) -> Result<Option<ImageRef>>;
}

/// Render an ordered list of images into one multi-page PDF.
#[async_trait]
pub trait PdfCompositor: Send + Sync {
    /// Write one page per image, in input order, and return the absolute
    /// path of the PDF.
    async fn compose(&self, request: &ExportRequest) -> Result<PathBuf>;
}

/// Best-effort, user-visible transient message (a toast).
pub trait Notifier: Send + Sync {
    /// Show `message`. Never fails; delivery is not guaranteed.
    fn notify(&self, message: &str);
}
