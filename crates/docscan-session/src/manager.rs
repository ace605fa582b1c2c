// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session manager — owns the document session and mediates between it and
// the capture, compositor, and notifier capabilities.
//
// The session sits behind a std `Mutex` that is only held for the duration of
// a list mutation or snapshot, never across an `.await`. Exports are
// serialised by a single in-flight flag rather than a lock, so a second export
// is rejected immediately instead of queueing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use docscan_bridge::{ImageCapture, Notifier, PdfCompositor};
use docscan_core::ScannerConfig;
use docscan_core::error::{DocscanError, Result};
use docscan_core::types::{CapturedImage, ExportId, ExportOutcome, ExportRequest, ImageId};
use tracing::{debug, error, info, instrument, warn};

use crate::session::DocumentSession;

/// Everything the view needs to render the scanner screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub images: Vec<CapturedImage>,
    pub exporting: bool,
    pub can_capture: bool,
    pub can_export: bool,
    pub can_reset: bool,
}

/// Drives one document session.
///
/// Cheap to share: wrap in an `Arc` and hand it to the UI.
pub struct SessionManager {
    session: Mutex<DocumentSession>,
    exporting: AtomicBool,
    capture: Arc<dyn ImageCapture>,
    compositor: Arc<dyn PdfCompositor>,
    notifier: Arc<dyn Notifier>,
    config: ScannerConfig,
}

impl SessionManager {
    pub fn new(
        capture: Arc<dyn ImageCapture>,
        compositor: Arc<dyn PdfCompositor>,
        notifier: Arc<dyn Notifier>,
        config: ScannerConfig,
    ) -> Self {
        Self {
            session: Mutex::new(DocumentSession::new()),
            exporting: AtomicBool::new(false),
            capture,
            compositor,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// A poisoned lock still holds a consistent session: every mutation is a
    /// single `Vec` call that cannot leave it half-updated.
    fn session(&self) -> MutexGuard<'_, DocumentSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -- Queries -------------------------------------------------------------

    /// Snapshot of the pages in capture order.
    pub fn images(&self) -> Vec<CapturedImage> {
        self.session().images().to_vec()
    }

    pub fn len(&self) -> usize {
        self.session().len()
    }

    pub fn is_empty(&self) -> bool {
        self.session().is_empty()
    }

    /// Whether an export is currently in flight.
    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    pub fn view_state(&self) -> ViewState {
        let images = self.images();
        let exporting = self.is_exporting();
        let has_images = !images.is_empty();
        ViewState {
            images,
            exporting,
            can_capture: true,
            can_export: has_images && !exporting,
            can_reset: has_images,
        }
    }

    // -- Operations ----------------------------------------------------------

    /// Capture one page and append it to the session.
    ///
    /// Cancellation returns `CaptureCancelled` quietly. Any other capture
    /// failure is reported through the notifier and returned as
    /// `CaptureFailed`. The session is untouched on every error path.
    pub async fn capture(&self) -> Result<CapturedImage> {
        match self.capture.capture().await {
            Ok(Some(path)) => {
                let image = self.session().append(path);
                info!(id = %image.id, path = %image.path, "page captured");
                Ok(image)
            }
            Ok(None) | Err(DocscanError::CaptureCancelled) => {
                debug!("capture cancelled");
                Err(DocscanError::CaptureCancelled)
            }
            Err(e) => {
                let detail = match e {
                    DocscanError::CaptureFailed(detail) => detail,
                    other => other.to_string(),
                };
                warn!(error = %detail, "capture failed");
                self.notifier.notify(&format!("Capture failed: {detail}"));
                Err(DocscanError::CaptureFailed(detail))
            }
        }
    }

    /// Remove the page with `id`, if present. Returns whether a page was
    /// removed.
    pub fn delete(&self, id: ImageId) -> bool {
        let removed = self.session().remove(id);
        if removed {
            info!(%id, "page deleted");
        } else {
            debug!(%id, "delete: no such page");
        }
        removed
    }

    /// Drop every page.
    pub fn reset(&self) {
        let mut session = self.session();
        let dropped = session.len();
        session.clear();
        info!(dropped, "session reset");
    }

    /// Compile the current pages, in order, into one PDF.
    ///
    /// Never mutates the session. Fails with `ExportBusy` while another export
    /// is in flight and with `ExportInvalidState` when there are no pages;
    /// neither invokes the compositor. The outcome, success or failure, is
    /// reported through the notifier.
    #[instrument(skip(self))]
    pub async fn export(&self) -> Result<ExportOutcome> {
        let _guard = ExportGuard::acquire(&self.exporting).ok_or_else(|| {
            debug!("export rejected: already in flight");
            DocscanError::ExportBusy
        })?;

        // Later deletes don't affect this export's pages.
        let images = self.images();
        if images.is_empty() {
            debug!("export rejected: session is empty");
            return Err(DocscanError::ExportInvalidState);
        }

        let export_id = ExportId::new();
        let image_paths = match images
            .iter()
            .map(|img| img.path.to_local_path())
            .collect::<Result<Vec<_>>>()
        {
            Ok(paths) => paths,
            Err(e) => return Err(self.export_failed(e)),
        };

        let request = ExportRequest {
            image_paths,
            output_name: self.config.output_name(&export_id),
            page_size: self.config.page_size,
            quality: self.config.effective_quality(),
            output_dir: self.config.resolved_output_dir(),
        };
        info!(
            %export_id,
            pages = request.image_paths.len(),
            output_dir = %request.output_dir.display(),
            "exporting PDF"
        );

        match self.compositor.compose(&request).await {
            Ok(output_path) => {
                info!(%export_id, path = %output_path.display(), "PDF saved");
                self.notifier.notify(&format!(
                    "Your document has been saved at: {}",
                    output_path.display()
                ));
                Ok(ExportOutcome {
                    export_id,
                    output_path,
                    page_count: request.image_paths.len(),
                })
            }
            Err(e) => Err(self.export_failed(e)),
        }
    }

    fn export_failed(&self, e: DocscanError) -> DocscanError {
        let detail = e.to_string();
        error!(error = %detail, "export failed");
        self.notifier.notify(&format!("Error: {detail}"));
        DocscanError::ExportFailed(detail)
    }
}

/// Holds the in-flight flag; clears it on drop, including when the export
/// future is dropped mid-flight.
struct ExportGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExportGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
