// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Docscan.

use thiserror::Error;

/// Top-level error type for all Docscan operations.
#[derive(Debug, Error)]
pub enum DocscanError {
    // -- Capture errors --
    #[error("capture cancelled by user")]
    CaptureCancelled,

    #[error("capture failed: {0}")]
    CaptureFailed(String),

    // -- Export errors --
    #[error("nothing to export: the session has no images")]
    ExportInvalidState,

    #[error("an export is already in progress")]
    ExportBusy,

    #[error("export failed: {0}")]
    ExportFailed(String),

    // -- Document errors --
    #[error("unsupported image reference: {0}")]
    UnsupportedImageRef(String),

    #[error("invalid compositor request: {0}")]
    InvalidRequest(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocscanError>;
