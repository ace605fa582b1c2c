// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanner configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::PageSize;

/// Where Android keeps user-visible downloads.
#[cfg(target_os = "android")]
const ANDROID_DOWNLOAD_DIR: &str = "/storage/emulated/0/Download/";

/// Persistent scanner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Directory exported PDFs are written to. `None` uses the platform
    /// download directory.
    pub output_dir: Option<PathBuf>,
    /// Prefix of exported file names; the export id and `.pdf` follow it.
    pub file_prefix: String,
    /// Page size in device pixels.
    pub page_size: PageSize,
    /// Rendering quality in `(0, 1]`.
    pub quality: f32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            file_prefix: "DocScanner-".into(),
            page_size: PageSize::A4_200DPI,
            quality: 1.0,
        }
    }
}

impl ScannerConfig {
    /// The output directory with the platform default applied.
    pub fn resolved_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => default_output_dir(),
        }
    }

    /// Quality clamped into `(0, 1]`; non-finite values fall back to 1.0.
    pub fn effective_quality(&self) -> f32 {
        if self.quality.is_finite() && self.quality > 0.0 {
            self.quality.min(1.0)
        } else {
            1.0
        }
    }

    /// File name for an export with the given id.
    pub fn output_name(&self, export_id: &crate::ExportId) -> String {
        format!("{}{}.pdf", self.file_prefix, export_id)
    }
}

#[cfg(target_os = "android")]
fn default_output_dir() -> PathBuf {
    PathBuf::from(ANDROID_DOWNLOAD_DIR)
}

#[cfg(not(target_os = "android"))]
fn default_output_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DOWNLOAD_DIR") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join("Downloads");
    }
    std::env::temp_dir()
}
