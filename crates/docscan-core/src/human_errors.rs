// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the scanner screen.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The scanner screen colours its toast by severity.

use crate::error::DocscanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing went wrong; the user changed their mind.
    Benign,
    /// User must do something (grant a permission, free up space, add a page).
    ActionRequired,
    /// Cannot be fixed by retrying — broken file, unsupported source, etc.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
    /// Severity level (picks the toast colour).
    pub severity: Severity,
}

/// Convert a `DocscanError` into a `HumanError`.
pub fn humanize_error(err: &DocscanError) -> HumanError {
    match err {
        DocscanError::CaptureCancelled => HumanError {
            message: "No page was added.".into(),
            suggestion: "Tap \"Scan document\" whenever you're ready.".into(),
            severity: Severity::Benign,
        },

        DocscanError::CaptureFailed(detail) => HumanError {
            message: "The camera couldn't take that picture.".into(),
            suggestion: format!(
                "Check that the app may use the camera, then try again. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        DocscanError::ExportInvalidState => HumanError {
            message: "There are no pages to save yet.".into(),
            suggestion: "Scan at least one page first.".into(),
            severity: Severity::ActionRequired,
        },

        DocscanError::ExportBusy => HumanError {
            message: "Your PDF is still being saved.".into(),
            suggestion: "Wait for it to finish before saving again.".into(),
            severity: Severity::Benign,
        },

        DocscanError::ExportFailed(detail) => humanize_export_failure(detail),

        DocscanError::UnsupportedImageRef(_) => HumanError {
            message: "One of the pages can't be found on this device.".into(),
            suggestion: "Delete that page and scan it again.".into(),
            severity: Severity::Permanent,
        },

        DocscanError::InvalidRequest(detail) => HumanError {
            message: "The PDF couldn't be set up.".into(),
            suggestion: format!("Check the output settings. ({detail})"),
            severity: Severity::Permanent,
        },

        DocscanError::PdfError(_) => HumanError {
            message: "The PDF couldn't be created.".into(),
            suggestion: "Try again. If it keeps happening, reset and scan the pages again.".into(),
            severity: Severity::Permanent,
        },

        DocscanError::ImageError(_) => HumanError {
            message: "There's a problem with one of the pages.".into(),
            suggestion: "The picture may be damaged. Delete it and scan that page again.".into(),
            severity: Severity::Permanent,
        },

        DocscanError::Io(io) => humanize_export_failure(&io.to_string()),

        DocscanError::Serialization(_) => HumanError {
            message: "Your settings couldn't be read.".into(),
            suggestion: "Default settings are being used instead.".into(),
            severity: Severity::Benign,
        },

        DocscanError::Bridge(detail) => HumanError {
            message: "Something went wrong talking to the device.".into(),
            suggestion: format!("Restart the app and try again. ({detail})"),
            severity: Severity::Permanent,
        },

        DocscanError::PlatformUnavailable => HumanError {
            message: "This isn't available on this device.".into(),
            suggestion: "Try again on a phone with a camera.".into(),
            severity: Severity::Permanent,
        },
    }
}

/// Classify an export failure from its detail text.
fn humanize_export_failure(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("permission denied") {
        HumanError {
            message: "The app isn't allowed to save files there.".into(),
            suggestion: "Allow storage access in the system settings, then try again.".into(),
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("no space") || lower.contains("disk full") {
        HumanError {
            message: "Your device is out of storage.".into(),
            suggestion: "Free up some space, then try again.".into(),
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("no such file") || lower.contains("not found") {
        HumanError {
            message: "One of the pages is missing.".into(),
            suggestion: "Delete that page and scan it again.".into(),
            severity: Severity::Permanent,
        }
    } else {
        HumanError {
            message: "The PDF couldn't be saved.".into(),
            suggestion: format!("Try again. (Detail: {detail})"),
            severity: Severity::Permanent,
        }
    }
}
