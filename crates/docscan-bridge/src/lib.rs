// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Docscan — capability bridge.
//
// Defines the narrow traits the document session depends on (image capture,
// PDF composition, user notification) and picks a capture implementation for
// the target platform.

pub mod notify;
pub mod traits;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

#[cfg(any(target_os = "ios", target_os = "android"))]
pub mod stub;

pub use notify::{ChannelNotifier, LogNotifier};
pub use traits::{ImageCapture, Notifier, PdfCompositor};

/// Capture implementation for the target operating system.
///
/// Desktop builds pick cropped page images with a file dialog. Mobile camera
/// backends are not wired yet, so mobile targets get a capture that reports
/// `PlatformUnavailable`.
pub fn platform_capture() -> Box<dyn ImageCapture> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Box::new(desktop::FileDialogCapture::new())
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        Box::new(stub::UnavailableCapture)
    }
}
