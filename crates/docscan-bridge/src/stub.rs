// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub capture for mobile targets whose native camera bridge is not wired.

use async_trait::async_trait;
use docscan_core::error::{DocscanError, Result};
use docscan_core::types::ImageRef;

use crate::traits::ImageCapture;

/// Capture that always reports `PlatformUnavailable`.
pub struct UnavailableCapture;

#[async_trait]
impl ImageCapture for UnavailableCapture {
    async fn capture(&self) -> Result<Option<ImageRef>> {
        tracing::warn!("ImageCapture::capture called on stub bridge");
        Err(DocscanError::PlatformUnavailable)
    }
}
