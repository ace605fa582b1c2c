// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop capture: there is no camera + crop UI, so a file dialog stands in
// for it and the picked image is treated as an already-cropped page.

use async_trait::async_trait;
use docscan_core::error::Result;
use docscan_core::types::ImageRef;
use tracing::{debug, info};

use crate::traits::ImageCapture;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "bmp", "webp"];

/// Picks a page image with the native file dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDialogCapture;

impl FileDialogCapture {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageCapture for FileDialogCapture {
    async fn capture(&self) -> Result<Option<ImageRef>> {
        let picked = rfd::AsyncFileDialog::new()
            .set_title("Choose a cropped page")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
            .await;

        match picked {
            Some(handle) => {
                let path = std::path::absolute(handle.path())?;
                info!(path = %path.display(), "page image picked");
                Ok(Some(ImageRef::from_path(&path)))
            }
            None => {
                debug!("file dialog dismissed");
                Ok(None)
            }
        }
    }
}
