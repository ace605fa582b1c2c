// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode a captured page and shrink it to the pixel budget
// of the output page. Operates on in-memory images using the `image` crate.

use docscan_core::error::DocscanError;
use docscan_core::types::PageSize;
use image::DynamicImage;
use tracing::{debug, info, instrument};

/// Single in-memory page image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, so calls
/// chain:
///
/// ```ignore
/// let page = ImageProcessor::open("crop.jpg")?
///     .fit_within(PageSize::A4_200DPI)
///     .into_dynamic();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, DocscanError> {
        let path = path.as_ref();
        // Missing/unreadable files surface as I/O errors, not decode errors.
        let bytes = std::fs::read(path)?;
        let img = image::load_from_memory(&bytes).map_err(|err| {
            DocscanError::ImageError(format!("failed to decode {}: {}", path.display(), err))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Downscale to fit within `budget`, preserving aspect ratio. Images that
    /// already fit are returned untouched; this never upscales.
    pub fn fit_within(self, budget: PageSize) -> Self {
        if self.image.width() <= budget.width && self.image.height() <= budget.height {
            return self;
        }
        debug!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            max_w = budget.width,
            max_h = budget.height,
            "Downscaling page image"
        );
        let resized = self.image.resize(
            budget.width,
            budget.height,
            image::imageops::FilterType::Lanczos3,
        );
        Self { image: resized }
    }
}
