// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document session state.
//
// Invariants:
//   - `images` is in capture order (newest last);
//   - ids in `images` are pairwise distinct, and no id is ever issued twice
//     because `next_id` only grows.

use docscan_core::types::{CapturedImage, ImageId, ImageRef};

/// Ordered collection of captured pages for the current run.
#[derive(Debug, Default, Clone)]
pub struct DocumentSession {
    images: Vec<CapturedImage>,
    /// Next id to hand out. Survives `clear()`.
    next_id: u64,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages in capture order.
    pub fn images(&self) -> &[CapturedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Append a newly captured page under a fresh id.
    pub fn append(&mut self, path: ImageRef) -> CapturedImage {
        let image = CapturedImage {
            id: ImageId(self.next_id),
            path,
        };
        self.next_id += 1;
        self.images.push(image.clone());
        image
    }

    /// Remove the page with `id`. Returns `false` (and changes nothing) if
    /// no such page exists.
    pub fn remove(&mut self, id: ImageId) -> bool {
        match self.images.iter().position(|img| img.id == id) {
            Some(index) => {
                // `remove` shifts, keeping the relative order of the rest.
                self.images.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every page. The id counter is not rewound.
    pub fn clear(&mut self) {
        self.images.clear();
    }
}
