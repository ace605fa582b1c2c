// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Docscan document session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DocscanError, Result};

/// Identifier of a captured image, unique for the lifetime of its session.
///
/// Issued by the session's monotonic counter and never reused, even after
/// the image it named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub u64);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a cropped image asset, exactly as the capture capability
/// returned it (usually a `file://` URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build a `file://` reference from an absolute local path.
    ///
    /// Drive-letter paths keep the drive as the first path segment, so
    /// `C:\scans\a.jpg` becomes `file:///C:/scans/a.jpg`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        let normalized = if cfg!(windows) || has_drive_prefix(&raw) {
            raw.replace('\\', "/")
        } else {
            raw.into_owned()
        };
        let (drive, rest) = if has_drive_prefix(&normalized) {
            normalized.split_at(2)
        } else {
            ("", normalized.as_str())
        };
        let encoded: Vec<String> = rest
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        let encoded = encoded.join("/");
        if drive.is_empty() {
            Self(format!("file://{encoded}"))
        } else {
            Self(format!("file:///{drive}{encoded}"))
        }
    }

    /// The raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve this reference to a local filesystem path.
    ///
    /// Accepts `file://` URIs (empty or `localhost` authority, percent-encoded
    /// path) and bare absolute paths. Every other scheme, and relative paths,
    /// are rejected with [`DocscanError::UnsupportedImageRef`].
    pub fn to_local_path(&self) -> Result<PathBuf> {
        let raw = self.0.as_str();

        let Some((scheme, rest)) = split_scheme(raw) else {
            let path = Path::new(raw);
            if path.is_absolute() || has_drive_prefix(raw) {
                return Ok(path.to_path_buf());
            }
            return Err(DocscanError::UnsupportedImageRef(format!(
                "relative path `{raw}`"
            )));
        };

        if !scheme.eq_ignore_ascii_case("file") {
            return Err(DocscanError::UnsupportedImageRef(format!(
                "scheme `{scheme}` in `{raw}`"
            )));
        }

        let after_slashes = rest.strip_prefix("//").ok_or_else(|| {
            DocscanError::UnsupportedImageRef(format!("file URI without authority `{raw}`"))
        })?;

        let encoded_path = if after_slashes.starts_with('/') {
            after_slashes
        } else if let Some(path) = after_slashes.strip_prefix("localhost") {
            path
        } else {
            return Err(DocscanError::UnsupportedImageRef(format!(
                "remote file URI `{raw}`"
            )));
        };

        if !encoded_path.starts_with('/') {
            return Err(DocscanError::UnsupportedImageRef(format!(
                "file URI without a path `{raw}`"
            )));
        }

        let decoded = urlencoding::decode(encoded_path).map_err(|err| {
            DocscanError::UnsupportedImageRef(format!("`{raw}` is not valid UTF-8: {err}"))
        })?;

        // `/C:/dir/a.jpg` names a drive, not a root directory called `C:`.
        let decoded = decoded.into_owned();
        if let Some(local) = decoded.strip_prefix('/') {
            if has_drive_prefix(local) {
                return Ok(PathBuf::from(local));
            }
        }
        Ok(PathBuf::from(decoded))
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split `scheme:rest` per RFC 3986. Single-letter "schemes" are treated as
/// drive letters, not schemes.
fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = raw.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if scheme.len() < 2 || !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some((scheme, rest))
    } else {
        None
    }
}

/// `true` for `X:` followed by a separator or nothing.
fn has_drive_prefix(raw: &str) -> bool {
    match raw.as_bytes() {
        [letter, b':'] => letter.is_ascii_alphabetic(),
        [letter, b':', sep, ..] => letter.is_ascii_alphabetic() && matches!(sep, b'/' | b'\\'),
        _ => false,
    }
}

/// One accepted, cropped page awaiting export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedImage {
    pub id: ImageId,
    pub path: ImageRef,
}

/// Unique identifier for a single export, used to name the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportId(pub Uuid);

impl ExportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ExportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output page size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: u32,
    pub height: u32,
}

impl PageSize {
    /// ISO A4 rasterised at 200 DPI.
    pub const A4_200DPI: PageSize = PageSize {
        width: 1654,
        height: 2339,
    };

    /// Resolution at which device pixels map onto the PDF page box.
    pub const DEFAULT_DPI: f32 = 200.0;

    /// Page dimensions in millimetres (width, height) at the given DPI.
    pub fn dimensions_mm(&self, dpi: f32) -> (f32, f32) {
        let px_to_mm = 25.4 / dpi;
        (
            self.width as f32 * px_to_mm,
            self.height as f32 * px_to_mm,
        )
    }

    /// Pixel budget for a given rendering quality in `(0, 1]`. Never smaller
    /// than one pixel per side.
    pub fn scaled(&self, quality: f32) -> PageSize {
        let q = quality.clamp(f32::MIN_POSITIVE, 1.0);
        PageSize {
            width: ((self.width as f32 * q).round() as u32).max(1),
            height: ((self.height as f32 * q).round() as u32).max(1),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4_200DPI
    }
}

/// Everything the PDF compositor needs for one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Local image paths, one page each, in page order.
    pub image_paths: Vec<PathBuf>,
    /// File name of the PDF, e.g. `DocScanner-<uuid>.pdf`.
    pub output_name: String,
    pub page_size: PageSize,
    /// Rendering quality in `(0, 1]`.
    pub quality: f32,
    pub output_dir: PathBuf,
}

impl ExportRequest {
    /// Where the PDF will be written.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
    pub export_id: ExportId,
    /// Absolute path of the written PDF, as reported by the compositor.
    pub output_path: PathBuf,
    pub page_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_uri_resolves_to_path() {
        let r = ImageRef::new("file:///storage/emulated/0/Pictures/crop-1.jpg");
        assert_eq!(
            r.to_local_path().unwrap(),
            PathBuf::from("/storage/emulated/0/Pictures/crop-1.jpg")
        );
    }

    #[test]
    fn file_uri_is_percent_decoded() {
        let r = ImageRef::new("file:///tmp/my%20scan.jpg");
        assert_eq!(r.to_local_path().unwrap(), PathBuf::from("/tmp/my scan.jpg"));
    }

    #[test]
    fn localhost_authority_is_accepted() {
        let r = ImageRef::new("file://localhost/tmp/a.png");
        assert_eq!(r.to_local_path().unwrap(), PathBuf::from("/tmp/a.png"));
    }

    #[test]
    fn uppercase_scheme_is_accepted() {
        let r = ImageRef::new("FILE:///tmp/a.png");
        assert_eq!(r.to_local_path().unwrap(), PathBuf::from("/tmp/a.png"));
    }

    #[cfg(unix)]
    #[test]
    fn bare_absolute_path_passes_through() {
        let r = ImageRef::new("/tmp/page.jpg");
        assert_eq!(r.to_local_path().unwrap(), PathBuf::from("/tmp/page.jpg"));
    }

    #[test]
    fn content_scheme_is_rejected() {
        let r = ImageRef::new("content://media/external/images/42");
        assert!(matches!(
            r.to_local_path(),
            Err(DocscanError::UnsupportedImageRef(_))
        ));
    }

    #[test]
    fn remote_host_is_rejected() {
        let r = ImageRef::new("file://fileserver/share/a.jpg");
        assert!(matches!(
            r.to_local_path(),
            Err(DocscanError::UnsupportedImageRef(_))
        ));
    }

    #[test]
    fn relative_path_is_rejected() {
        let r = ImageRef::new("photos/a.jpg");
        assert!(matches!(
            r.to_local_path(),
            Err(DocscanError::UnsupportedImageRef(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn from_path_encodes_and_resolves_back() {
        let path = Path::new("/tmp/scans/page one.jpg");
        let r = ImageRef::from_path(path);
        assert_eq!(r.as_str(), "file:///tmp/scans/page%20one.jpg");
        assert_eq!(r.to_local_path().unwrap(), path);
    }

    #[test]
    fn drive_letter_path_becomes_local_file_uri() {
        let r = ImageRef::from_path(Path::new(r"C:\Users\me\scan one.jpg"));
        assert_eq!(r.as_str(), "file:///C:/Users/me/scan%20one.jpg");
        assert_eq!(
            r.to_local_path().unwrap(),
            PathBuf::from("C:/Users/me/scan one.jpg")
        );
    }

    #[test]
    fn drive_letter_file_uri_drops_leading_slash() {
        let r = ImageRef::new("file:///D:/Pictures/crop-2.png");
        assert_eq!(r.to_local_path().unwrap(), PathBuf::from("D:/Pictures/crop-2.png"));
    }

    #[test]
    fn bare_drive_letter_path_passes_through() {
        let r = ImageRef::new(r"C:\scans\a.jpg");
        assert_eq!(r.to_local_path().unwrap(), PathBuf::from(r"C:\scans\a.jpg"));
    }

    #[test]
    fn a4_maps_to_millimetres() {
        let (w, h) = PageSize::A4_200DPI.dimensions_mm(PageSize::DEFAULT_DPI);
        assert!((w - 210.0).abs() < 0.5, "width {w}");
        assert!((h - 297.0).abs() < 0.5, "height {h}");
    }

    #[test]
    fn scaled_page_size_is_clamped() {
        let full = PageSize::A4_200DPI.scaled(1.0);
        assert_eq!(full, PageSize::A4_200DPI);

        let over = PageSize::A4_200DPI.scaled(3.0);
        assert_eq!(over, PageSize::A4_200DPI);

        let half = PageSize::A4_200DPI.scaled(0.5);
        assert_eq!(half, PageSize { width: 827, height: 1170 });

        let tiny = PageSize::A4_200DPI.scaled(0.0);
        assert!(tiny.width >= 1 && tiny.height >= 1);
    }

    #[test]
    fn export_ids_differ() {
        assert_ne!(ExportId::new(), ExportId::new());
    }
}
