// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — inspect a composed PDF with the `lopdf` crate.

use docscan_core::error::DocscanError;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, instrument};

/// Read-only view of a PDF held in memory.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, DocscanError> {
        let document = Document::load_mem(data).map_err(|err| {
            DocscanError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    /// Pixel size of every image each page draws, pages in document order and
    /// images in drawing order.
    ///
    /// Walks the content stream rather than the page resources, since a page
    /// may list images it never paints.
    pub fn drawn_image_sizes(&self) -> Result<Vec<Vec<(u32, u32)>>, DocscanError> {
        let mut pages = Vec::new();
        for page_id in self.document.get_pages().into_values() {
            let content = self
                .document
                .get_and_decode_page_content(page_id)
                .map_err(pdf_error)?;

            let mut drawn = Vec::new();
            for op in content.operations.iter().filter(|op| op.operator == "Do") {
                let name = op
                    .operands
                    .first()
                    .ok_or_else(|| DocscanError::PdfError("`Do` without an operand".into()))?
                    .as_name()
                    .map_err(pdf_error)?;
                let xobject = self.page_xobject(page_id, name)?;
                let is_image = xobject
                    .dict
                    .get(b"Subtype")
                    .and_then(Object::as_name)
                    .is_ok_and(|subtype| subtype == b"Image");
                if !is_image {
                    continue;
                }
                drawn.push((
                    dimension(&xobject.dict, b"Width")?,
                    dimension(&xobject.dict, b"Height")?,
                ));
            }
            pages.push(drawn);
        }
        Ok(pages)
    }

    /// Look up the XObject a page refers to as `name`, following inherited
    /// resources.
    fn page_xobject(&self, page_id: ObjectId, name: &[u8]) -> Result<&Stream, DocscanError> {
        let (inline, inherited) = self
            .document
            .get_page_resources(page_id)
            .map_err(pdf_error)?;
        let resources = inline.into_iter().chain(
            inherited
                .into_iter()
                .filter_map(|id| self.document.get_dictionary(id).ok()),
        );

        for resources in resources {
            let Ok(xobjects) = resources
                .get(b"XObject")
                .and_then(|xobjects| self.resolve_dict(xobjects))
            else {
                continue;
            };
            if let Ok(id) = xobjects.get(name).and_then(Object::as_reference) {
                return self
                    .document
                    .get_object(id)
                    .and_then(Object::as_stream)
                    .map_err(pdf_error);
            }
        }

        Err(DocscanError::PdfError(format!(
            "page draws unknown XObject `{}`",
            String::from_utf8_lossy(name)
        )))
    }

    fn resolve_dict<'a>(&'a self, object: &'a Object) -> lopdf::Result<&'a Dictionary> {
        match object {
            Object::Reference(id) => self.document.get_dictionary(*id),
            other => other.as_dict(),
        }
    }
}

fn dimension(dict: &Dictionary, key: &[u8]) -> Result<u32, DocscanError> {
    let value = dict.get(key).and_then(Object::as_i64).map_err(pdf_error)?;
    u32::try_from(value).map_err(|_| {
        DocscanError::PdfError(format!(
            "image {} out of range: {value}",
            String::from_utf8_lossy(key)
        ))
    })
}

fn pdf_error(err: lopdf::Error) -> DocscanError {
    DocscanError::PdfError(err.to_string())
}
