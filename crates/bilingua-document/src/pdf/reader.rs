// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open source PDFs and extract the text embedded in each page
// using the `lopdf` crate. Rasterisation is delegated to a `PageRenderer`.

use std::path::{Path, PathBuf};

use bilingua_core::error::BilinguaError;
use image::DynamicImage;
use lopdf::Document;
use tracing::{debug, info, instrument};

use bilingua_core::config::RenderSettings;

use crate::pdf::render::PageRenderer;
use crate::source::{PageSource, SourceOpener};

/// An open source PDF.
///
/// Holds the parsed `lopdf::Document` for the lifetime of the reader; the
/// handle is released when the reader is dropped.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file. Required for rendering.
    source_path: Option<PathBuf>,
    /// Rasteriser for pages without embedded text.
    renderer: Option<PageRenderer>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BilinguaError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BilinguaError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.to_path_buf()),
            renderer: None,
        })
    }

    /// Attach the rasteriser used for the OCR path.
    pub fn with_renderer(mut self, renderer: PageRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    // -- Extraction -----------------------------------------------------------

    /// Extract the text of a single page (1-indexed).
    pub fn extract_page_text(&self, page_number: u32) -> Result<String, BilinguaError> {
        let total = self.page_count();
        if page_number == 0 || page_number as usize > total {
            return Err(BilinguaError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number, total
            )));
        }

        self.document.extract_text(&[page_number]).map_err(|err| {
            BilinguaError::PdfError(format!(
                "text extraction failed on page {}: {}",
                page_number, err
            ))
        })
    }
}

impl PageSource for PdfReader {
    fn page_count(&self) -> u32 {
        PdfReader::page_count(self) as u32
    }

    fn page_text(&self, page_number: u32) -> Result<String, BilinguaError> {
        self.extract_page_text(page_number)
    }

    fn render_page(&self, page_number: u32, scale: f32) -> Result<DynamicImage, BilinguaError> {
        let renderer = self.renderer.as_ref().ok_or_else(|| {
            BilinguaError::RenderError("no page renderer configured".to_string())
        })?;
        let path = self.source_path.as_deref().ok_or_else(|| {
            BilinguaError::RenderError("in-memory PDFs cannot be rendered".to_string())
        })?;
        renderer.render(path, page_number, scale)
    }
}

/// Opens files as [`PdfReader`]s with a page renderer attached.
#[derive(Debug, Clone)]
pub struct PdfOpener {
    render: RenderSettings,
}

impl PdfOpener {
    pub fn new(render: RenderSettings) -> Self {
        Self { render }
    }
}

impl SourceOpener for PdfOpener {
    type Source = PdfReader;

    fn open(&self, path: &Path) -> Result<PdfReader, BilinguaError> {
        Ok(PdfReader::open(path)?.with_renderer(PageRenderer::new(self.render.clone())))
    }
}
