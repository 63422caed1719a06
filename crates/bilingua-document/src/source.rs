// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator traits consumed by the page extractor and the batch driver.

use std::path::Path;

use bilingua_core::error::Result;
use image::DynamicImage;

/// A decoded source document, addressed by 1-indexed page number.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text embedded in the page's content stream (may be empty).
    fn page_text(&self, page_number: u32) -> Result<String>;

    /// Rasterise the page at `scale` times the PDF user-space resolution.
    fn render_page(&self, page_number: u32, scale: f32) -> Result<DynamicImage>;
}

/// Opens a [`PageSource`] for an input file.
///
/// The batch driver opens each document inside its own scope, so the handle
/// is dropped as soon as that document is finished.
pub trait SourceOpener {
    type Source: PageSource;

    fn open(&self, path: &Path) -> Result<Self::Source>;
}

/// Recognises text in a raster image.
pub trait TextRecognizer {
    /// Run recognition with the given `+`-separated language packs.
    fn recognize(&self, image: &DynamicImage, languages: &str) -> Result<String>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for &T {
    fn recognize(&self, image: &DynamicImage, languages: &str) -> Result<String> {
        (**self).recognize(image, languages)
    }
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for Box<T> {
    fn recognize(&self, image: &DynamicImage, languages: &str) -> Result<String> {
        (**self).recognize(image, languages)
    }
}
