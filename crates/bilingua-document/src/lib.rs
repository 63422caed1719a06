// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bilingua-document — Document processing for the Bilingua converter.
//
// Provides PDF operations (open, native text extraction, page rasterisation),
// optical character recognition for scanned pages, the per-page extractor that
// chooses between the two, and writers that persist the bilingual document.

pub mod export;
pub mod extract;
pub mod pdf;
pub mod scan;
pub mod source;

// Re-export the primary structs so callers can use `bilingua_document::PdfReader` etc.
pub use export::{DocumentWriter, JsonWriter, writer_for};
pub use extract::PageContentExtractor;
pub use pdf::reader::{PdfOpener, PdfReader};
pub use pdf::render::PageRenderer;
pub use pdf::writer::PdfWriter;
pub use scan::tesseract::TesseractEngine;
pub use source::{PageSource, SourceOpener, TextRecognizer};

#[cfg(feature = "ocr")]
pub use scan::ocr::OcrEngine;
