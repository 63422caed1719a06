// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page content extraction with a native-text / OCR fallback policy.
//
// Every page yields exactly one `PageRecord`, in source order. Pages with
// embedded text never touch the OCR path; pages without it are rendered and
// recognised, and any rendering or recognition failure is folded into an
// `Unrecognized` record so one bad page never aborts a document.

use bilingua_core::config::{OcrSettings, RENDER_SCALE};
use bilingua_core::error::BilinguaError;
use bilingua_core::labels::{empty_ocr_placeholder, ocr_error_placeholder};
use bilingua_core::types::{PageKind, PageRecord};
use tracing::{info, instrument, warn};

use crate::source::{PageSource, TextRecognizer};

/// Produces one [`PageRecord`] per page of a [`PageSource`].
pub struct PageContentExtractor<R> {
    recognizer: R,
    languages: String,
    scale: f32,
}

impl<R: TextRecognizer> PageContentExtractor<R> {
    /// Build an extractor around an OCR engine and its language selection.
    pub fn new(recognizer: R, settings: &OcrSettings) -> Self {
        Self {
            recognizer,
            languages: settings.languages.clone(),
            scale: RENDER_SCALE,
        }
    }

    /// Override the rasterisation scale used before OCR.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Extract every page of `source`, in order.
    #[instrument(skip_all, fields(pages = source.page_count()))]
    pub fn extract<S: PageSource + ?Sized>(&self, source: &S) -> Vec<PageRecord> {
        (1..=source.page_count())
            .map(|page_number| self.extract_page(source, page_number))
            .collect()
    }

    fn extract_page<S: PageSource + ?Sized>(&self, source: &S, page_number: u32) -> PageRecord {
        let native = source.page_text(page_number).unwrap_or_else(|err| {
            warn!(page_number, error = %err, "native text extraction failed; trying OCR");
            String::new()
        });

        let native = native.trim();
        if !native.is_empty() {
            return PageRecord::new(page_number, native, PageKind::NativeText);
        }

        info!(page_number, "Scanned page detected, running OCR");
        match self.ocr_page(source, page_number) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    info!(page_number, "OCR found no text");
                    PageRecord::new(page_number, empty_ocr_placeholder(), PageKind::Unrecognized)
                } else {
                    info!(
                        page_number,
                        char_count = text.chars().count(),
                        "OCR recognition succeeded"
                    );
                    PageRecord::new(page_number, text, PageKind::OcrText)
                }
            }
            Err(err) => {
                warn!(page_number, error = %err, "OCR failed");
                PageRecord::new(
                    page_number,
                    ocr_error_placeholder(&err.to_string()),
                    PageKind::Unrecognized,
                )
            }
        }
    }

    fn ocr_page<S: PageSource + ?Sized>(
        &self,
        source: &S,
        page_number: u32,
    ) -> Result<String, BilinguaError> {
        let image = source.render_page(page_number, self.scale)?;
        self.recognizer.recognize(&image, &self.languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    use bilingua_core::labels::is_placeholder;
    use image::{DynamicImage, RgbImage};

    /// In-memory document: `None` pages fail native extraction.
    struct FakeSource {
        pages: Vec<Option<&'static str>>,
        render_fails: bool,
        rendered: RefCell<Vec<(u32, f32)>>,
    }

    impl FakeSource {
        fn new(pages: Vec<Option<&'static str>>) -> Self {
            Self {
                pages,
                render_fails: false,
                rendered: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageSource for FakeSource {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn page_text(&self, page_number: u32) -> Result<String, BilinguaError> {
            self.pages[page_number as usize - 1]
                .map(str::to_string)
                .ok_or_else(|| BilinguaError::PdfError("undecodable content".into()))
        }

        fn render_page(&self, page_number: u32, scale: f32) -> Result<DynamicImage, BilinguaError> {
            self.rendered.borrow_mut().push((page_number, scale));
            if self.render_fails {
                return Err(BilinguaError::RenderError("pdftoppm missing".into()));
            }
            Ok(DynamicImage::ImageRgb8(RgbImage::new(4, 4)))
        }
    }

    /// Recogniser returning a canned answer and counting calls.
    struct FakeOcr {
        answer: Result<&'static str, &'static str>,
        calls: Cell<usize>,
        languages: RefCell<Vec<String>>,
    }

    impl FakeOcr {
        fn returning(answer: Result<&'static str, &'static str>) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
                languages: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextRecognizer for FakeOcr {
        fn recognize(&self, _image: &DynamicImage, languages: &str) -> Result<String, BilinguaError> {
            self.calls.set(self.calls.get() + 1);
            self.languages.borrow_mut().push(languages.to_string());
            self.answer
                .map(str::to_string)
                .map_err(|detail| BilinguaError::OcrError(detail.to_string()))
        }
    }

    fn extractor(ocr: &FakeOcr) -> PageContentExtractor<&FakeOcr> {
        PageContentExtractor::new(ocr, &OcrSettings::default())
    }

    #[test]
    fn native_text_never_runs_ocr() {
        let ocr = FakeOcr::returning(Ok("should not be used"));
        let source = FakeSource::new(vec![Some("  Intro\n\nBody  "), Some("Second")]);

        let records = extractor(&ocr).extract(&source);

        assert_eq!(ocr.calls.get(), 0);
        assert!(source.rendered.borrow().is_empty());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind(), PageKind::NativeText);
        assert_eq!(records[0].text(), "Intro\n\nBody");
        assert_eq!(records[1].page_number(), 2);
    }

    #[test]
    fn empty_page_is_rendered_at_double_scale_and_recognised_once() {
        let ocr = FakeOcr::returning(Ok("\n  Scanned words \n"));
        let source = FakeSource::new(vec![Some("   \n")]);

        let records = extractor(&ocr).extract(&source);

        assert_eq!(ocr.calls.get(), 1);
        assert_eq!(source.rendered.borrow().as_slice(), &[(1, 2.0)]);
        assert_eq!(ocr.languages.borrow().as_slice(), &["eng+chi_sim".to_string()]);
        assert_eq!(records[0].kind(), PageKind::OcrText);
        assert_eq!(records[0].text(), "Scanned words");
    }

    #[test]
    fn empty_ocr_result_is_unrecognized() {
        let ocr = FakeOcr::returning(Ok("  \n "));
        let source = FakeSource::new(vec![Some("")]);

        let records = extractor(&ocr).extract(&source);

        assert_eq!(ocr.calls.get(), 1);
        assert_eq!(records[0].kind(), PageKind::Unrecognized);
        assert_eq!(records[0].text(), empty_ocr_placeholder());
    }

    #[test]
    fn ocr_error_is_unrecognized_with_detail() {
        let ocr = FakeOcr::returning(Err("chi_sim.traineddata missing"));
        let source = FakeSource::new(vec![Some("")]);

        let records = extractor(&ocr).extract(&source);

        assert_eq!(records[0].kind(), PageKind::Unrecognized);
        assert!(is_placeholder(records[0].text()));
        assert!(records[0].text().contains("chi_sim.traineddata missing"));
    }

    #[test]
    fn render_error_is_unrecognized_without_calling_ocr() {
        let ocr = FakeOcr::returning(Ok("unused"));
        let mut source = FakeSource::new(vec![Some("")]);
        source.render_fails = true;

        let records = extractor(&ocr).extract(&source);

        assert_eq!(ocr.calls.get(), 0);
        assert_eq!(records[0].kind(), PageKind::Unrecognized);
        assert!(records[0].text().contains("pdftoppm missing"));
    }

    #[test]
    fn native_extraction_error_falls_back_to_ocr() {
        let ocr = FakeOcr::returning(Ok("recovered"));
        let source = FakeSource::new(vec![None]);

        let records = extractor(&ocr).extract(&source);

        assert_eq!(ocr.calls.get(), 1);
        assert_eq!(records[0].kind(), PageKind::OcrText);
    }

    #[test]
    fn covers_every_page_in_order() {
        let ocr = FakeOcr::returning(Ok(""));
        let source = FakeSource::new(vec![Some("a"), Some(""), None, Some("d")]);

        let records = extractor(&ocr).with_scale(1.5).extract(&source);

        let numbers: Vec<u32> = records.iter().map(PageRecord::page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(ocr.calls.get(), 2);
        assert!(source.rendered.borrow().iter().all(|(_, scale)| *scale == 1.5));
    }
}
