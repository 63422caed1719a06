// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bilingua pipeline.

use serde::{Deserialize, Serialize};

/// How the text of a page was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    /// Extracted directly from the PDF content stream.
    NativeText,
    /// Recognised from a rendered image of the page.
    OcrText,
    /// Neither path produced text; the record holds a placeholder.
    Unrecognized,
}

/// The extracted content of one source page.
///
/// Created once by the extractor and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    page_number: u32,
    text: String,
    kind: PageKind,
}

impl PageRecord {
    pub fn new(page_number: u32, text: impl Into<String>, kind: PageKind) -> Self {
        Self {
            page_number,
            text: text.into(),
            kind,
        }
    }

    /// 1-indexed position of the page in the source document.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// Whether the page carries translatable content.
    pub fn is_translatable(&self) -> bool {
        self.kind != PageKind::Unrecognized
    }
}

/// Outcome of translating one paragraph.
///
/// `failed` is set when every attempt failed; `translated` then holds a
/// fallback string that embeds `source` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub source: String,
    pub translated: String,
    pub failed: bool,
}

impl TranslationResult {
    pub fn success(source: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translated: translated.into(),
            failed: false,
        }
    }

    /// Input that needs no translation is passed through unchanged.
    pub fn passthrough(source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            translated: source.clone(),
            source,
            failed: false,
        }
    }

    pub fn fallback(source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            translated: format!("[translation failed: {source}]"),
            source,
            failed: true,
        }
    }
}

/// Output document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Rendered bilingual PDF.
    Pdf,
    /// The document model serialised as pretty JSON.
    #[default]
    Json,
}

impl OutputFormat {
    /// File-name suffix appended to the input stem.
    ///
    /// The suffix differs from the input's `.pdf` so outputs land next to
    /// their sources without clobbering them.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Pdf => ".bilingual.pdf",
            Self::Json => ".bilingual.json",
        }
    }
}
