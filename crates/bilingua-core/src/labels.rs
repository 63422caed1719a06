// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-visible strings placed into the bilingual document.

use serde::{Deserialize, Serialize};

/// Prefix shared by every unrecognized-page placeholder.
///
/// The translation client skips any text containing it.
pub const UNRECOGNIZED_MARKER: &str = "[扫描图片页面";

/// Labels written into the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Localized half of the page heading; `{n}` is replaced by the page number.
    pub page_localized: String,
    /// Source-language half of the page heading.
    pub page_source: String,
    /// Advisory shown above OCR-derived content.
    pub ocr_notice: String,
    /// Label above the original paragraph.
    pub source_label: String,
    /// Label above the translated paragraph.
    pub translated_label: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            page_localized: "第 {n} 页".into(),
            page_source: "Page {n}".into(),
            ocr_notice: "【注意：此页面通过OCR识别提取】".into(),
            source_label: "【英文原文】".into(),
            translated_label: "【中文翻译】".into(),
        }
    }
}

impl Labels {
    /// Bilingual page heading, e.g. `第 3 页 / Page 3`.
    pub fn page_heading(&self, page_number: u32) -> String {
        let n = page_number.to_string();
        format!(
            "{} / {}",
            self.page_localized.replace("{n}", &n),
            self.page_source.replace("{n}", &n)
        )
    }
}

/// Placeholder for a scanned page whose OCR produced no text.
pub fn empty_ocr_placeholder() -> String {
    format!("{UNRECOGNIZED_MARKER} - OCR未能识别到文本]")
}

/// Placeholder for a scanned page whose OCR failed, embedding the error.
pub fn ocr_error_placeholder(detail: &str) -> String {
    format!("{UNRECOGNIZED_MARKER} - OCR错误: {detail}]")
}

/// Whether `text` is (or contains) an unrecognized-page placeholder.
pub fn is_placeholder(text: &str) -> bool {
    text.contains(UNRECOGNIZED_MARKER)
}
