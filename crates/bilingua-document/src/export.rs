// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persistence of the bilingual document model.

use std::fs;
use std::path::Path;

use bilingua_core::config::AppConfig;
use bilingua_core::error::{BilinguaError, Result};
use bilingua_core::model::DocumentModel;
use bilingua_core::types::OutputFormat;
use tracing::info;

use crate::pdf::writer::PdfWriter;

/// Persists a [`DocumentModel`] in some output format.
pub trait DocumentWriter {
    /// Write `document` to `path`, replacing any existing file.
    fn write(&self, document: &DocumentModel, path: &Path) -> Result<()>;
}

/// Writes the model as pretty-printed JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter;

impl DocumentWriter for JsonWriter {
    fn write(&self, document: &DocumentModel, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(document)?;
        fs::write(path, data)?;
        info!("Wrote JSON document to {}", path.display());
        Ok(())
    }
}

/// Primary language subtags whose text the built-in PDF fonts can encode.
const LATIN1_LANGUAGES: &[&str] = &[
    "af", "ca", "da", "de", "en", "es", "eu", "fi", "fo", "fr", "ga", "gd", "gl", "id", "is",
    "it", "la", "lb", "ms", "nb", "nl", "nn", "no", "oc", "pt", "sq", "sv", "sw",
];

/// Whether a run under `config` puts text outside Latin-1 into its documents.
fn needs_embedded_font(config: &AppConfig) -> bool {
    let labels = &config.labels;
    let label_text = [
        &labels.page_localized,
        &labels.page_source,
        &labels.ocr_notice,
        &labels.source_label,
        &labels.translated_label,
    ];
    let primary = config
        .translation
        .target_lang
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    label_text
        .iter()
        .any(|text| text.chars().any(|c| c as u32 >= 0x100))
        || !LATIN1_LANGUAGES.contains(&primary.as_str())
}

/// Build the writer for the configured output format.
///
/// For PDF output `config.font_path` names a TrueType/OpenType font to embed;
/// it is read once here so a bad path fails before any document is processed.
/// PDF output without a font is refused when the labels or the target
/// language need glyphs the built-in fonts lack.
pub fn writer_for(config: &AppConfig) -> Result<Box<dyn DocumentWriter>> {
    match config.output_format {
        OutputFormat::Json => Ok(Box::new(JsonWriter)),
        OutputFormat::Pdf => {
            let writer = match &config.font_path {
                Some(path) => {
                    let bytes = fs::read(path).map_err(|err| {
                        BilinguaError::WriteError(format!(
                            "failed to read font {}: {}",
                            path.display(),
                            err
                        ))
                    })?;
                    PdfWriter::with_font(bytes)
                }
                None if needs_embedded_font(config) => {
                    return Err(BilinguaError::WriteError(format!(
                        "PDF output for target language {} needs a CJK-capable font; \
                         pass --font or choose JSON output",
                        config.translation.target_lang
                    )));
                }
                None => PdfWriter::a4(),
            };
            Ok(Box::new(writer))
        }
    }
}
