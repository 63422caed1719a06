// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch driver: discover input PDFs in a directory and convert each one.
//
// Documents are processed one at a time in sorted order. Any error raised
// while converting a document is recorded against that document only and the
// batch moves on; only an unreadable input directory aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use bilingua_core::error::{BilinguaError, Result};
use bilingua_core::human_errors::humanize_error;
use bilingua_core::types::OutputFormat;
use bilingua_document::{DocumentWriter, PageContentExtractor, SourceOpener, TextRecognizer};
use bilingua_translate::{Pause, TranslationBackend};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::assemble::BilingualAssembler;

/// List the PDFs in `dir` that should be converted.
///
/// Non-recursive; matches the `.pdf` suffix case-insensitively, skips files
/// this tool produced, and sorts by file name.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.ends_with(".pdf") && !name.ends_with(OutputFormat::Pdf.suffix()) {
            inputs.push(path);
        }
    }
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

/// Output location for `input`: same directory, same stem, format suffix.
pub fn output_path_for(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{}", format.suffix()))
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Number of input documents discovered.
    pub total: usize,
    pub succeeded: usize,
    /// Failed inputs with a human-readable reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Written output files, in processing order.
    pub outputs: Vec<PathBuf>,
}

impl BatchReport {
    fn begin(total: usize) -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            total,
            succeeded: 0,
            failed: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty() && self.succeeded == self.total
    }
}

/// Drives the per-document pipeline across a directory.
pub struct BatchOrchestrator<O, R, B, P> {
    opener: O,
    extractor: PageContentExtractor<R>,
    assembler: BilingualAssembler<B, P>,
    writer: Box<dyn DocumentWriter>,
    format: OutputFormat,
}

impl<O, R, B, P> BatchOrchestrator<O, R, B, P>
where
    O: SourceOpener,
    R: TextRecognizer,
    B: TranslationBackend,
    P: Pause,
{
    pub fn new(
        opener: O,
        extractor: PageContentExtractor<R>,
        assembler: BilingualAssembler<B, P>,
        writer: Box<dyn DocumentWriter>,
        format: OutputFormat,
    ) -> Self {
        Self {
            opener,
            extractor,
            assembler,
            writer,
            format,
        }
    }

    /// Convert every input PDF in `dir`.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn run(&self, dir: &Path) -> Result<BatchReport> {
        let inputs = discover_inputs(dir)?;
        info!(count = inputs.len(), "Discovered input PDFs");
        Ok(self.run_inputs(&inputs))
    }

    /// Convert the given inputs in order.
    pub fn run_inputs(&self, inputs: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::begin(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            info!(
                "Processing {}/{}: {}",
                index + 1,
                inputs.len(),
                input.display()
            );
            match self.process_document(input) {
                Ok(output) => {
                    info!("Saved {}", output.display());
                    report.succeeded += 1;
                    report.outputs.push(output);
                }
                Err(err) => {
                    error!(input = %input.display(), error = %err, "document failed");
                    report
                        .failed
                        .push((input.clone(), humanize_error(&err).to_string()));
                }
            }
        }

        report.finished_at = Utc::now();
        info!(
            succeeded = report.succeeded,
            failed = report.failed.len(),
            total = report.total,
            "Batch complete"
        );
        report
    }

    /// Convert one document and return the written output path.
    pub fn process_document(&self, input: &Path) -> Result<PathBuf> {
        let pages = {
            let source = self.opener.open(input)?;
            self.extractor.extract(&source)
        };

        if pages.is_empty() {
            return Err(BilinguaError::NoContent(input.display().to_string()));
        }

        let title = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let document = self.assembler.assemble(&title, &pages);

        let output = output_path_for(input, self.format);
        self.writer.write(&document, &output)?;
        Ok(output)
    }
}
