// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tesseract OCR engine.
//
// Runs the external `tesseract` executable over a PNG written to a temporary
// directory. The executable location is resolved once at start-up
// (`OcrSettings::resolve`) and handed to the constructor; nothing here reads
// global state.
//
// Language packs must be installed alongside Tesseract, e.g. on Debian:
//
// ```sh
// apt install tesseract-ocr tesseract-ocr-eng tesseract-ocr-chi-sim
// ```

use std::path::{Path, PathBuf};
use std::process::Command;

use bilingua_core::config::OcrSettings;
use bilingua_core::error::BilinguaError;
use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::source::TextRecognizer;

/// OCR through the Tesseract command-line tool.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    /// Executable path or bare command name.
    command: PathBuf,
}

impl TesseractEngine {
    pub fn new(settings: &OcrSettings) -> Self {
        Self {
            command: settings.tesseract_cmd.clone(),
        }
    }

    pub fn command(&self) -> &Path {
        &self.command
    }
}

impl TextRecognizer for TesseractEngine {
    #[instrument(skip_all, fields(width = image.width(), height = image.height(), languages = %languages))]
    fn recognize(&self, image: &DynamicImage, languages: &str) -> Result<String, BilinguaError> {
        info!("Starting OCR text recognition");

        let work_dir = tempfile::tempdir()?;
        let image_path = work_dir.path().join("page.png");
        image.save(&image_path).map_err(|err| {
            BilinguaError::ImageError(format!("failed to write OCR input image: {}", err))
        })?;

        // `stdout` as the output base makes Tesseract print the text.
        let output = Command::new(&self.command)
            .arg(&image_path)
            .arg("stdout")
            .arg("-l")
            .arg(languages)
            .output()
            .map_err(|err| {
                BilinguaError::OcrError(format!(
                    "failed to invoke {}: {}",
                    self.command.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BilinguaError::OcrError(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            line_count = text.lines().count(),
            char_count = text.chars().count(),
            "OCR recognition complete"
        );
        Ok(text)
    }
}
