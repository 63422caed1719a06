// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page renderer — rasterise a single PDF page with Poppler's `pdftoppm` and
// decode the result with the `image` crate.

use std::path::Path;
use std::process::Command;

use bilingua_core::config::RenderSettings;
use bilingua_core::error::BilinguaError;
use image::DynamicImage;
use tracing::{debug, instrument};

/// PDF user-space resolution; a scale of 1.0 renders at this DPI.
const PDF_BASE_DPI: f32 = 72.0;

/// Renders PDF pages to raster images for OCR.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    settings: RenderSettings,
}

impl PageRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Render `page_number` (1-indexed) of `pdf_path` at `scale`.
    ///
    /// The intermediate PNG lives in a temporary directory that is removed
    /// before this returns.
    #[instrument(skip(self, pdf_path), fields(pdf = %pdf_path.display()))]
    pub fn render(
        &self,
        pdf_path: &Path,
        page_number: u32,
        scale: f32,
    ) -> Result<DynamicImage, BilinguaError> {
        let work_dir = tempfile::tempdir()?;
        let prefix = work_dir.path().join("page");
        let dpi = dpi_for_scale(scale);

        let output = Command::new(&self.settings.pdftoppm_cmd)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg("-singlefile")
            .arg(pdf_path)
            .arg(&prefix)
            .output()
            .map_err(|err| {
                BilinguaError::RenderError(format!(
                    "failed to invoke {}: {}; is poppler-utils installed?",
                    self.settings.pdftoppm_cmd.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BilinguaError::RenderError(format!(
                "pdftoppm failed on page {} with {}: {}",
                page_number,
                output.status,
                stderr.trim()
            )));
        }

        // `-singlefile` writes exactly `<prefix>.png`.
        let image_path = prefix.with_extension("png");
        let image = image::open(&image_path).map_err(|err| {
            BilinguaError::ImageError(format!(
                "failed to decode rendered page {}: {}",
                page_number, err
            ))
        })?;

        debug!(
            page_number,
            dpi,
            width = image.width(),
            height = image.height(),
            "Page rendered"
        );
        Ok(image)
    }
}

/// Rendering resolution for a linear scale over the PDF base resolution.
fn dpi_for_scale(scale: f32) -> u32 {
    (PDF_BASE_DPI * scale).round().max(1.0) as u32
}
