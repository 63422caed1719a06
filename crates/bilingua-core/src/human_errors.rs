// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the end-of-run summary.
//
// Every technical error that reaches the batch boundary is mapped to plain
// language with a concrete suggestion, so the summary tells the user what to
// do about a failed document rather than dumping a parser backtrace.

use std::fmt;

use crate::error::BilinguaError;

/// A human-readable error with a plain message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (printed first).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
}

impl fmt::Display for HumanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `BilinguaError` into a `HumanError`.
pub fn humanize_error(err: &BilinguaError) -> HumanError {
    match err {
        BilinguaError::PdfError(detail) => {
            let lower = detail.to_ascii_lowercase();
            if lower.contains("encrypt") || lower.contains("password") {
                HumanError {
                    message: "This PDF is password-protected.".into(),
                    suggestion: "Remove the password (print to a new PDF) and run again.".into(),
                }
            } else {
                HumanError {
                    message: "There's a problem with this PDF file.".into(),
                    suggestion: format!(
                        "The file may be damaged. Try opening it in a PDF viewer to check it works. ({detail})"
                    ),
                }
            }
        }

        BilinguaError::RenderError(detail) => HumanError {
            message: "A scanned page could not be turned into an image.".into(),
            suggestion: format!(
                "Make sure poppler-utils (pdftoppm) is installed and on PATH. ({detail})"
            ),
        },

        BilinguaError::ImageError(_) => HumanError {
            message: "A rendered page image could not be read.".into(),
            suggestion: "The page may use an unusual image format. Try re-saving the PDF.".into(),
        },

        BilinguaError::OcrError(detail) => HumanError {
            message: "Text recognition didn't work.".into(),
            suggestion: format!(
                "Check that Tesseract and the eng/chi_sim language packs are installed. ({detail})"
            ),
        },

        BilinguaError::NoContent(_) => HumanError {
            message: "No pages with content were found in this PDF.".into(),
            suggestion: "The file may be empty. Check it in a PDF viewer.".into(),
        },

        BilinguaError::Translation(_) => HumanError {
            message: "The translation service could not be reached.".into(),
            suggestion: "Check your internet connection and try again later.".into(),
        },

        BilinguaError::WriteError(detail) => HumanError {
            message: "The bilingual document could not be created.".into(),
            suggestion: format!(
                "PDF output needs a readable CJK-capable --font; JSON output needs none. ({detail})"
            ),
        },

        BilinguaError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted while the batch was running.".into(),
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied reading or writing a file.".into(),
                suggestion: "Check that the directory is writable and the PDF is readable.".into(),
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: format!("Try again. If this keeps happening, the disk may be full. ({io_err})"),
            },
        },

        BilinguaError::Serialization(_) => HumanError {
            message: "The document could not be serialized.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
        },
    }
}
