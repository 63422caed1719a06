// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bilingua.

use thiserror::Error;

/// Top-level error type for all Bilingua operations.
#[derive(Debug, Error)]
pub enum BilinguaError {
    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("page rendering failed: {0}")]
    RenderError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("no text content found in {0}")]
    NoContent(String),

    // -- Translation --
    #[error("translation request failed: {0}")]
    Translation(String),

    // -- Output --
    #[error("writing output document failed: {0}")]
    WriteError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BilinguaError>;
