// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Optical character recognition engines for scanned pages.
//
// Tesseract (external executable) is always available and supports the mixed
// Latin/CJK language packs; the pure-Rust `ocrs` engine is an opt-in
// alternative behind the `ocr` feature.

pub mod tesseract;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use tesseract::TesseractEngine;

#[cfg(feature = "ocr")]
pub use ocr::OcrEngine;
