// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Resolved once at start-up from defaults and command-line flags, then passed
// by reference into the components that need it. There is no config file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::labels::Labels;
use crate::types::OutputFormat;

/// Default Tesseract install locations probed on Windows, in order.
pub const WINDOWS_TESSERACT_PATHS: [&str; 2] = [
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

/// Executable name used when no install location is known.
pub const TESSERACT_ON_PATH: &str = "tesseract";

/// Linear upscaling applied before OCR (2x linear, 4x pixel area).
pub const RENDER_SCALE: f32 = 2.0;

/// OCR engine location and language pack selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Tesseract executable; a bare name is looked up on the search path.
    pub tesseract_cmd: PathBuf,
    /// Tesseract language packs, `+`-separated (source and target scripts).
    pub languages: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from(TESSERACT_ON_PATH),
            languages: "eng+chi_sim".into(),
        }
    }
}

impl OcrSettings {
    /// Resolve the Tesseract executable for the running platform.
    pub fn resolve() -> Self {
        Self::resolve_with(cfg!(windows), |path| path.exists())
    }

    /// Platform lookup with an injectable existence check.
    ///
    /// On Windows the well-known install directories are probed first; every
    /// other case falls back to the system search path.
    pub fn resolve_with(is_windows: bool, exists: impl Fn(&Path) -> bool) -> Self {
        let mut settings = Self::default();
        if is_windows {
            if let Some(found) = WINDOWS_TESSERACT_PATHS
                .iter()
                .map(Path::new)
                .find(|candidate| exists(candidate))
            {
                settings.tesseract_cmd = found.to_path_buf();
            }
        }
        settings
    }

    /// Whether the executable will be looked up on the search path.
    pub fn uses_search_path(&self) -> bool {
        self.tesseract_cmd.as_os_str() == TESSERACT_ON_PATH
    }
}

/// Page rasterisation for the OCR path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Poppler `pdftoppm` executable.
    pub pdftoppm_cmd: PathBuf,
    /// Linear scale relative to the 72 DPI PDF user space.
    pub scale: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            pdftoppm_cmd: PathBuf::from("pdftoppm"),
            scale: RENDER_SCALE,
        }
    }
}

/// Translation backend and retry policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSettings {
    pub source_lang: String,
    pub target_lang: String,
    pub max_attempts: u32,
    /// Pause after every successful call (rate-limit courtesy).
    pub success_pause: Duration,
    /// Wait after a failed attempt before retrying.
    pub retry_delay: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            source_lang: "auto".into(),
            target_lang: "zh-CN".into(),
            max_attempts: 3,
            success_pause: Duration::from_millis(500),
            retry_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Top-level settings for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory scanned for input PDFs (non-recursive).
    pub input_dir: PathBuf,
    pub output_format: OutputFormat,
    /// TrueType/OpenType font embedded by the PDF writer; without it only
    /// Latin-1 text renders and documents with other text are refused.
    pub font_path: Option<PathBuf>,
    pub ocr: OcrSettings,
    pub render: RenderSettings,
    pub translation: TranslationSettings,
    pub labels: Labels,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_format: OutputFormat::default(),
            font_path: None,
            ocr: OcrSettings::default(),
            render: RenderSettings::default(),
            translation: TranslationSettings::default(),
            labels: Labels::default(),
        }
    }
}
