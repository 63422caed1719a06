// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface.

use std::path::PathBuf;

use bilingua_core::config::{AppConfig, OcrSettings};
use bilingua_core::types::OutputFormat;
use clap::{Parser, ValueEnum};

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Pdf,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Convert every PDF in a directory into a bilingual document.
#[derive(Debug, Parser)]
#[command(name = "bilingua", version, about)]
pub struct Cli {
    /// Directory containing the input PDFs
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Output document format (PDF needs --font for Chinese text)
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// Target language code
    #[arg(short, long, default_value = "zh-CN")]
    pub target_lang: String,

    /// Tesseract executable (default: platform install location or PATH)
    #[arg(long)]
    pub tesseract: Option<PathBuf>,

    /// Poppler pdftoppm executable used to render scanned pages
    #[arg(long, default_value = "pdftoppm")]
    pub pdftoppm: PathBuf,

    /// TrueType/OpenType font embedded in PDF output (needed for CJK text)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Tesseract language packs
    #[arg(long, default_value = "eng+chi_sim")]
    pub ocr_languages: String,

    /// Translation attempts per paragraph
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Directory with ocrs detection/recognition models; selects the
    /// built-in engine instead of Tesseract
    #[cfg(feature = "ocr")]
    #[arg(long)]
    pub ocrs_models: Option<PathBuf>,
}

impl Cli {
    /// Model directory for the built-in OCR engine, when selected.
    #[cfg(feature = "ocr")]
    pub fn ocrs_models(&self) -> Option<PathBuf> {
        self.ocrs_models.clone()
    }

    #[cfg(not(feature = "ocr"))]
    pub fn ocrs_models(&self) -> Option<PathBuf> {
        None
    }

    /// Merge the flags over the defaults, resolving the OCR executable once.
    pub fn into_config(self) -> AppConfig {
        let mut config = AppConfig {
            input_dir: self.dir,
            output_format: self.format.into(),
            font_path: self.font,
            ocr: OcrSettings::resolve(),
            ..AppConfig::default()
        };
        if let Some(tesseract) = self.tesseract {
            config.ocr.tesseract_cmd = tesseract;
        }
        config.ocr.languages = self.ocr_languages;
        config.render.pdftoppm_cmd = self.pdftoppm;
        config.translation.target_lang = self.target_lang;
        config.translation.max_attempts = self.max_attempts;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Cli::try_parse_from(["bilingua"]).unwrap().into_config();
        assert_eq!(config.input_dir, PathBuf::from("."));
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.translation.target_lang, "zh-CN");
        assert_eq!(config.translation.max_attempts, 3);
        assert_eq!(config.ocr.languages, "eng+chi_sim");
        assert!(config.font_path.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "bilingua",
            "--dir",
            "/scans",
            "--format",
            "pdf",
            "--tesseract",
            "/opt/tesseract",
            "--font",
            "/fonts/NotoSansSC.ttf",
            "--max-attempts",
            "5",
        ])
        .unwrap();
        let config = cli.into_config();

        assert_eq!(config.input_dir, PathBuf::from("/scans"));
        assert_eq!(config.output_format, OutputFormat::Pdf);
        assert_eq!(config.ocr.tesseract_cmd, PathBuf::from("/opt/tesseract"));
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/NotoSansSC.ttf")));
        assert_eq!(config.translation.max_attempts, 5);
    }

    #[test]
    fn zero_attempts_rejected() {
        assert!(Cli::try_parse_from(["bilingua", "--max-attempts", "0"]).is_err());
    }
}
