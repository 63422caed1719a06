// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bilingua — batch PDF to bilingual document converter
//
// Entry point. Initialises logging, parses flags into the run configuration,
// wires the collaborators and prints the batch summary.

mod cli;

use std::path::Path;
use std::process::ExitCode;

use bilingua_core::config::AppConfig;
use bilingua_core::error::Result;
use bilingua_core::human_errors::humanize_error;
use bilingua_document::{
    PageContentExtractor, PdfOpener, TesseractEngine, TextRecognizer, writer_for,
};
use bilingua_pipeline::{BatchOrchestrator, BatchReport, BilingualAssembler, discover_inputs};
use bilingua_translate::{GoogleBackend, TranslationClient};
use clap::Parser;

use cli::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let ocrs_models = cli.ocrs_models();
    let config = cli.into_config();

    tracing::info!(dir = %config.input_dir.display(), "Bilingua starting");

    let engine = build_recognizer(&config, ocrs_models.as_deref());

    match engine.and_then(|(recognizer, description)| run(&config, recognizer, &description)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            eprintln!("错误: {}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}

/// Pick the OCR engine; returns it with a line describing it for the summary.
fn build_recognizer(
    config: &AppConfig,
    ocrs_models: Option<&Path>,
) -> Result<(Box<dyn TextRecognizer>, String)> {
    #[cfg(not(feature = "ocr"))]
    let _ = ocrs_models;

    #[cfg(feature = "ocr")]
    if let Some(dir) = ocrs_models {
        let engine = bilingua_document::OcrEngine::from_model_dir(dir)?;
        return Ok((
            Box::new(engine),
            format!("ocrs 模型目录: {}", dir.display()),
        ));
    }

    if cfg!(windows) && config.ocr.uses_search_path() {
        println!("警告: 未找到 Tesseract OCR，请确保已安装并添加到系统 PATH");
    }
    Ok((
        Box::new(TesseractEngine::new(&config.ocr)),
        format!(
            "Tesseract OCR 安装路径: {}",
            config.ocr.tesseract_cmd.display()
        ),
    ))
}

fn run(config: &AppConfig, recognizer: Box<dyn TextRecognizer>, engine: &str) -> Result<()> {
    let writer = writer_for(config)?;
    let inputs = discover_inputs(&config.input_dir)?;
    if inputs.is_empty() {
        println!("未找到PDF文件");
        return Ok(());
    }
    println!("找到 {} 个PDF文件", inputs.len());
    println!("{}", "=".repeat(60));

    let client = TranslationClient::new(GoogleBackend::new(&config.translation)?, &config.translation);
    let assembler = BilingualAssembler::new(client, config.labels.clone());
    let extractor =
        PageContentExtractor::new(recognizer, &config.ocr).with_scale(config.render.scale);

    let orchestrator = BatchOrchestrator::new(
        PdfOpener::new(config.render.clone()),
        extractor,
        assembler,
        writer,
        config.output_format,
    );
    let report = orchestrator.run_inputs(&inputs);

    print_summary(&report, engine);
    Ok(())
}

fn print_summary(report: &BatchReport, engine: &str) {
    println!("\n{}", "=".repeat(60));
    println!("处理完成!");
    println!("成功: {}/{}", report.succeeded, report.total);

    if !report.failed.is_empty() {
        let names: Vec<String> = report
            .failed
            .iter()
            .map(|(path, _)| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            })
            .collect();
        println!("失败的文件: {}", names.join(", "));
        for (path, reason) in &report.failed {
            println!("  {}: {}", path.display(), reason);
        }
    }

    println!("\n注意: 已启用OCR功能，可以处理扫描图片的PDF文件");
    println!("{engine}");
}
