// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for bilingual assembly. Uses an echo backend and no
// pauses so only model construction and paragraph splitting are measured.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bilingua_core::config::TranslationSettings;
use bilingua_core::error::Result;
use bilingua_core::labels::{Labels, empty_ocr_placeholder};
use bilingua_core::types::{PageKind, PageRecord};
use bilingua_pipeline::BilingualAssembler;
use bilingua_translate::{Pause, TranslationBackend, TranslationClient};

struct Echo;

impl TranslationBackend for Echo {
    fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

struct NoPause;

impl Pause for NoPause {
    fn pause(&self, _duration: Duration) {}
}

/// 200 pages: mostly native text, every tenth page OCR, every 25th unreadable.
fn synthetic_pages() -> Vec<PageRecord> {
    (1..=200u32)
        .map(|n| {
            if n % 25 == 0 {
                PageRecord::new(n, empty_ocr_placeholder(), PageKind::Unrecognized)
            } else {
                let text = (0..6)
                    .map(|p| format!("Paragraph {p} on page {n}. ").repeat(5))
                    .collect::<Vec<_>>()
                    .join("\n\n");
                let kind = if n % 10 == 0 {
                    PageKind::OcrText
                } else {
                    PageKind::NativeText
                };
                PageRecord::new(n, text, kind)
            }
        })
        .collect()
}

fn bench_assemble(c: &mut Criterion) {
    let pages = synthetic_pages();
    let client = TranslationClient::new(Echo, &TranslationSettings::default()).with_pause(NoPause);
    let assembler = BilingualAssembler::new(client, Labels::default());

    c.bench_function("assemble (200 pages x 6 paragraphs)", |b| {
        b.iter(|| black_box(assembler.assemble("bench", black_box(&pages))));
    });
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
