// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the bilingua-document crate. Measures PDF output
// for a synthetic ten-page bilingual document using the built-in font.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bilingua_core::model::{Block, DocumentModel, HeadingLevel, PageSection, Rgb, Run, RunStyle};
use bilingua_document::PdfWriter;

fn synthetic_document(pages: u32, paragraphs: usize) -> DocumentModel {
    let mut doc = DocumentModel::new("benchmark");
    for page_number in 1..=pages {
        let mut blocks = vec![Block::Heading {
            level: HeadingLevel::Page,
            text: format!("Page {page_number}"),
        }];
        for i in 0..paragraphs {
            let text = format!("Paragraph {i} of page {page_number}. ").repeat(8);
            blocks.push(Block::Source {
                runs: vec![
                    Run::new("Source", RunStyle::plain().bold().colored(Rgb::DARK_BLUE)),
                    Run::new(text.clone(), RunStyle::plain()),
                ],
            });
            blocks.push(Block::Translated {
                runs: vec![
                    Run::new("Translation", RunStyle::plain().bold().colored(Rgb::DARK_RED)),
                    Run::new(text, RunStyle::plain()),
                ],
                failed: false,
            });
            blocks.push(Block::Separator);
        }
        if page_number < pages {
            blocks.push(Block::PageBreak);
        }
        doc.push_section(PageSection {
            page_number,
            blocks,
        });
    }
    doc
}

fn bench_pdf_render(c: &mut Criterion) {
    let doc = synthetic_document(10, 5);
    let writer = PdfWriter::a4();

    c.bench_function("pdf_render (10 pages x 5 paragraphs)", |b| {
        b.iter(|| {
            let bytes = writer.render(black_box(&doc));
            black_box(bytes.map(|b| b.len()).unwrap_or(0));
        });
    });
}

criterion_group!(benches, bench_pdf_render);
criterion_main!(benches);
