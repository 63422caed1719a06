// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Assembly of extracted pages into the bilingual document model.
//
// Per page: a bilingual heading; for unrecognized pages a red note and
// nothing else; for OCR pages an orange advisory first; then for every
// paragraph a source block, a translated block and a separator. A page break
// follows every page except the last.

use bilingua_core::labels::Labels;
use bilingua_core::model::{Block, DocumentModel, HeadingLevel, PageSection, Rgb, Run, RunStyle};
use bilingua_core::types::{PageKind, PageRecord};
use bilingua_translate::{Pause, TranslationBackend, TranslationClient};
use tracing::{debug, info, instrument};

/// Split page text into paragraph units on blank lines.
///
/// Each unit is trimmed; empty units are dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .collect()
}

/// Builds a [`DocumentModel`] from page records, translating each paragraph.
pub struct BilingualAssembler<B, P> {
    client: TranslationClient<B, P>,
    labels: Labels,
}

impl<B: TranslationBackend, P: Pause> BilingualAssembler<B, P> {
    pub fn new(client: TranslationClient<B, P>, labels: Labels) -> Self {
        Self { client, labels }
    }

    /// Assemble the bilingual model for one document.
    #[instrument(skip_all, fields(title = %title, pages = pages.len()))]
    pub fn assemble(&self, title: &str, pages: &[PageRecord]) -> DocumentModel {
        let mut document = DocumentModel::new(title);
        let mut failed_paragraphs = 0usize;

        for (index, page) in pages.iter().enumerate() {
            let is_last = index + 1 == pages.len();
            let (section, failures) = self.assemble_page(page, is_last);
            failed_paragraphs += failures;
            document.push_section(section);
        }

        info!(
            pages = document.page_count(),
            failed_paragraphs, "Bilingual document assembled"
        );
        document
    }

    fn assemble_page(&self, page: &PageRecord, is_last: bool) -> (PageSection, usize) {
        let mut blocks = vec![Block::Heading {
            level: HeadingLevel::Page,
            text: self.labels.page_heading(page.page_number()),
        }];
        let mut failures = 0;

        if !page.is_translatable() {
            blocks.push(Block::Note {
                runs: vec![Run::new(
                    page.text(),
                    RunStyle::plain().italic().colored(Rgb::RED),
                )],
            });
        } else {
            if page.kind() == PageKind::OcrText {
                blocks.push(Block::Note {
                    runs: vec![Run::new(
                        self.labels.ocr_notice.as_str(),
                        RunStyle::plain().bold().italic().colored(Rgb::ORANGE),
                    )],
                });
            }

            let paragraphs = split_paragraphs(page.text());
            debug!(
                page_number = page.page_number(),
                paragraphs = paragraphs.len(),
                "translating page"
            );
            for paragraph in paragraphs {
                let result = self.client.translate(paragraph);
                if result.failed {
                    failures += 1;
                }
                blocks.push(Block::Source {
                    runs: vec![
                        self.label_run(&self.labels.source_label, Rgb::DARK_BLUE),
                        Run::new(paragraph, RunStyle::plain()),
                    ],
                });
                blocks.push(Block::Translated {
                    runs: vec![
                        self.label_run(&self.labels.translated_label, Rgb::DARK_RED),
                        Run::new(result.translated, RunStyle::plain()),
                    ],
                    failed: result.failed,
                });
                blocks.push(Block::Separator);
            }
        }

        if !is_last {
            blocks.push(Block::PageBreak);
        }

        (
            PageSection {
                page_number: page.page_number(),
                blocks,
            },
            failures,
        )
    }

    fn label_run(&self, label: &str, color: Rgb) -> Run {
        Run::new(label, RunStyle::plain().bold().colored(color))
    }
}
