// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — render a bilingual `DocumentModel` into a new PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Layout is a simple top-to-bottom flow: every run
// starts on a new line, long lines wrap, and pages break when the cursor
// reaches the bottom margin or the model asks for a page break.
//
// An embedded font supplies a single face, so bold runs are drawn with a
// stroked outline and italic runs with a sheared text matrix.

use std::fs;
use std::path::Path;

use bilingua_core::error::{BilinguaError, Result};
use bilingua_core::model::{Block, DocumentModel, HeadingLevel, Run, RunStyle, SEPARATOR_WIDTH};
use printpdf::{
    BuiltinFont, Color, FontId, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Pt, TextItem, TextMatrix, TextRenderingMode,
};
use tracing::{debug, info, instrument};

use crate::export::DocumentWriter;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

const TITLE_SIZE_PT: f32 = 20.0;
const HEADING_SIZE_PT: f32 = 14.0;
const BODY_SIZE_PT: f32 = 11.0;
const LINE_SPACING: f32 = 1.35;
const BLOCK_GAP_PT: f32 = 6.0;

/// Width of a narrow glyph as a fraction of the font size. Wide (CJK) glyphs
/// count double.
const NARROW_GLYPH_EM: f32 = 0.5;

/// Outline width of faux-bold glyphs as a fraction of the font size.
const FAUX_BOLD_STROKE_EM: f32 = 0.03;
/// Horizontal shear of faux-italic glyphs (about 12 degrees).
const FAUX_ITALIC_SHEAR: f32 = 0.21;

/// Renders bilingual documents to A4 PDF pages.
///
/// Without an embedded font the built-in Helvetica family is used. It only
/// covers Latin-1, so a document containing any other character is refused
/// with [`BilinguaError::WriteError`] rather than written with missing text.
/// Supply a CJK-capable TrueType/OpenType font via [`PdfWriter::with_font`]
/// to render translations into Chinese, Japanese or Korean.
pub struct PdfWriter {
    /// Raw bytes of the font to embed, if any.
    font: Option<Vec<u8>>,
}

/// One laid-out line of text.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    style: RunStyle,
    size: f32,
    centered: bool,
}

/// Flow elements produced from the model before pagination.
#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Line(Line),
    Gap(f32),
    PageBreak,
}

/// A line fixed at a baseline position on a page.
#[derive(Debug, Clone, PartialEq)]
struct Placed {
    x_pt: f32,
    baseline_pt: f32,
    line: Line,
}

/// Font selection for the ops of a single document.
enum Face {
    Builtin,
    Embedded(FontId),
}

impl PdfWriter {
    /// Writer using the built-in Helvetica family.
    pub fn a4() -> Self {
        Self { font: None }
    }

    /// Writer embedding the given font file contents.
    pub fn with_font(font_bytes: Vec<u8>) -> Self {
        Self {
            font: Some(font_bytes),
        }
    }

    /// Render the document to PDF bytes.
    #[instrument(skip_all, fields(title = %document.title, pages = document.page_count()))]
    pub fn render(&self, document: &DocumentModel) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(&document.title);

        let face = match &self.font {
            Some(bytes) => {
                let mut font_warnings = Vec::new();
                let parsed = ParsedFont::from_bytes(bytes, 0, &mut font_warnings).ok_or_else(
                    || BilinguaError::WriteError("embedded font could not be parsed".to_string()),
                )?;
                Face::Embedded(doc.add_font(&parsed))
            }
            None => Face::Builtin,
        };

        let flow = layout(document, matches!(face, Face::Embedded(_)));
        if matches!(face, Face::Builtin) {
            if let Some(glyph) = first_unencodable(&flow) {
                return Err(BilinguaError::WriteError(format!(
                    "character {glyph:?} (U+{:04X}) needs an embedded font; \
                     the built-in font only covers Latin-1",
                    glyph as u32
                )));
            }
        }
        let placed_pages = paginate(&flow);

        let (page_w, page_h) = (Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM));
        let pages: Vec<PdfPage> = placed_pages
            .iter()
            .map(|lines| {
                let mut ops = Vec::new();
                for placed in lines {
                    push_line_ops(&mut ops, placed, &face);
                }
                PdfPage::new(page_w, page_h, ops)
            })
            .collect();

        debug!(
            flow_items = flow.len(),
            pages = pages.len(),
            "PDF layout complete"
        );
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }
}

impl DocumentWriter for PdfWriter {
    fn write(&self, document: &DocumentModel, path: &Path) -> Result<()> {
        let bytes = self.render(document)?;
        fs::write(path, &bytes)?;
        info!("Wrote bilingual PDF to {}", path.display());
        Ok(())
    }
}

// -- Layout -------------------------------------------------------------------

/// Turn the model into a flat flow of lines, gaps and page breaks.
fn layout(document: &DocumentModel, wide_glyphs: bool) -> Vec<Flow> {
    let mut flow = Vec::new();

    let title_style = RunStyle::plain().bold();
    for text in wrap_text(&document.title, max_units(TITLE_SIZE_PT)) {
        flow.push(Flow::Line(Line {
            text,
            style: title_style,
            size: TITLE_SIZE_PT,
            centered: true,
        }));
    }
    flow.push(Flow::Gap(BLOCK_GAP_PT * 2.0));

    for block in document.blocks() {
        match block {
            Block::Heading { level, text } => {
                let size = match level {
                    HeadingLevel::Title => TITLE_SIZE_PT,
                    HeadingLevel::Page => HEADING_SIZE_PT,
                };
                flow.push(Flow::Gap(BLOCK_GAP_PT));
                push_wrapped(
                    &mut flow,
                    text,
                    RunStyle::plain().bold(),
                    size,
                    *level == HeadingLevel::Title,
                );
                flow.push(Flow::Gap(BLOCK_GAP_PT));
            }
            Block::Note { runs } | Block::Source { runs } | Block::Translated { runs, .. } => {
                push_runs(&mut flow, runs);
                flow.push(Flow::Gap(BLOCK_GAP_PT));
            }
            Block::Separator => {
                let rule = if wide_glyphs { '─' } else { '-' };
                flow.push(Flow::Line(Line {
                    text: rule.to_string().repeat(SEPARATOR_WIDTH),
                    style: RunStyle::plain(),
                    size: BODY_SIZE_PT,
                    centered: false,
                }));
                flow.push(Flow::Gap(BLOCK_GAP_PT));
            }
            Block::PageBreak => flow.push(Flow::PageBreak),
        }
    }

    flow
}

fn push_runs(flow: &mut Vec<Flow>, runs: &[Run]) {
    for run in runs {
        push_wrapped(flow, &run.text, run.style, BODY_SIZE_PT, false);
    }
}

fn push_wrapped(flow: &mut Vec<Flow>, text: &str, style: RunStyle, size: f32, centered: bool) {
    for text in wrap_text(text, max_units(size)) {
        flow.push(Flow::Line(Line {
            text,
            style,
            size,
            centered,
        }));
    }
}

/// Lay the flow out onto pages, top to bottom.
fn paginate(flow: &[Flow]) -> Vec<Vec<Placed>> {
    let page_w_pt = Mm(PAGE_WIDTH_MM).into_pt().0;
    let page_h_pt = Mm(PAGE_HEIGHT_MM).into_pt().0;
    let margin_pt = Mm(MARGIN_MM).into_pt().0;
    let top = page_h_pt - margin_pt;

    let mut pages: Vec<Vec<Placed>> = vec![Vec::new()];
    let mut cursor = top;

    for item in flow {
        match item {
            Flow::Gap(gap) => cursor -= gap,
            Flow::PageBreak => {
                pages.push(Vec::new());
                cursor = top;
            }
            Flow::Line(line) => {
                let line_height = line.size * LINE_SPACING;
                if cursor - line_height < margin_pt {
                    pages.push(Vec::new());
                    cursor = top;
                }
                let x_pt = if line.centered {
                    let width = text_units(&line.text) as f32 * NARROW_GLYPH_EM * line.size;
                    ((page_w_pt - width) / 2.0).max(margin_pt)
                } else {
                    margin_pt
                };
                if let Some(page) = pages.last_mut() {
                    page.push(Placed {
                        x_pt,
                        baseline_pt: cursor - line.size,
                        line: line.clone(),
                    });
                }
                cursor -= line_height;
            }
        }
    }

    pages
}

/// Append the ops drawing one line.
fn push_line_ops(ops: &mut Vec<Op>, placed: &Placed, face: &Face) {
    let line = &placed.line;
    let (r, g, b) = line
        .style
        .color
        .map(|c| (c.0, c.1, c.2))
        .unwrap_or((0, 0, 0));
    let color = Color::Rgb(printpdf::Rgb {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
        icc_profile: None,
    });
    let position = Point {
        x: Pt(placed.x_pt),
        y: Pt(placed.baseline_pt),
    };

    match face {
        Face::Builtin => {
            ops.push(Op::SetFillColor { col: color });
            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor { pos: position });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(line.size),
                font: builtin_for(line.style),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(line.text.clone())],
                font: builtin_for(line.style),
            });
        }
        Face::Embedded(font_id) => {
            ops.push(Op::SetFillColor { col: color.clone() });
            if line.style.bold {
                ops.push(Op::SetOutlineColor { col: color });
                ops.push(Op::SetOutlineThickness {
                    pt: Pt(line.size * FAUX_BOLD_STROKE_EM),
                });
            }
            ops.push(Op::SetTextRenderingMode {
                mode: if line.style.bold {
                    TextRenderingMode::FillStroke
                } else {
                    TextRenderingMode::Fill
                },
            });
            ops.push(Op::StartTextSection);
            if line.style.italic {
                // Tm replaces the cursor, so it carries the position too.
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Raw([
                        1.0,
                        0.0,
                        FAUX_ITALIC_SHEAR,
                        1.0,
                        placed.x_pt,
                        placed.baseline_pt,
                    ]),
                });
            } else {
                ops.push(Op::SetTextCursor { pos: position });
            }
            ops.push(Op::SetFontSize {
                size: Pt(line.size),
                font: font_id.clone(),
            });
            ops.push(Op::WriteText {
                items: vec![TextItem::Text(line.text.clone())],
                font: font_id.clone(),
            });
        }
    }
    ops.push(Op::EndTextSection);
}

fn builtin_for(style: RunStyle) -> BuiltinFont {
    match (style.bold, style.italic) {
        (true, true) => BuiltinFont::HelveticaBoldOblique,
        (true, false) => BuiltinFont::HelveticaBold,
        (false, true) => BuiltinFont::HelveticaOblique,
        (false, false) => BuiltinFont::Helvetica,
    }
}

/// First laid-out character the built-in fonts cannot encode.
fn first_unencodable(flow: &[Flow]) -> Option<char> {
    flow.iter()
        .filter_map(|item| match item {
            Flow::Line(line) => Some(line.text.as_str()),
            _ => None,
        })
        .flat_map(str::chars)
        .find(|c| *c as u32 >= 0x100)
}

// -- Text wrapping helpers ----------------------------------------------------

/// Narrow-glyph units that fit across the usable width at `size` points.
fn max_units(size: f32) -> usize {
    let usable_pt = Mm(PAGE_WIDTH_MM - 2.0 * MARGIN_MM).into_pt().0;
    (usable_pt / (NARROW_GLYPH_EM * size)).max(1.0) as usize
}

/// Display width of a character in narrow-glyph units.
fn char_units(c: char) -> usize {
    // CJK radicals through Hangul, CJK compatibility forms and fullwidth forms.
    match c as u32 {
        0x2E80..=0xD7FF | 0xF900..=0xFAFF | 0xFE30..=0xFE4F | 0xFF00..=0xFF60 => 2,
        _ => 1,
    }
}

fn text_units(text: &str) -> usize {
    text.chars().map(char_units).sum()
}

/// Wrap a multi-line string so that no line exceeds `max_width` units.
///
/// Splits on existing newlines first, then word-wraps within each line.
/// Words wider than `max_width` (including unspaced CJK runs) are broken on
/// character boundaries.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0;

        for word in words {
            let word_width = text_units(word);
            if word_width > max_width {
                for c in word.chars() {
                    let w = char_units(c);
                    if current_width + w > max_width && !current.is_empty() {
                        result.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(c);
                    current_width += w;
                }
            } else if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                result.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        if !current.is_empty() {
            result.push(current);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use bilingua_core::model::{PageSection, Rgb};

    fn two_page_document() -> DocumentModel {
        let mut doc = DocumentModel::new("report");
        for page_number in 1..=2 {
            let mut blocks = vec![
                Block::Heading {
                    level: HeadingLevel::Page,
                    text: format!("第 {page_number} 页 / Page {page_number}"),
                },
                Block::Source {
                    runs: vec![
                        Run::new("【英文原文】", RunStyle::plain().bold().colored(Rgb::DARK_BLUE)),
                        Run::new("Hello", RunStyle::plain()),
                    ],
                },
                Block::Translated {
                    runs: vec![
                        Run::new("【中文翻译】", RunStyle::plain().bold().colored(Rgb::DARK_RED)),
                        Run::new("你好", RunStyle::plain()),
                    ],
                    failed: false,
                },
                Block::Separator,
            ];
            if page_number == 1 {
                blocks.push(Block::PageBreak);
            }
            doc.push_section(PageSection {
                page_number,
                blocks,
            });
        }
        doc
    }

    fn latin_document() -> DocumentModel {
        let mut doc = DocumentModel::new("report");
        doc.push_section(PageSection {
            page_number: 1,
            blocks: vec![
                Block::Heading {
                    level: HeadingLevel::Page,
                    text: "Page 1".into(),
                },
                Block::Source {
                    runs: vec![Run::new("Café au lait", RunStyle::plain())],
                },
                Block::Separator,
            ],
        });
        doc
    }

    fn ops_for(text: &str, style: RunStyle, face: &Face) -> Vec<Op> {
        let placed = Placed {
            x_pt: 56.0,
            baseline_pt: 700.0,
            line: Line {
                text: text.into(),
                style,
                size: BODY_SIZE_PT,
                centered: false,
            },
        };
        let mut ops = Vec::new();
        push_line_ops(&mut ops, &placed, face);
        ops
    }

    fn written_text(ops: &[Op]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                Op::WriteText { items, .. } | Op::WriteTextBuiltinFont { items, .. } => {
                    Some(items.iter().filter_map(|item| match item {
                        TextItem::Text(text) => Some(text.clone()),
                        _ => None,
                    }))
                }
                _ => None,
            })
            .flatten()
            .collect()
    }

    #[test]
    fn page_break_starts_new_pdf_page() {
        let flow = layout(&two_page_document(), false);
        assert_eq!(paginate(&flow).len(), 2);
    }

    #[test]
    fn long_content_overflows_onto_new_pages() {
        let mut doc = DocumentModel::new("long");
        let blocks = (0..200).map(|_| Block::Separator).collect();
        doc.push_section(PageSection {
            page_number: 1,
            blocks,
        });

        let pages = paginate(&layout(&doc, false));

        assert!(pages.len() > 1);
        let margin_pt = Mm(MARGIN_MM).into_pt().0;
        assert!(
            pages
                .iter()
                .flatten()
                .all(|placed| placed.baseline_pt >= margin_pt - BODY_SIZE_PT)
        );
    }

    #[test]
    fn separator_uses_box_rule_only_with_embedded_font() {
        let doc = two_page_document();
        let has_rule = |flow: &[Flow], rule: char| {
            flow.iter().any(|item| {
                matches!(item, Flow::Line(line) if line.text == rule.to_string().repeat(SEPARATOR_WIDTH))
            })
        };
        assert!(has_rule(&layout(&doc, true), '─'));
        assert!(has_rule(&layout(&doc, false), '-'));
    }

    #[test]
    fn label_and_text_are_separate_lines() {
        let flow = layout(&two_page_document(), false);
        let texts: Vec<&str> = flow
            .iter()
            .filter_map(|item| match item {
                Flow::Line(line) => Some(line.text.as_str()),
                _ => None,
            })
            .collect();
        let label = texts.iter().position(|t| *t == "【英文原文】").unwrap();
        assert_eq!(texts[label + 1], "Hello");
    }

    #[test]
    fn renders_pdf_bytes_with_builtin_font() {
        let bytes = PdfWriter::a4().render(&latin_document()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.bilingual.pdf");
        PdfWriter::a4().write(&latin_document(), &path).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn builtin_font_refuses_cjk_instead_of_dropping_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.bilingual.pdf");

        let result = PdfWriter::a4().write(&two_page_document(), &path);

        match result {
            Err(BilinguaError::WriteError(message)) => assert!(message.contains("U+7B2C")),
            other => panic!("expected WriteError, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn translated_cjk_text_reaches_embedded_font_ops() {
        let face = Face::Embedded(FontId::new());
        let mut ops = Vec::new();
        for page in paginate(&layout(&two_page_document(), true)) {
            for placed in &page {
                push_line_ops(&mut ops, placed, &face);
            }
        }

        let texts = written_text(&ops);
        assert!(texts.iter().any(|t| t == "【中文翻译】"));
        assert!(texts.iter().any(|t| t == "你好"));
        assert!(texts.iter().all(|t| !t.contains('?')));
    }

    #[test]
    fn embedded_font_strokes_bold_labels() {
        let label = RunStyle::plain().bold().colored(Rgb::DARK_RED);
        let ops = ops_for("【中文翻译】", label, &Face::Embedded(FontId::new()));

        assert!(ops.iter().any(|op| matches!(
            op,
            Op::SetTextRenderingMode {
                mode: TextRenderingMode::FillStroke
            }
        )));
        assert!(ops.iter().any(|op| matches!(op, Op::SetOutlineThickness { pt } if pt.0 > 0.0)));
        assert_eq!(written_text(&ops), vec!["【中文翻译】"]);
    }

    #[test]
    fn embedded_font_plain_text_is_filled_only() {
        let ops = ops_for("你好", RunStyle::plain(), &Face::Embedded(FontId::new()));

        assert!(ops.iter().any(|op| matches!(
            op,
            Op::SetTextRenderingMode {
                mode: TextRenderingMode::Fill
            }
        )));
        assert!(!ops.iter().any(|op| matches!(op, Op::SetTextMatrix { .. })));
    }

    #[test]
    fn embedded_font_shears_italic_notes() {
        let note = RunStyle::plain().bold().italic().colored(Rgb::ORANGE);
        let ops = ops_for("【注意：此页面通过OCR识别提取】", note, &Face::Embedded(FontId::new()));

        let shear = ops.iter().find_map(|op| match op {
            Op::SetTextMatrix {
                matrix: TextMatrix::Raw(m),
            } => Some(*m),
            _ => None,
        });
        let m = shear.unwrap();
        assert_eq!(m[2], FAUX_ITALIC_SHEAR);
        assert_eq!((m[4], m[5]), (56.0, 700.0));
        assert!(!ops.iter().any(|op| matches!(op, Op::SetTextCursor { .. })));
    }

    #[test]
    fn unparseable_font_is_write_error() {
        let writer = PdfWriter::with_font(b"definitely not a font".to_vec());
        assert!(matches!(
            writer.render(&two_page_document()),
            Err(BilinguaError::WriteError(_))
        ));
    }

    #[test]
    fn builtin_style_mapping() {
        assert!(matches!(
            builtin_for(RunStyle::plain().bold().italic()),
            BuiltinFont::HelveticaBoldOblique
        ));
        assert!(matches!(builtin_for(RunStyle::plain()), BuiltinFont::Helvetica));
    }

    #[test]
    fn unencodable_detection() {
        assert_eq!(first_unencodable(&layout(&latin_document(), false)), None);
        assert_eq!(first_unencodable(&layout(&two_page_document(), false)), Some('第'));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| text_units(l) <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn wrap_breaks_cjk_on_char_boundaries() {
        let lines = wrap_text("这是一个没有空格的很长的中文句子", 8);
        assert!(lines.iter().all(|l| text_units(l) <= 8));
        assert_eq!(lines.concat(), "这是一个没有空格的很长的中文句子");
    }

    #[test]
    fn wrap_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 80), vec!["a", "", "b"]);
    }
}
