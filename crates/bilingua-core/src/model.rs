// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Structured bilingual document model.
//
// The assembler decides every heading, run style and break; writers only
// render what they are given. Keeping styling in the model makes the layout
// testable without producing a file.

use serde::{Deserialize, Serialize};

/// Number of rule characters in a separator line.
pub const SEPARATOR_WIDTH: usize = 50;

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const ORANGE: Rgb = Rgb(255, 140, 0);
    pub const DARK_BLUE: Rgb = Rgb(0, 0, 139);
    pub const DARK_RED: Rgb = Rgb(139, 0, 0);
}

/// Character formatting of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
}

impl RunStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// A span of text sharing one style. Writers start every run on a new line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Heading levels used by the bilingual layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Document title, centred.
    Title,
    /// Per-page heading.
    Page,
}

/// One element of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    Note { runs: Vec<Run> },
    Source { runs: Vec<Run> },
    Translated { runs: Vec<Run>, failed: bool },
    Separator,
    PageBreak,
}

/// Structural shape of a [`Block`], without content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Note,
    Source,
    Translated,
    Separator,
    PageBreak,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Note { .. } => BlockKind::Note,
            Block::Source { .. } => BlockKind::Source,
            Block::Translated { .. } => BlockKind::Translated,
            Block::Separator => BlockKind::Separator,
            Block::PageBreak => BlockKind::PageBreak,
        }
    }

    /// The runs of a paragraph-like block; empty for headings and markers.
    pub fn runs(&self) -> &[Run] {
        match self {
            Block::Note { runs } | Block::Source { runs } | Block::Translated { runs, .. } => runs,
            _ => &[],
        }
    }

    /// Body text of the block: the heading text, or the last run of a
    /// paragraph (the run after the label).
    pub fn body(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } => Some(text),
            _ => self.runs().last().map(|run| run.text.as_str()),
        }
    }
}

/// Everything emitted for one source page, starting with its heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    pub page_number: u32,
    pub blocks: Vec<Block>,
}

/// The complete bilingual document handed to a writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub title: String,
    pub sections: Vec<PageSection>,
}

impl DocumentModel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn push_section(&mut self, section: PageSection) {
        self.sections.push(section);
    }

    /// All blocks across sections, in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|section| section.blocks.iter())
    }

    /// The structural shape of the document.
    pub fn block_kinds(&self) -> Vec<BlockKind> {
        self.blocks().map(Block::kind).collect()
    }

    pub fn page_count(&self) -> usize {
        self.sections.len()
    }
}
