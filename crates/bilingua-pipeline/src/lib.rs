// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bilingua-pipeline — Bilingual assembly and batch processing.
//
// `BilingualAssembler` turns extracted pages into a styled `DocumentModel`;
// `BatchOrchestrator` runs discovery, extraction, assembly and writing for a
// whole directory, isolating per-document failures.

pub mod assemble;
pub mod orchestrator;

pub use assemble::{BilingualAssembler, split_paragraphs};
pub use orchestrator::{BatchOrchestrator, BatchReport, discover_inputs, output_path_for};
