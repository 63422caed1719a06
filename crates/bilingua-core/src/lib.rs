// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bilingua — Core types, labels and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod labels;
pub mod model;
pub mod types;

pub use config::AppConfig;
pub use error::BilinguaError;
pub use labels::Labels;
pub use model::DocumentModel;
pub use types::*;
