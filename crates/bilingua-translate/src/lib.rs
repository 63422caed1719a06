// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bilingua-translate — Translation for the Bilingua converter.
//
// A `TranslationBackend` performs one request; the `TranslationClient` wraps
// it with the retry policy and never surfaces an error to its caller.

pub mod backend;
pub mod client;
pub mod retry;

pub use backend::{GoogleBackend, TranslationBackend};
pub use client::TranslationClient;
pub use retry::{Pause, RetryConfig, ThreadPause};
