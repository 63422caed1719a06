// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Retrying translation client.

use bilingua_core::config::TranslationSettings;
use bilingua_core::labels::is_placeholder;
use bilingua_core::types::TranslationResult;
use tracing::{debug, instrument, warn};

use crate::backend::TranslationBackend;
use crate::retry::{Pause, RetryConfig, RetryDecision, ThreadPause, should_retry};

/// Translates single paragraphs, retrying failed requests.
///
/// `translate` never fails: after the last failed attempt the result carries
/// a fallback string that embeds the source text, with `failed` set.
pub struct TranslationClient<B, P = ThreadPause> {
    backend: B,
    retry: RetryConfig,
    source_lang: String,
    target_lang: String,
    pause: P,
}

impl<B: TranslationBackend> TranslationClient<B> {
    pub fn new(backend: B, settings: &TranslationSettings) -> Self {
        Self {
            backend,
            retry: RetryConfig::from(settings),
            source_lang: settings.source_lang.clone(),
            target_lang: settings.target_lang.clone(),
            pause: ThreadPause,
        }
    }
}

impl<B: TranslationBackend, P: Pause> TranslationClient<B, P> {
    /// Replace how the client waits between requests.
    pub fn with_pause<Q: Pause>(self, pause: Q) -> TranslationClient<B, Q> {
        TranslationClient {
            backend: self.backend,
            retry: self.retry,
            source_lang: self.source_lang,
            target_lang: self.target_lang,
            pause,
        }
    }

    /// Translate one paragraph.
    ///
    /// Blank input and unrecognized-page placeholders pass through without a
    /// backend call.
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub fn translate(&self, text: &str) -> TranslationResult {
        if text.trim().is_empty() || is_placeholder(text) {
            debug!("nothing to translate");
            return TranslationResult::passthrough(text);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self
                .backend
                .translate(text, &self.source_lang, &self.target_lang)
            {
                Ok(translated) => {
                    self.pause.pause(self.retry.success_pause);
                    return TranslationResult::success(text, translated);
                }
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        error = %err,
                        "translation attempt failed"
                    );
                    match should_retry(attempt, &self.retry) {
                        RetryDecision::RetryAfter(delay) => self.pause.pause(delay),
                        RetryDecision::Exhausted => return TranslationResult::fallback(text),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use bilingua_core::error::{BilinguaError, Result};
    use bilingua_core::labels::{empty_ocr_placeholder, ocr_error_placeholder};

    /// Fails the first `failures` calls, then upper-cases the input.
    struct Flaky {
        failures: u32,
        calls: Cell<u32>,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: Cell::new(0),
            }
        }
    }

    impl TranslationBackend for Flaky {
        fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call <= self.failures {
                Err(BilinguaError::Translation(format!("HTTP 429 on call {call}")))
            } else {
                Ok(text.to_uppercase())
            }
        }
    }

    #[derive(Default)]
    struct RecordedPauses(RefCell<Vec<Duration>>);

    impl Pause for RecordedPauses {
        fn pause(&self, duration: Duration) {
            self.0.borrow_mut().push(duration);
        }
    }

    fn client<'a>(
        backend: &'a Flaky,
        pauses: &'a RecordedPauses,
    ) -> TranslationClient<&'a Flaky, &'a RecordedPauses> {
        TranslationClient::new(backend, &TranslationSettings::default()).with_pause(pauses)
    }

    #[test]
    fn success_pauses_once() {
        let backend = Flaky::new(0);
        let pauses = RecordedPauses::default();

        let result = client(&backend, &pauses).translate("hello");

        assert_eq!(result, TranslationResult::success("hello", "HELLO"));
        assert_eq!(backend.calls.get(), 1);
        assert_eq!(*pauses.0.borrow(), vec![Duration::from_millis(500)]);
    }

    #[test]
    fn recovers_after_fewer_failures_than_attempts() {
        let backend = Flaky::new(2);
        let pauses = RecordedPauses::default();

        let result = client(&backend, &pauses).translate("hello");

        assert!(!result.failed);
        assert_eq!(result.translated, "HELLO");
        assert_eq!(backend.calls.get(), 3);
        assert_eq!(
            *pauses.0.borrow(),
            vec![
                Duration::from_secs(2),
                Duration::from_secs(2),
                Duration::from_millis(500)
            ]
        );
    }

    #[test]
    fn always_failing_falls_back_with_source_verbatim() {
        let backend = Flaky::new(u32::MAX);
        let pauses = RecordedPauses::default();

        let result = client(&backend, &pauses).translate("The quick brown fox.");

        assert!(result.failed);
        assert!(result.translated.contains("The quick brown fox."));
        assert_eq!(backend.calls.get(), 3);
        // No wait after the final failure.
        assert_eq!(pauses.0.borrow().len(), 2);
    }

    #[test]
    fn max_attempts_is_configurable() {
        let backend = Flaky::new(u32::MAX);
        let pauses = RecordedPauses::default();
        let settings = TranslationSettings {
            max_attempts: 5,
            ..TranslationSettings::default()
        };

        let result = TranslationClient::new(&backend, &settings)
            .with_pause(&pauses)
            .translate("text");

        assert!(result.failed);
        assert_eq!(backend.calls.get(), 5);
    }

    #[test]
    fn blank_input_skips_backend() {
        let backend = Flaky::new(0);
        let pauses = RecordedPauses::default();
        let client = client(&backend, &pauses);

        for text in ["", "   ", "\n\t"] {
            let result = client.translate(text);
            assert_eq!(result, TranslationResult::passthrough(text));
        }
        assert_eq!(backend.calls.get(), 0);
        assert!(pauses.0.borrow().is_empty());
    }

    #[test]
    fn placeholders_skip_backend() {
        let backend = Flaky::new(0);
        let pauses = RecordedPauses::default();
        let client = client(&backend, &pauses);

        for text in [empty_ocr_placeholder(), ocr_error_placeholder("boom")] {
            let result = client.translate(&text);
            assert!(!result.failed);
            assert_eq!(result.translated, text);
        }
        assert_eq!(backend.calls.get(), 0);
    }
}
