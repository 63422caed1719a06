// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Translation backends.
//
// A backend performs exactly one request and reports failure as an error;
// retrying and fallback are the client's job.

use bilingua_core::config::TranslationSettings;
use bilingua_core::error::{BilinguaError, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, instrument};

/// Public endpoint of the free Google Translate web client.
pub const GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// A machine-translation service.
pub trait TranslationBackend {
    /// Translate `text` from `source_lang` (or `"auto"`) into `target_lang`.
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
}

impl<B: TranslationBackend + ?Sized> TranslationBackend for &B {
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        (**self).translate(text, source_lang, target_lang)
    }
}

impl<B: TranslationBackend + ?Sized> TranslationBackend for Box<B> {
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        (**self).translate(text, source_lang, target_lang)
    }
}

/// Google Translate through the keyless `gtx` web-client endpoint.
pub struct GoogleBackend {
    client: Client,
    endpoint: String,
}

impl GoogleBackend {
    pub fn new(settings: &TranslationSettings) -> Result<Self> {
        Self::with_endpoint(settings, GOOGLE_ENDPOINT)
    }

    /// Backend against a different base URL (a proxy or a local stub).
    pub fn with_endpoint(settings: &TranslationSettings, endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| {
                BilinguaError::Translation(format!("failed to build HTTP client: {}", err))
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl TranslationBackend for GoogleBackend {
    #[instrument(skip_all, fields(chars = text.chars().count(), sl = source_lang, tl = target_lang))]
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("dt", "t"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("q", text),
            ])
            .send()
            .map_err(|err| BilinguaError::Translation(format!("request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BilinguaError::Translation(format!(
                "translation service returned HTTP {}",
                status
            )));
        }

        let body = response.json::<Value>().map_err(|err| {
            BilinguaError::Translation(format!("unexpected response format: {}", err))
        })?;
        debug!("translation response received");

        parse_response(&body)
    }
}

/// Join the translated segments of a `gtx` response.
///
/// The body is a nested array whose first element lists segments as
/// `[translated, original, ...]`.
pub fn parse_response(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| BilinguaError::Translation("response has no segments".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(BilinguaError::Translation(
            "translation service returned empty text".into(),
        ));
    }
    Ok(translated)
}
