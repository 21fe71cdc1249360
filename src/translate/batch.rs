use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationMode {
    /// Translation only; grammatical analysis skipped.
    Fast,
    /// Translation plus verb/noun analysis and markup.
    Full,
}

/// Raw translate-endpoint parameters before normalization.
#[derive(Debug, Clone, Default)]
pub struct TranslateParams {
    pub sentence: Option<String>,
    pub sentences: Option<String>,
    pub skip_grammar: bool,
}

/// Ordered, capped input for one translation request.
#[derive(Debug, Clone)]
pub struct SentenceBatch {
    pub items: Vec<String>,
    pub mode: TranslationMode,
    pub dropped: usize,
}

impl SentenceBatch {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Validates the request input and produces the batch the orchestrator will
/// submit. Missing or malformed input is the endpoint's only hard failure.
pub fn normalize(params: &TranslateParams, settings: &Settings) -> Result<SentenceBatch> {
    let mut items = read_items(params)?;

    let mode = if params.skip_grammar || items.len() > settings.full_mode_max_batch {
        TranslationMode::Fast
    } else {
        TranslationMode::Full
    };

    let cap = match mode {
        TranslationMode::Fast => settings.fast_mode_item_cap,
        TranslationMode::Full => settings.full_mode_item_cap,
    };
    let dropped = items.len().saturating_sub(cap);
    items.truncate(cap);

    Ok(SentenceBatch {
        items,
        mode,
        dropped,
    })
}

fn read_items(params: &TranslateParams) -> Result<Vec<String>> {
    if let Some(sentence) = params.sentence.as_deref() {
        if !sentence.trim().is_empty() {
            return Ok(vec![sentence.to_string()]);
        }
    }

    let Some(raw) = params.sentences.as_deref() else {
        return Err(anyhow!("no sentence(s) provided"));
    };

    let parsed: Value =
        serde_json::from_str(raw).map_err(|_| anyhow!("invalid sentences array"))?;
    let Some(values) = parsed.as_array() else {
        return Err(anyhow!("invalid sentences array"));
    };

    Ok(values.iter().map(item_text).collect())
}

fn item_text(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}
