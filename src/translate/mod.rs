use tracing::{debug, warn};

mod analysis;
mod batch;
pub mod prompt;
mod salvage;

pub use analysis::{analysis_from_value, AnalysisResult, FilteredAnalysis};
pub use batch::{normalize, SentenceBatch, TranslateParams, TranslationMode};

use crate::markup::apply_markup;
use crate::providers::{CompletionParams, Provider};
use crate::settings::Settings;

const TEMPERATURE: f32 = 0.1;
const FAST_MAX_OUTPUT_TOKENS: u32 = 2048;
const FULL_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Why a degraded outcome was produced. The translate endpoint still answers
/// with HTTP success; the marker becomes a diagnostic field on the response.
#[derive(Debug, Clone)]
pub enum Degradation {
    None,
    /// Model replied but no JSON could be salvaged.
    Parse(String),
    /// The model call itself failed (network, status, missing key).
    Call(String),
}

/// Result of one batch translation. `translations` always has one entry per
/// submitted sentence, in input order; `analyses` is present only for a
/// successful full-mode run.
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    pub translations: Vec<String>,
    pub analyses: Option<Vec<FilteredAnalysis>>,
    pub degradation: Degradation,
}

#[derive(Debug, Clone)]
pub struct Translator<P: Provider + Clone> {
    provider: P,
    settings: Settings,
}

impl<P: Provider + Clone> Translator<P> {
    pub fn new(provider: P, settings: Settings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the batch through the model and reduces the reply. Never fails:
    /// collaborator errors degrade to echoing the original sentences.
    pub async fn translate_batch(&self, batch: &SentenceBatch, target: &str) -> TranslationOutcome {
        if batch.dropped > 0 {
            warn!(
                "batch truncated: {} item(s) beyond the {:?}-mode cap were dropped",
                batch.dropped, batch.mode
            );
        }
        match batch.mode {
            TranslationMode::Fast => self.translate_fast(batch, target).await,
            TranslationMode::Full => self.translate_full(batch, target).await,
        }
    }

    async fn translate_fast(&self, batch: &SentenceBatch, target: &str) -> TranslationOutcome {
        let prompt = match prompt::render_fast_prompt(target, &batch.items) {
            Ok(prompt) => prompt,
            Err(err) => return echo_outcome(batch, Degradation::Call(err.to_string())),
        };
        let params = CompletionParams {
            temperature: TEMPERATURE,
            max_output_tokens: FAST_MAX_OUTPUT_TOKENS,
        };
        let raw = match self.dispatch(prompt, params).await {
            Ok(raw) => raw,
            Err(err) => return echo_outcome(batch, Degradation::Call(err.to_string())),
        };

        let Some(values) = salvage::extract_json_array(&raw) else {
            return echo_outcome(batch, parse_degradation());
        };

        let translations = batch
            .items
            .iter()
            .enumerate()
            .map(|(index, original)| {
                values
                    .get(index)
                    .and_then(|value| value.as_str())
                    .map(str::to_string)
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| original.clone())
            })
            .collect();

        TranslationOutcome {
            translations,
            analyses: None,
            degradation: Degradation::None,
        }
    }

    async fn translate_full(&self, batch: &SentenceBatch, target: &str) -> TranslationOutcome {
        let prompt =
            match prompt::render_full_prompt(target, &batch.items, &self.settings.title_nouns) {
                Ok(prompt) => prompt,
                Err(err) => return echo_outcome(batch, Degradation::Call(err.to_string())),
            };
        let params = CompletionParams {
            temperature: TEMPERATURE,
            max_output_tokens: FULL_MAX_OUTPUT_TOKENS,
        };
        let raw = match self.dispatch(prompt, params).await {
            Ok(raw) => raw,
            Err(err) => return echo_outcome(batch, Degradation::Call(err.to_string())),
        };

        let Some(values) = salvage::extract_json_array(&raw) else {
            return echo_outcome(batch, parse_degradation());
        };

        let mut translations = Vec::with_capacity(batch.items.len());
        let mut analyses = Vec::with_capacity(batch.items.len());
        for (index, original) in batch.items.iter().enumerate() {
            let result = values
                .get(index)
                .map(analysis_from_value)
                .unwrap_or_else(|| AnalysisResult::echo(original));
            let filtered = FilteredAnalysis::derive(
                &result,
                &self.settings.connector_words,
                &self.settings.title_nouns,
            );
            translations.push(self.mark_sentence(&filtered, original));
            analyses.push(filtered);
        }

        TranslationOutcome {
            translations,
            analyses: Some(analyses),
            degradation: Degradation::None,
        }
    }

    fn mark_sentence(&self, filtered: &FilteredAnalysis, original: &str) -> String {
        let sentence = if filtered.translation.trim().is_empty() {
            original
        } else {
            filtered.translation.as_str()
        };
        match apply_markup(
            sentence,
            &filtered.filtered_nouns,
            &filtered.verbs,
            &self.settings.noun_color,
        ) {
            Ok(marked) => marked,
            Err(err) => {
                warn!("markup failed, returning unmarked sentence: {}", err);
                sentence.to_string()
            }
        }
    }

    async fn dispatch(&self, prompt: String, params: CompletionParams) -> anyhow::Result<String> {
        let raw = self
            .provider
            .clone()
            .append_system_input(prompt::SYSTEM_PROMPT.to_string())
            .append_user_input(prompt)
            .complete(params)
            .await?;
        debug!("model raw reply: {}", raw);
        Ok(raw)
    }
}

fn parse_degradation() -> Degradation {
    Degradation::Parse("model reply was not valid JSON; returning original sentences".to_string())
}

fn echo_outcome(batch: &SentenceBatch, degradation: Degradation) -> TranslationOutcome {
    TranslationOutcome {
        translations: batch.items.clone(),
        analyses: None,
        degradation,
    }
}
