use crate::providers::Provider;
use crate::translate::{
    self, Degradation, TranslateParams, TranslationMode, TranslationOutcome, Translator,
};

use super::models::{TranslateQuery, TranslateResponse};

#[derive(Debug)]
pub(crate) struct ServerError {
    pub(crate) status: axum::http::StatusCode,
    pub(crate) message: String,
}

impl ServerError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: axum::http::StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self {
            status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::internal(err.to_string())
    }
}

pub(crate) async fn translate_request<P: Provider + Clone>(
    translator: &Translator<P>,
    query: TranslateQuery,
) -> Result<TranslateResponse, ServerError> {
    let params = TranslateParams {
        sentence: query.sentence,
        sentences: query.sentences,
        skip_grammar: flag_is_truthy(query.skip_grammar.as_deref()),
    };
    let batch = translate::normalize(&params, translator.settings())
        .map_err(|err| ServerError::bad_request(err.to_string()))?;
    if batch.is_empty() {
        return Ok(TranslateResponse::empty());
    }

    let target = query
        .target
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| translator.settings().default_target.clone());

    let outcome = translator.translate_batch(&batch, &target).await;
    Ok(response_from_outcome(batch.mode, outcome))
}

fn flag_is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("true") | Some("1")
    )
}

fn response_from_outcome(mode: TranslationMode, outcome: TranslationOutcome) -> TranslateResponse {
    let mut response = TranslateResponse {
        count: outcome.translations.len(),
        translations: outcome.translations,
        skipped_grammar: None,
        raw_analysis: None,
        warning: None,
        error: None,
    };
    match outcome.degradation {
        Degradation::Parse(warning) => response.warning = Some(warning),
        Degradation::Call(error) => response.error = Some(error),
        Degradation::None => match mode {
            TranslationMode::Fast => response.skipped_grammar = Some(true),
            TranslationMode::Full => response.raw_analysis = outcome.analyses,
        },
    }
    response
}
