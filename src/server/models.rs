use serde::{Deserialize, Serialize};

use crate::translate::FilteredAnalysis;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct TranslateQuery {
    pub(crate) sentence: Option<String>,
    pub(crate) sentences: Option<String>,
    pub(crate) target: Option<String>,
    #[serde(rename = "skipGrammar")]
    pub(crate) skip_grammar: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TranslateResponse {
    pub(crate) count: usize,
    pub(crate) translations: Vec<String>,
    #[serde(rename = "skippedGrammar", skip_serializing_if = "Option::is_none")]
    pub(crate) skipped_grammar: Option<bool>,
    #[serde(rename = "rawAnalysis", skip_serializing_if = "Option::is_none")]
    pub(crate) raw_analysis: Option<Vec<FilteredAnalysis>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl TranslateResponse {
    pub(crate) fn empty() -> Self {
        Self {
            count: 0,
            translations: Vec::new(),
            skipped_grammar: None,
            raw_analysis: None,
            warning: None,
            error: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct ArticleQuery {
    pub(crate) url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ArticleResponse {
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: String,
}
