use serde::Serialize;
use serde_json::Value;

use crate::markup::filter_common_nouns;

/// One parsed entry of the model's full-mode reply.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub translation: String,
    pub verbs: Vec<String>,
    pub nouns: Vec<String>,
}

impl AnalysisResult {
    pub fn echo(sentence: &str) -> Self {
        Self {
            translation: sentence.to_string(),
            verbs: Vec::new(),
            nouns: Vec::new(),
        }
    }
}

/// Tolerant per-entry decode. Objects yield their fields (translation falls
/// back to the empty string, lists to empty); a bare string is taken as a
/// translation without analysis; anything else yields an empty result.
pub fn analysis_from_value(value: &Value) -> AnalysisResult {
    match value {
        Value::Object(fields) => AnalysisResult {
            translation: fields
                .get("translation")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            verbs: string_list(fields.get("verbs")),
            nouns: string_list(fields.get("nouns")),
        },
        Value::String(text) => AnalysisResult {
            translation: text.clone(),
            verbs: Vec::new(),
            nouns: Vec::new(),
        },
        _ => AnalysisResult {
            translation: String::new(),
            verbs: Vec::new(),
            nouns: Vec::new(),
        },
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(values)) = value else {
        return Vec::new();
    };
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}

/// An `AnalysisResult` with its noun list run through the common-noun filter.
/// Pure derivation: the source result is never mutated. `original_nouns` and
/// `filtered_out` are kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredAnalysis {
    pub translation: String,
    pub verbs: Vec<String>,
    pub filtered_nouns: Vec<String>,
    pub original_nouns: Vec<String>,
    pub filtered_out: Vec<String>,
}

impl FilteredAnalysis {
    pub fn derive(
        result: &AnalysisResult,
        connector_words: &[String],
        title_nouns: &[String],
    ) -> Self {
        let outcome = filter_common_nouns(&result.nouns, connector_words, title_nouns);
        Self {
            translation: result.translation.clone(),
            verbs: result.verbs.clone(),
            filtered_nouns: outcome.kept,
            original_nouns: result.nouns.clone(),
            filtered_out: outcome.removed,
        }
    }
}
