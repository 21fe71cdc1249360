use anyhow::{Context, Result};
use tera::{Context as TeraContext, Tera};

const FAST_PROMPT_TEMPLATE: &str = include_str!("prompts/fast_prompt.tera");
const FULL_PROMPT_TEMPLATE: &str = include_str!("prompts/full_prompt.tera");

/// Fixed system message for every model call.
pub const SYSTEM_PROMPT: &str =
    "You are a translation engine. Output ONLY valid JSON, with no commentary.";

/// Renders the translation-only instruction.
pub fn render_fast_prompt(target_lang: &str, items: &[String]) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("target_lang", target_lang);
    context.insert("sentence_list", &sentence_list(items));
    Tera::one_off(FAST_PROMPT_TEMPLATE, &context, false)
        .with_context(|| "failed to render fast prompt")
}

/// Renders the translation-plus-analysis instruction. The lowercase-title
/// examples come from the configured allow-list so the prompt and the noun
/// filter stay in sync.
pub fn render_full_prompt(
    target_lang: &str,
    items: &[String],
    title_nouns: &[String],
) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("target_lang", target_lang);
    context.insert("sentence_list", &sentence_list(items));
    context.insert("title_examples", &title_examples(title_nouns));
    Tera::one_off(FULL_PROMPT_TEMPLATE, &context, false)
        .with_context(|| "failed to render full prompt")
}

fn sentence_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, sentence)| format!("{}. {}", index + 1, sentence))
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_examples(title_nouns: &[String]) -> String {
    let examples: Vec<String> = title_nouns
        .iter()
        .take(3)
        .map(|noun| format!("\"{}\"", noun))
        .collect();
    if examples.is_empty() {
        "\"presidente\"".to_string()
    } else {
        examples.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn fast_prompt_numbers_sentences_in_order() {
        let prompt = render_fast_prompt("pt-BR", &items(&["First.", "Second."])).unwrap();
        assert!(prompt.contains("into pt-BR"));
        assert!(prompt.contains("1. First."));
        assert!(prompt.contains("2. Second."));
        assert!(prompt.contains("JSON array of plain strings"));
    }

    #[test]
    fn full_prompt_carries_the_analysis_contract() {
        let titles = items(&["presidente", "doutor", "professor", "rei"]);
        let prompt = render_full_prompt("pt-BR", &items(&["One."]), &titles).unwrap();
        assert!(prompt.contains("into pt-BR"));
        assert!(prompt.contains("auxiliary"));
        assert!(prompt.contains("copular"));
        assert!(prompt.contains("infinitive"));
        assert!(prompt.contains("multi-word"));
        assert!(prompt.contains("proper nouns"));
        assert!(prompt.contains("historical events"));
        assert!(prompt.contains("\"presidente\", \"doutor\", \"professor\""));
        assert!(prompt.contains(r#"[{"translation": "...", "verbs": ["..."], "nouns": ["..."]}]"#));
        assert!(prompt.contains("preserving"));
        assert!(prompt.contains("1. One."));
    }

    #[test]
    fn title_examples_fall_back_when_list_is_empty() {
        let prompt = render_full_prompt("en", &items(&["x"]), &[]).unwrap();
        assert!(prompt.contains("\"presidente\""));
    }
}
