use std::collections::HashSet;

/// Split of a candidate noun list into markable common nouns and the
/// rejected complement. Order of the source list is preserved on both sides.
#[derive(Debug, Clone, Default)]
pub struct NounFilterOutcome {
    pub kept: Vec<String>,
    pub removed: Vec<String>,
}

/// Decides which candidate phrases are common nouns worth marking. Proper
/// nouns, place names and brand names arrive capitalized and are rejected;
/// lowercase title nouns from the allow-list are kept even when they usually
/// precede a proper name.
pub fn filter_common_nouns(
    candidates: &[String],
    connector_words: &[String],
    title_nouns: &[String],
) -> NounFilterOutcome {
    let connectors: HashSet<String> = connector_words
        .iter()
        .map(|word| word.to_lowercase())
        .collect();
    let titles: HashSet<String> = title_nouns.iter().map(|word| word.to_lowercase()).collect();

    let mut outcome = NounFilterOutcome::default();
    for candidate in candidates {
        let phrase = candidate.trim();
        if phrase.is_empty() {
            continue;
        }
        if is_markable(phrase, &connectors, &titles) {
            outcome.kept.push(candidate.clone());
        } else {
            outcome.removed.push(candidate.clone());
        }
    }
    outcome
}

fn is_markable(phrase: &str, connectors: &HashSet<String>, titles: &HashSet<String>) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() > 1 {
        // One capitalized content word disqualifies the whole compound.
        return words
            .iter()
            .all(|word| connectors.contains(&word.to_lowercase()) || !is_capitalized(word));
    }

    let word = words[0];
    if titles.contains(&word.to_lowercase()) {
        return !is_capitalized(word);
    }
    !is_capitalized(word)
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().map(char::is_uppercase).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn filter(candidates: &[&str]) -> NounFilterOutcome {
        let settings = Settings::default();
        let candidates: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
        filter_common_nouns(&candidates, &settings.connector_words, &settings.title_nouns)
    }

    #[test]
    fn keeps_common_nouns_and_drops_proper_nouns() {
        let outcome = filter(&["presidente", "Trump", "carteira de motorista", "São Paulo"]);
        assert_eq!(outcome.kept, vec!["presidente", "carteira de motorista"]);
        assert_eq!(outcome.removed, vec!["Trump", "São Paulo"]);
    }

    #[test]
    fn connector_words_do_not_disqualify_compounds() {
        let outcome = filter(&["copo de agua", "Copa do Mundo"]);
        assert_eq!(outcome.kept, vec!["copo de agua"]);
        assert_eq!(outcome.removed, vec!["Copa do Mundo"]);
    }

    #[test]
    fn capitalized_title_word_is_still_excluded() {
        // Sentence-initial titles lose their markup; accepted behavior.
        let outcome = filter(&["Presidente", "presidente"]);
        assert_eq!(outcome.kept, vec!["presidente"]);
        assert_eq!(outcome.removed, vec!["Presidente"]);
    }

    #[test]
    fn unicode_capitalization_is_detected() {
        let outcome = filter(&["Água", "água"]);
        assert_eq!(outcome.kept, vec!["água"]);
        assert_eq!(outcome.removed, vec!["Água"]);
    }

    #[test]
    fn blank_candidates_vanish_silently() {
        let outcome = filter(&["", "  ", "casa"]);
        assert_eq!(outcome.kept, vec!["casa"]);
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let outcome = filter(&["casa", "carro", "bicicleta"]);
        assert_eq!(outcome.kept, vec!["casa", "carro", "bicicleta"]);
    }
}
