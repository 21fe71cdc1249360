use anyhow::Result;

use super::matcher::find_phrase_matches;

/// Applies inline markup to a translated sentence: noun phrases get a colored
/// span, verb phrases get bolded. Nouns are wrapped before verbs, and each
/// class is applied longest-phrase-first so compounds are wrapped before the
/// shorter phrases they contain. Phrases without a safe match leave the
/// sentence untouched.
pub fn apply_markup(
    sentence: &str,
    nouns: &[String],
    verbs: &[String],
    noun_color: &str,
) -> Result<String> {
    let noun_open = format!(r#"<span style="color:{}">"#, noun_color);
    let mut marked = sentence.to_string();
    for phrase in longest_first(nouns) {
        marked = wrap_phrase(&marked, phrase, &noun_open, "</span>")?;
    }
    for phrase in longest_first(verbs) {
        marked = wrap_phrase(&marked, phrase, "<strong>", "</strong>")?;
    }
    Ok(marked)
}

fn longest_first(phrases: &[String]) -> Vec<&String> {
    let mut ordered: Vec<&String> = phrases
        .iter()
        .filter(|phrase| !phrase.trim().is_empty())
        .collect();
    ordered.sort_by(|left, right| right.chars().count().cmp(&left.chars().count()));
    ordered
}

fn wrap_phrase(html: &str, phrase: &str, open: &str, close: &str) -> Result<String> {
    let matches = find_phrase_matches(html, phrase)?;
    if matches.is_empty() {
        return Ok(html.to_string());
    }
    // Right-to-left so earlier replacements never shift later ranges.
    let mut marked = html.to_string();
    for range in matches.iter().rev() {
        let wrapped = format!("{}{}{}", open, &html[range.clone()], close);
        marked.replace_range(range.clone(), &wrapped);
    }
    Ok(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(sentence: &str, nouns: &[&str], verbs: &[&str]) -> String {
        let nouns: Vec<String> = nouns.iter().map(|n| n.to_string()).collect();
        let verbs: Vec<String> = verbs.iter().map(|v| v.to_string()).collect();
        apply_markup(sentence, &nouns, &verbs, "darkred").unwrap()
    }

    #[test]
    fn wraps_nouns_and_verbs_without_touching_the_rest() {
        let marked = apply("O presidente visitou o Brasil", &["presidente"], &["visitou"]);
        insta::assert_snapshot!(
            marked,
            @r#"O <span style="color:darkred">presidente</span> <strong>visitou</strong> o Brasil"#
        );
    }

    #[test]
    fn longer_compound_wins_over_contained_phrase() {
        let marked = apply("Ele tem um carro velho", &["carro", "carro velho"], &[]);
        insta::assert_snapshot!(
            marked,
            @r#"Ele tem um <span style="color:darkred">carro velho</span>"#
        );
    }

    #[test]
    fn verbs_never_nest_inside_noun_spans() {
        let marked = apply("A visita foi boa", &["visita"], &["visita"]);
        insta::assert_snapshot!(
            marked,
            @r#"A <span style="color:darkred">visita</span> foi boa"#
        );
    }

    #[test]
    fn repeated_occurrences_are_all_wrapped() {
        let marked = apply("casa e casa", &["casa"], &[]);
        assert_eq!(
            marked,
            r#"<span style="color:darkred">casa</span> e <span style="color:darkred">casa</span>"#
        );
    }

    #[test]
    fn matched_casing_is_preserved() {
        let marked = apply("Presidente fala", &["presidente"], &[]);
        assert_eq!(marked, r#"<span style="color:darkred">Presidente</span> fala"#);
    }

    #[test]
    fn no_matches_is_the_identity() {
        let sentence = "Nada para marcar aqui";
        assert_eq!(apply(sentence, &["inexistente"], &["ausente"]), sentence);
        assert_eq!(apply(sentence, &[], &[]), sentence);
    }

    #[test]
    fn configurable_noun_color_is_honored() {
        let marked = apply_markup("uma casa", &["casa".to_string()], &[], "teal").unwrap();
        assert_eq!(marked, r#"uma <span style="color:teal">casa</span>"#);
    }
}
