use llm_reader_rust::markup::{apply_markup, filter_common_nouns};
use llm_reader_rust::settings::Settings;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn filter_then_markup_end_to_end() {
    let settings = Settings::default();
    let nouns = strings(&["presidente", "Trump", "carteira de motorista", "São Paulo"]);
    let outcome = filter_common_nouns(&nouns, &settings.connector_words, &settings.title_nouns);
    assert_eq!(outcome.kept, strings(&["presidente", "carteira de motorista"]));

    let marked = apply_markup(
        "O presidente tirou a carteira de motorista em São Paulo",
        &outcome.kept,
        &strings(&["tirou"]),
        &settings.noun_color,
    )
    .unwrap();
    assert_eq!(
        marked,
        "O <span style=\"color:darkred\">presidente</span> <strong>tirou</strong> a \
         <span style=\"color:darkred\">carteira de motorista</span> em São Paulo"
    );
}

#[test]
fn longest_phrase_wins_without_nesting() {
    let settings = Settings::default();
    let marked = apply_markup(
        "Ele tem um carro velho",
        &strings(&["carro", "carro velho"]),
        &[],
        &settings.noun_color,
    )
    .unwrap();
    assert_eq!(
        marked,
        "Ele tem um <span style=\"color:darkred\">carro velho</span>"
    );
    assert_eq!(marked.matches("<span").count(), 1);
}

#[test]
fn text_without_matches_passes_through_unchanged() {
    let settings = Settings::default();
    let sentence = "Uma frase sem nada para destacar";
    let marked = apply_markup(
        sentence,
        &strings(&["inexistente"]),
        &strings(&["ausente"]),
        &settings.noun_color,
    )
    .unwrap();
    assert_eq!(marked, sentence);
}
