use serde_json::Value;

/// Pulls the first JSON array out of a free-form model reply. The reply is
/// rarely pure JSON: it may be wrapped in prose or code fences, use curly or
/// single quotes, or carry trailing commas. Returns `None` only when no
/// repair attempt yields a parseable array (a lone object is accepted and
/// wrapped as a one-element array).
pub fn extract_json_array(raw: &str) -> Option<Vec<Value>> {
    if let Some(span) = span_between(raw, '[', ']') {
        if let Some(Value::Array(values)) = parse_with_repairs(span) {
            return Some(values);
        }
    }
    if let Some(span) = span_between(raw, '{', '}') {
        if let Some(value @ Value::Object(_)) = parse_with_repairs(span) {
            return Some(vec![value]);
        }
    }
    None
}

fn span_between(raw: &str, open: char, close: char) -> Option<&str> {
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn parse_with_repairs(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }
    let repaired = strip_trailing_commas(&straighten_quotes(text));
    if let Ok(value) = serde_json::from_str(&repaired) {
        return Some(value);
    }
    serde_json::from_str(&single_to_double_quotes(&repaired)).ok()
}

fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{201c}' | '\u{201d}' | '\u{201e}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Drops a comma when the next non-whitespace character closes the current
/// array or object. Explicit scan instead of a pattern so quoted commas are
/// untouched only when they genuinely precede a closer.
fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut output = String::with_capacity(text.len());
    for (index, &ch) in chars.iter().enumerate() {
        if ch == ',' {
            let next = chars[index + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }
        output.push(ch);
    }
    output
}

fn single_to_double_quotes(text: &str) -> String {
    text.replace('\'', "\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_array_is_extracted() {
        let values = extract_json_array(r#"["um", "dois"]"#).unwrap();
        assert_eq!(values, vec![json!("um"), json!("dois")]);
    }

    #[test]
    fn array_is_found_inside_prose_and_fences() {
        let raw = "Sure! Here are the translations:\n```json\n[\"olá\", \"tchau\"]\n```\nDone.";
        let values = extract_json_array(raw).unwrap();
        assert_eq!(values, vec![json!("olá"), json!("tchau")]);
    }

    #[test]
    fn curly_quotes_are_straightened() {
        let raw = "[\u{201c}casa\u{201d}, \u{201c}carro\u{201d}]";
        let values = extract_json_array(raw).unwrap();
        assert_eq!(values, vec![json!("casa"), json!("carro")]);
    }

    #[test]
    fn trailing_commas_are_stripped() {
        let values = extract_json_array(r#"[{"translation": "oi", }, ]"#).unwrap();
        assert_eq!(values, vec![json!({"translation": "oi"})]);
    }

    #[test]
    fn single_quoted_arrays_are_repaired() {
        let values = extract_json_array("['um', 'dois']").unwrap();
        assert_eq!(values, vec![json!("um"), json!("dois")]);
    }

    #[test]
    fn lone_object_is_wrapped_in_an_array() {
        let values = extract_json_array(r#"{"translation": "oi"}"#).unwrap();
        assert_eq!(values, vec![json!({"translation": "oi"})]);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(extract_json_array("no structured data here").is_none());
        assert!(extract_json_array("[not, valid, at all").is_none());
        assert!(extract_json_array("").is_none());
    }
}
