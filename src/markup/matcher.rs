use anyhow::{Context, Result};
use regex::Regex;
use std::ops::Range;

/// Builds a case-insensitive whole-phrase pattern for a literal phrase.
/// Every metacharacter in the phrase is escaped, so the phrase matches only
/// itself, never as a fragment of a longer word.
pub fn phrase_pattern(phrase: &str) -> String {
    format!(r"(?i)\b{}\b", regex::escape(phrase))
}

/// Finds occurrences of `phrase` in `html` that are safe to wrap: whole-word,
/// case-insensitive, outside tag text, and outside any already-opened element
/// pair. Occurrences inside existing markup are silently skipped.
pub fn find_phrase_matches(html: &str, phrase: &str) -> Result<Vec<Range<usize>>> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = phrase_pattern(phrase);
    let regex = Regex::new(&pattern)
        .with_context(|| format!("failed to compile phrase pattern for '{}'", phrase))?;
    let map = TagMap::scan(html);
    Ok(regex
        .find_iter(html)
        .map(|found| found.range())
        .filter(|range| map.is_markable(range))
        .collect())
}

/// Per-byte wrap safety derived from a single scan of the string. A byte is
/// markable when it sits outside `<...>` tag text and at element depth zero.
struct TagMap {
    markable: Vec<bool>,
}

impl TagMap {
    fn scan(html: &str) -> Self {
        let bytes = html.as_bytes();
        let mut markable = vec![false; bytes.len()];
        let mut in_tag = false;
        let mut closing = false;
        let mut depth = 0usize;

        for (index, &byte) in bytes.iter().enumerate() {
            if !in_tag && byte == b'<' {
                in_tag = true;
                closing = bytes.get(index + 1) == Some(&b'/');
            }
            markable[index] = !in_tag && depth == 0;
            if in_tag && byte == b'>' {
                let self_closing = index > 0 && bytes[index - 1] == b'/';
                in_tag = false;
                if closing {
                    depth = depth.saturating_sub(1);
                } else if !self_closing {
                    depth += 1;
                }
            }
        }

        Self { markable }
    }

    fn is_markable(&self, range: &Range<usize>) -> bool {
        range.clone().all(|index| self.markable[index])
    }
}
