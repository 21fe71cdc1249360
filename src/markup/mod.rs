mod apply;
mod matcher;
mod nouns;

pub use apply::apply_markup;
pub use matcher::{find_phrase_matches, phrase_pattern};
pub use nouns::{filter_common_nouns, NounFilterOutcome};
