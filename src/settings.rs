use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Settings {
    pub default_target: String,
    pub full_mode_max_batch: usize,
    pub fast_mode_item_cap: usize,
    pub full_mode_item_cap: usize,
    pub noun_color: String,
    pub connector_words: Vec<String>,
    pub title_nouns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_target: "pt-BR".to_string(),
            full_mode_max_batch: 20,
            fast_mode_item_cap: 30,
            full_mode_item_cap: 15,
            noun_color: "darkred".to_string(),
            connector_words: to_strings(&[
                "de", "da", "do", "das", "dos", "e", "of", "the", "and",
            ]),
            title_nouns: to_strings(&[
                "presidente",
                "president",
                "doutor",
                "doutora",
                "doctor",
                "professor",
                "professora",
                "ministro",
                "ministra",
                "minister",
                "governador",
                "governadora",
                "governor",
                "prefeito",
                "prefeita",
                "mayor",
                "senador",
                "senadora",
                "senator",
                "deputado",
                "deputada",
                "juiz",
                "juiza",
                "judge",
                "padre",
                "priest",
                "rei",
                "rainha",
                "king",
                "queen",
                "treinador",
                "treinadora",
                "coach",
                "capitao",
                "capitã",
                "captain",
                "general",
                "coronel",
                "colonel",
            ]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    translation: Option<TranslationSettings>,
    markup: Option<MarkupSettings>,
    linguistic: Option<LinguisticSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct TranslationSettings {
    default_target: Option<String>,
    full_mode_max_batch: Option<usize>,
    fast_mode_item_cap: Option<usize>,
    full_mode_item_cap: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct MarkupSettings {
    noun_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LinguisticSettings {
    connector_words: Option<Vec<String>>,
    title_nouns: Option<Vec<String>>,
}

pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(home) = home_dir() {
        ordered_paths.push(home.join("settings.toml"));
        ordered_paths.push(home.join("settings.local.toml"));
    }

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed: SettingsFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings.merge(parsed);
        }
    }

    Ok(settings)
}

impl Settings {
    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(translation) = incoming.translation {
            if let Some(target) = translation.default_target {
                if !target.trim().is_empty() {
                    self.default_target = target;
                }
            }
            if let Some(limit) = translation.full_mode_max_batch {
                if limit > 0 {
                    self.full_mode_max_batch = limit;
                }
            }
            if let Some(cap) = translation.fast_mode_item_cap {
                if cap > 0 {
                    self.fast_mode_item_cap = cap;
                }
            }
            if let Some(cap) = translation.full_mode_item_cap {
                if cap > 0 {
                    self.full_mode_item_cap = cap;
                }
            }
        }
        if let Some(markup) = incoming.markup {
            if let Some(color) = markup.noun_color {
                if !color.trim().is_empty() {
                    self.noun_color = color;
                }
            }
        }
        if let Some(linguistic) = incoming.linguistic {
            if let Some(words) = linguistic.connector_words {
                self.connector_words = words;
            }
            if let Some(titles) = linguistic.title_nouns {
                self.title_nouns = titles;
            }
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(".llm-reader-rust"))
        }
    })
}
