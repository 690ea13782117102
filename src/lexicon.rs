//! Lookup tables supplied from outside the engine.
//!
//! Homophones, icons, repetition sounds, filler words and the compound-word
//! table are all read-only once built. The built-in tables are small English
//! samples; real corpora are loaded from JSON through `TablesConfig`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::TablesConfig;
use crate::error::{RebusError, RebusResult};
use crate::rules::helpers::singularize;
use crate::rules::{Repeat, Rule};

/// Homophones of one word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homophones {
    #[serde(default)]
    pub perfect: Vec<String>,
    #[serde(default)]
    pub close: Vec<String>,
}

impl Homophones {
    /// The substitution used for rendering: first perfect match, else first
    /// close match.
    pub fn best(&self) -> Option<&str> {
        self.perfect.first().or_else(|| self.close.first()).map(String::as_str)
    }
}

/// A set of words drawn with the same glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconEntry {
    pub words: Vec<String>,
    pub glyph: String,
}

/// One row of the compound-word table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundEntry {
    pub first: String,
    pub second: String,
    pub combined: String,
    #[serde(default)]
    pub plural: bool,
}

/// Homophone and icon rules a word triggers on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pub sound: Option<Rule>,
    pub icon: Option<Rule>,
}

impl Substitution {
    pub fn is_empty(&self) -> bool {
        self.sound.is_none() && self.icon.is_none()
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.sound.iter().chain(self.icon.iter())
    }
}

static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(Lexicon::builtin);

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    homophones: HashMap<String, Homophones>,
    /// Flattened word → glyph.
    icons: HashMap<String, String>,
    number_sounds: HashMap<String, Repeat>,
    fillers: HashSet<String>,
    /// Keyed by the lowercased combined form.
    compounds: HashMap<String, CompoundEntry>,
}

impl Lexicon {
    /// Shared built-in tables.
    pub fn shared() -> &'static Lexicon {
        &DEFAULT_LEXICON
    }

    /// Tables with no entries at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in tables, overridden by whichever JSON files `config` names.
    pub fn from_config(config: &TablesConfig) -> RebusResult<Self> {
        let mut lexicon = Self::shared().clone();
        if let Some(path) = &config.homophones {
            lexicon.homophones = HashMap::new();
            let table: HashMap<String, Homophones> = read_json(path)?;
            for (word, entry) in table {
                lexicon.add_homophones(&word, entry);
            }
        }
        if let Some(path) = &config.icons {
            lexicon.icons = HashMap::new();
            let table: Vec<IconEntry> = read_json(path)?;
            for entry in table {
                lexicon.add_icon(entry);
            }
        }
        if let Some(path) = &config.number_sounds {
            lexicon.number_sounds = HashMap::new();
            let table: HashMap<String, u64> = read_json(path)?;
            for (word, count) in table {
                let repeat = Repeat::from_count(count)
                    .ok_or_else(|| RebusError::Config(format!("number sound '{word}' maps to {count}, expected 2 or 4")))?;
                lexicon.add_number_sound(&word, repeat);
            }
        }
        if let Some(path) = &config.fillers {
            let table: Vec<String> = read_json(path)?;
            lexicon.fillers = table.into_iter().map(|w| w.to_lowercase()).collect();
        }
        if let Some(path) = &config.compounds {
            lexicon.compounds = HashMap::new();
            let table: Vec<CompoundEntry> = read_json(path)?;
            for entry in table {
                lexicon.add_compound(entry);
            }
        }
        tracing::debug!(
            homophones = lexicon.homophones.len(),
            icons = lexicon.icons.len(),
            number_sounds = lexicon.number_sounds.len(),
            fillers = lexicon.fillers.len(),
            compounds = lexicon.compounds.len(),
            "lexicon ready"
        );
        Ok(lexicon)
    }

    pub fn add_homophones(&mut self, word: &str, entry: Homophones) {
        self.homophones.insert(word.to_lowercase(), entry);
    }

    pub fn add_icon(&mut self, entry: IconEntry) {
        for word in entry.words {
            self.icons.insert(word.to_lowercase(), entry.glyph.clone());
        }
    }

    pub fn add_number_sound(&mut self, word: &str, repeat: Repeat) {
        self.number_sounds.insert(word.to_lowercase(), repeat);
    }

    pub fn add_filler(&mut self, word: &str) {
        self.fillers.insert(word.to_lowercase());
    }

    pub fn add_compound(&mut self, entry: CompoundEntry) {
        self.compounds.insert(entry.combined.to_lowercase(), entry);
    }

    /// Best homophone for `word` or its singular.
    pub fn homophone(&self, word: &str) -> Option<&str> {
        self.lookup(&self.homophones, word).and_then(Homophones::best)
    }

    /// Icon glyph for `word` or its singular.
    pub fn icon(&self, word: &str) -> Option<&str> {
        self.lookup(&self.icons, word).map(String::as_str)
    }

    /// Repetition this word sounds like ("to" → 2, "for" → 4).
    pub fn number_sound(&self, word: &str) -> Option<Repeat> {
        self.lookup(&self.number_sounds, word).copied()
    }

    pub fn is_filler(&self, word: &str) -> bool {
        self.fillers.contains(&word.to_lowercase())
    }

    /// Compound-table row for a combined form. `None` means the compound is
    /// outside the corpus.
    pub fn compound(&self, combined: &str) -> Option<&CompoundEntry> {
        self.compounds.get(&combined.to_lowercase())
    }

    pub fn compounds(&self) -> impl Iterator<Item = &CompoundEntry> {
        self.compounds.values()
    }

    /// Homophone and icon rules for `word`.
    pub fn substitution(&self, word: &str) -> Substitution {
        let lower = word.to_lowercase();
        let sound = self.homophone(&lower).map(|to| Rule::Sound { from: lower.clone(), to: to.to_string() });
        let icon = self.icon(&lower).map(|glyph| Rule::Icon { from: lower.clone(), glyph: glyph.to_string() });
        Substitution { sound, icon }
    }

    fn lookup<'a, V>(&self, table: &'a HashMap<String, V>, word: &str) -> Option<&'a V> {
        let lower = word.to_lowercase();
        table.get(&lower).or_else(|| table.get(&singularize(&lower)))
    }

    fn builtin() -> Self {
        let mut lexicon = Lexicon::empty();

        let homophones: &[(&str, &[&str], &[&str])] = &[
            ("knight", &["night"], &[]),
            ("night", &["knight"], &[]),
            ("sun", &["son"], &[]),
            ("son", &["sun"], &[]),
            ("flour", &["flower"], &[]),
            ("flower", &["flour"], &[]),
            ("eye", &["i"], &[]),
            ("bee", &["b", "be"], &[]),
            ("be", &["bee"], &[]),
            ("sea", &["c", "see"], &[]),
            ("see", &["c", "sea"], &[]),
            ("tea", &["t", "tee"], &[]),
            ("pea", &["p", "pee"], &[]),
            ("you", &["u", "ewe"], &[]),
            ("why", &["y"], &[]),
            ("are", &["r"], &[]),
            ("owe", &["o"], &[]),
            ("bear", &["bare"], &[]),
            ("hare", &["hair"], &[]),
            ("hair", &["hare"], &[]),
            ("write", &["right"], &[]),
            ("right", &["write", "rite"], &[]),
            ("whole", &["hole"], &[]),
            ("hole", &["whole"], &[]),
            ("knot", &["not"], &[]),
            ("won", &["one"], &[]),
            ("heel", &["heal"], &[]),
            ("deer", &["dear"], &[]),
            ("tail", &["tale"], &[]),
            ("mail", &["male"], &[]),
            ("ate", &["eight", "8"], &[]),
            ("wait", &["weight"], &[]),
            ("dough", &[], &["doe"]),
            ("later", &[], &["ladder"]),
        ];
        for (word, perfect, close) in homophones {
            lexicon.add_homophones(
                word,
                Homophones {
                    perfect: perfect.iter().map(|s| s.to_string()).collect(),
                    close: close.iter().map(|s| s.to_string()).collect(),
                },
            );
        }

        let icons: &[(&[&str], &str)] = &[
            (&["sun", "sunny", "sunshine"], "☀"),
            (&["star"], "★"),
            (&["heart", "love"], "♥"),
            (&["act", "acting", "drama", "theatre", "theater"], "🎭"),
            (&["cat", "kitten"], "🐱"),
            (&["dog", "puppy"], "🐶"),
            (&["eye"], "👁"),
            (&["bee"], "🐝"),
            (&["fish"], "🐟"),
            (&["house", "home"], "🏠"),
            (&["key"], "🔑"),
            (&["moon"], "🌙"),
            (&["rain", "raining"], "🌧"),
            (&["tree"], "🌳"),
            (&["clock", "time"], "🕒"),
            (&["fire"], "🔥"),
            (&["water"], "💧"),
            (&["snow", "snowflake"], "❄"),
            (&["phone"], "📞"),
            (&["music", "note"], "🎵"),
            (&["mail", "letter"], "✉"),
            (&["car"], "🚗"),
            (&["book"], "📖"),
        ];
        for (words, glyph) in icons {
            lexicon.add_icon(IconEntry { words: words.iter().map(|s| s.to_string()).collect(), glyph: glyph.to_string() });
        }

        for (word, repeat) in [("to", Repeat::Two), ("too", Repeat::Two), ("for", Repeat::Four), ("fore", Repeat::Four)] {
            lexicon.add_number_sound(word, repeat);
        }

        for word in [
            "a",
            "an",
            "the",
            "one's",
            "someone's",
            "somebody's",
            "his",
            "her",
            "their",
            "your",
            "my",
            "our",
            "its",
            "of",
            "oneself",
            "someone",
            "something",
        ] {
            lexicon.add_filler(word);
        }

        let compounds: &[(&str, &str, &str, bool)] = &[
            ("red", "coat", "redcoat", false),
            ("red", "coats", "redcoats", true),
            ("for", "get", "forget", false),
            ("sun", "flower", "sunflower", false),
            ("back", "fire", "backfire", false),
            ("down", "town", "downtown", false),
            ("high", "light", "highlight", false),
            ("cross", "road", "crossroad", false),
            ("big", "foot", "bigfoot", false),
            ("black", "board", "blackboard", false),
            ("up", "stairs", "upstairs", true),
        ];
        for (first, second, combined, plural) in compounds {
            lexicon.add_compound(CompoundEntry {
                first: first.to_string(),
                second: second.to_string(),
                combined: combined.to_string(),
                plural: *plural,
            });
        }

        lexicon
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> RebusResult<T> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_fall_back_to_singular() {
        let lexicon = Lexicon::shared();
        assert_eq!(lexicon.icon("cats"), Some("🐱"));
        assert_eq!(lexicon.homophone("heels"), Some("heal"));
        assert_eq!(lexicon.number_sound("for"), Some(Repeat::Four));
        assert_eq!(lexicon.number_sound("coat"), None);
    }

    #[test]
    fn close_homophones_are_a_fallback() {
        assert_eq!(Lexicon::shared().homophone("dough"), Some("doe"));
        assert_eq!(Lexicon::shared().homophone("knight"), Some("night"));
    }

    #[test]
    fn substitution_reports_both_tables() {
        let sub = Lexicon::shared().substitution("sun");
        assert_eq!(sub.sound, Some(Rule::Sound { from: "sun".into(), to: "son".into() }));
        assert_eq!(sub.icon, Some(Rule::Icon { from: "sun".into(), glyph: "☀".into() }));
        assert!(Lexicon::shared().substitution("coat").is_empty());
    }

    #[test]
    fn compound_lookup() {
        let entry = Lexicon::shared().compound("RedCoats").unwrap();
        assert_eq!(entry.second, "coats");
        assert!(entry.plural);
        assert!(Lexicon::shared().compound("zzz").is_none());
    }

    #[test]
    fn fillers() {
        assert!(Lexicon::shared().is_filler("The"));
        assert!(Lexicon::shared().is_filler("one's"));
        assert!(!Lexicon::shared().is_filler("in"));
    }

    #[test]
    fn json_tables_override_builtin() {
        let dir = std::env::temp_dir().join(format!("rebusgraph-lexicon-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let icons = dir.join("icons.json");
        std::fs::write(&icons, r#"[{ "words": ["kite"], "glyph": "🪁" }]"#).unwrap();
        let sounds = dir.join("sounds.json");
        std::fs::write(&sounds, r#"{ "two": 2 }"#).unwrap();

        let config = TablesConfig { icons: Some(icons), number_sounds: Some(sounds), ..TablesConfig::default() };
        let lexicon = Lexicon::from_config(&config).unwrap();
        assert_eq!(lexicon.icon("kite"), Some("🪁"));
        assert_eq!(lexicon.icon("cat"), None);
        assert_eq!(lexicon.number_sound("to"), None);
        assert_eq!(lexicon.homophone("knight"), Some("night"));

        let bad = dir.join("bad.json");
        std::fs::write(&bad, r#"{ "three": 3 }"#).unwrap();
        let config = TablesConfig { number_sounds: Some(bad), ..TablesConfig::default() };
        assert!(matches!(Lexicon::from_config(&config), Err(RebusError::Config(_))));

        std::fs::remove_dir_all(&dir).ok();
    }
}
