//! Static keyword catalog.
//!
//! Every keyword list is a flat constant; `CATALOG` groups them by category
//! and `KEYWORD_INDEX` inverts the table for O(1) word lookup. The catalog is
//! configuration, not data: swap the constants to retarget the generator.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use crate::rules::rule::{Category, Color, Direction, Highlight, Repeat, Rule, Size};

// Style: colour
const RED: &[&str] = &["red", "scarlet", "crimson", "ruby"];
const ORANGE: &[&str] = &["orange", "tangerine"];
const YELLOW: &[&str] = &["yellow", "amber"];
const GREEN: &[&str] = &["green", "emerald", "olive"];
const BLUE: &[&str] = &["blue", "navy", "azure"];
const PURPLE: &[&str] = &["purple", "violet", "lilac"];
const PINK: &[&str] = &["pink", "rose"];
const BROWN: &[&str] = &["brown"];
const BLACK: &[&str] = &["black", "dark"];
const WHITE: &[&str] = &["white", "pale"];
const GRAY: &[&str] = &["gray", "grey"];
const GOLD: &[&str] = &["gold", "golden"];
const SILVER: &[&str] = &["silver"];

// Style: crossing
const CROSS: &[&str] = &[
    "cross", "crossed", "cancel", "cancelled", "canceled", "strike", "struck", "delete", "erase", "scratch", "void",
    "forbidden", "banned",
];

// Direction
const UP: &[&str] = &["up", "upward", "upwards", "rise", "rising", "high", "raise", "climb", "ascend", "lift"];
const DOWN: &[&str] = &["down", "downward", "downwards", "fall", "falling", "drop", "low", "sink", "descend"];
const REVERSE: &[&str] = &["reverse", "reversed", "back", "backward", "backwards", "inverse", "flip", "mirror", "return"];

// Size
const BIG: &[&str] = &["big", "large", "huge", "giant", "great", "grand", "tall", "high", "major", "mega", "jumbo"];
const SMALL: &[&str] = &["small", "little", "tiny", "mini", "short", "low", "minor", "wee", "petite"];

// Highlight
const BEFORE: &[&str] = &["first", "front", "fore", "start", "head", "begin", "beginning", "early", "lead"];
const MIDDLE: &[&str] = &["middle", "mid", "center", "centre", "core", "heart", "half"];
const AFTER: &[&str] = &["last", "end", "tail", "rear", "behind", "back", "late", "final"];

// Repetition
const TWO: &[&str] = &["two", "double", "twice", "pair", "couple", "twin", "twins", "dual"];
const FOUR: &[&str] = &["four", "quad", "quadruple", "quartet"];

// Relational (edge) keywords
const INSIDE: &[&str] = &["in", "inside", "within", "into"];
const OUTSIDE: &[&str] = &["out", "outside"];
const ABOVE: &[&str] = &["over", "above", "on", "upon", "atop"];

/// A keyword list and the rule it assigns.
#[derive(Debug, Clone)]
pub struct KeywordGroup {
    pub rule: Rule,
    pub keywords: &'static [&'static str],
}

fn group(rule: Rule, keywords: &'static [&'static str]) -> KeywordGroup {
    KeywordGroup { rule, keywords }
}

/// Category → keyword groups. Repetition keywords are kept out of this table
/// because they follow `RepeatPolicy` rather than plain assignment.
pub static CATALOG: Lazy<BTreeMap<Category, Vec<KeywordGroup>>> = Lazy::new(|| {
    BTreeMap::from([
        (
            Category::Color,
            vec![
                group(Rule::Color(Color::Red), RED),
                group(Rule::Color(Color::Orange), ORANGE),
                group(Rule::Color(Color::Yellow), YELLOW),
                group(Rule::Color(Color::Green), GREEN),
                group(Rule::Color(Color::Blue), BLUE),
                group(Rule::Color(Color::Purple), PURPLE),
                group(Rule::Color(Color::Pink), PINK),
                group(Rule::Color(Color::Brown), BROWN),
                group(Rule::Color(Color::Black), BLACK),
                group(Rule::Color(Color::White), WHITE),
                group(Rule::Color(Color::Gray), GRAY),
                group(Rule::Color(Color::Gold), GOLD),
                group(Rule::Color(Color::Silver), SILVER),
            ],
        ),
        (Category::Cross, vec![group(Rule::Cross, CROSS)]),
        (
            Category::Direction,
            vec![
                group(Rule::Direction(Direction::Up), UP),
                group(Rule::Direction(Direction::Down), DOWN),
                group(Rule::Direction(Direction::Reverse), REVERSE),
            ],
        ),
        (Category::Size, vec![group(Rule::Size(Size::Big), BIG), group(Rule::Size(Size::Small), SMALL)]),
        (
            Category::Highlight,
            vec![
                group(Rule::Highlight(Highlight::Before), BEFORE),
                group(Rule::Highlight(Highlight::Middle), MIDDLE),
                group(Rule::Highlight(Highlight::After), AFTER),
            ],
        ),
    ])
});

/// Keyword → rules it triggers, in catalog order.
pub static KEYWORD_INDEX: Lazy<HashMap<&'static str, Vec<Rule>>> = Lazy::new(|| {
    let mut index: HashMap<&'static str, Vec<Rule>> = HashMap::new();
    for groups in CATALOG.values() {
        for g in groups {
            for &keyword in g.keywords {
                let rules = index.entry(keyword).or_default();
                // A keyword listed twice in one category keeps its first rule.
                if !rules.iter().any(|r| r.category() == g.rule.category()) {
                    rules.push(g.rule.clone());
                }
            }
        }
    }
    index
});

/// Spatial relation carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Relation {
    #[default]
    NextTo,
    Inside,
    Outside,
    Above,
}

impl Relation {
    pub const fn name(self) -> &'static str {
        match self {
            Relation::NextTo => "NEXT_TO",
            Relation::Inside => "INSIDE",
            Relation::Outside => "OUTSIDE",
            Relation::Above => "ABOVE",
        }
    }

    pub const fn is_relational(self) -> bool {
        !matches!(self, Relation::NextTo)
    }
}

impl serde::Serialize for Relation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

const RELATIONAL: &[(Relation, &[&str])] =
    &[(Relation::Inside, INSIDE), (Relation::Outside, OUTSIDE), (Relation::Above, ABOVE)];

/// Look up rules for a single keyword.
pub fn rules_for(word: &str) -> &'static [Rule] {
    KEYWORD_INDEX.get(word).map(Vec::as_slice).unwrap_or(&[])
}

/// Relation for a relational keyword, if `word` is one.
pub fn relation_for(word: &str) -> Option<Relation> {
    RELATIONAL.iter().find(|(_, keywords)| keywords.contains(&word)).map(|(relation, _)| *relation)
}

/// Repetition forced by an explicit keyword. "four" keywords outrank "two".
pub fn repeat_keyword(word: &str) -> Option<Repeat> {
    if FOUR.contains(&word) {
        Some(Repeat::Four)
    } else if TWO.contains(&word) {
        Some(Repeat::Two)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_covers_every_keyword() {
        for groups in CATALOG.values() {
            for g in groups {
                for keyword in g.keywords {
                    assert!(rules_for(keyword).contains(&g.rule), "keyword '{keyword}' missing {:?}", g.rule);
                }
            }
        }
    }

    #[test]
    fn shared_keywords_map_to_several_categories() {
        let categories: Vec<Category> = rules_for("high").iter().map(Rule::category).collect();
        assert_eq!(categories, vec![Category::Direction, Category::Size]);

        let categories: Vec<Category> = rules_for("back").iter().map(Rule::category).collect();
        assert_eq!(categories, vec![Category::Direction, Category::Highlight]);
    }

    #[test]
    fn relational_keywords() {
        assert_eq!(relation_for("in"), Some(Relation::Inside));
        assert_eq!(relation_for("outside"), Some(Relation::Outside));
        assert_eq!(relation_for("over"), Some(Relation::Above));
        assert_eq!(relation_for("up"), None);
    }

    #[test]
    fn repetition_keywords() {
        assert_eq!(repeat_keyword("four"), Some(Repeat::Four));
        assert_eq!(repeat_keyword("double"), Some(Repeat::Two));
        assert_eq!(repeat_keyword("coat"), None);
    }
}
