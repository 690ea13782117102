//! Rule vocabulary shared by the classifier, the graph generators and the
//! renderer.
//!
//! A `Rule` is one visual transformation applied to a puzzle node. Rules are
//! grouped by `Category`; a `RuleSet` holds at most one rule per category, so
//! "two colours on one word" is unrepresentable. `Repeat` is always present
//! (default 1) which is why callers read `len() <= 1` as "nothing fired".

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Rule category. Ordering is the catalog order and drives every
/// deterministic iteration (classification conflicts, text dumps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Color,
    Cross,
    Direction,
    Size,
    Highlight,
    Repeat,
    Sound,
    Icon,
}

impl Category {
    pub const fn name(self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Cross => "cross",
            Category::Direction => "direction",
            Category::Size => "size",
            Category::Highlight => "highlight",
            Category::Repeat => "repeat",
            Category::Sound => "sound",
            Category::Icon => "icon",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Brown,
    Black,
    White,
    Gray,
    Gold,
    Silver,
}

impl Color {
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Brown => "brown",
            Color::Black => "black",
            Color::White => "white",
            Color::Gray => "gray",
            Color::Gold => "gold",
            Color::Silver => "silver",
        }
    }

    /// Fill colour used by the renderer.
    pub const fn hex(self) -> &'static str {
        match self {
            Color::Red => "#d62728",
            Color::Orange => "#ff7f0e",
            Color::Yellow => "#e6c619",
            Color::Green => "#2ca02c",
            Color::Blue => "#1f77b4",
            Color::Purple => "#9467bd",
            Color::Pink => "#e377c2",
            Color::Brown => "#8c564b",
            Color::Black => "#000000",
            // White ink on a white canvas is invisible; draw it outlined instead.
            Color::White => "#ffffff",
            Color::Gray => "#7f7f7f",
            Color::Gold => "#d4af37",
            Color::Silver => "#a8a9ad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Reverse,
}

impl Direction {
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Reverse => "reverse",
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    Big,
    Small,
}

impl Size {
    pub const fn name(self) -> &'static str {
        match self {
            Size::Big => "big",
            Size::Small => "small",
        }
    }

    /// Font-scale multiplier.
    pub const fn scale(self) -> f32 {
        match self {
            Size::Big => 2.0,
            Size::Small => 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Highlight {
    Before,
    Middle,
    After,
}

impl Highlight {
    pub const fn name(self) -> &'static str {
        match self {
            Highlight::Before => "before",
            Highlight::Middle => "middle",
            Highlight::After => "after",
        }
    }
}

/// Repetition count. Only 1, 2 and 4 have a keyword or sound behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Repeat {
    #[default]
    One,
    Two,
    Four,
}

impl Repeat {
    pub const fn count(self) -> usize {
        match self {
            Repeat::One => 1,
            Repeat::Two => 2,
            Repeat::Four => 4,
        }
    }

    pub fn from_count(count: u64) -> Option<Self> {
        match count {
            1 => Some(Repeat::One),
            2 => Some(Repeat::Two),
            4 => Some(Repeat::Four),
            _ => None,
        }
    }
}

/// One visual transformation attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    Color(Color),
    Cross,
    Direction(Direction),
    Size(Size),
    Highlight(Highlight),
    Repeat(Repeat),
    /// Homophone substitution: `from` is read aloud as `to`.
    Sound { from: String, to: String },
    /// Icon substitution: `from` is drawn as `glyph`.
    Icon { from: String, glyph: String },
}

impl Rule {
    pub fn category(&self) -> Category {
        match self {
            Rule::Color(_) => Category::Color,
            Rule::Cross => Category::Cross,
            Rule::Direction(_) => Category::Direction,
            Rule::Size(_) => Category::Size,
            Rule::Highlight(_) => Category::Highlight,
            Rule::Repeat(_) => Category::Repeat,
            Rule::Sound { .. } => Category::Sound,
            Rule::Icon { .. } => Category::Icon,
        }
    }

    /// Human-readable payload used by text dumps and JSON output.
    pub fn value(&self) -> String {
        match self {
            Rule::Color(c) => c.name().to_string(),
            Rule::Cross => "true".to_string(),
            Rule::Direction(d) => d.name().to_string(),
            Rule::Size(s) => s.name().to_string(),
            Rule::Highlight(h) => h.name().to_string(),
            Rule::Repeat(r) => r.count().to_string(),
            Rule::Sound { from, to } => format!("{from} -> {to}"),
            Rule::Icon { from, glyph } => format!("{from} -> {glyph}"),
        }
    }
}

/// At most one rule per category, ordered by category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleSet {
    rules: BTreeMap<Category, Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(Category::Repeat, Rule::Repeat(Repeat::One));
        RuleSet { rules }
    }
}

impl RuleSet {
    /// A rule set holding only `repeat=1`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repeat(repeat: Repeat) -> Self {
        let mut set = Self::default();
        set.set_repeat(repeat);
        set
    }

    /// Insert `rule`, replacing whatever held its category.
    pub fn insert(&mut self, rule: Rule) -> Option<Rule> {
        self.rules.insert(rule.category(), rule)
    }

    pub fn get(&self, category: Category) -> Option<&Rule> {
        self.rules.get(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.rules.contains_key(&category)
    }

    /// Remove a category. `Repeat` resets to 1 instead of disappearing.
    pub fn remove(&mut self, category: Category) -> Option<Rule> {
        if category == Category::Repeat {
            return self.rules.insert(Category::Repeat, Rule::Repeat(Repeat::One));
        }
        self.rules.remove(&category)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.rules.keys().copied()
    }

    pub fn repeat(&self) -> Repeat {
        match self.rules.get(&Category::Repeat) {
            Some(Rule::Repeat(r)) => *r,
            _ => Repeat::One,
        }
    }

    pub fn set_repeat(&mut self, repeat: Repeat) {
        self.rules.insert(Category::Repeat, Rule::Repeat(repeat));
    }

    /// True when something beyond the bare repeat fired.
    pub fn has_individual_rule(&self) -> bool {
        self.len() > 1
    }

    /// Rules that count toward puzzle difficulty: everything except a
    /// neutral `repeat=1`.
    pub fn individual_count(&self) -> usize {
        self.iter().filter(|r| !matches!(r, Rule::Repeat(Repeat::One))).count()
    }

    /// Copy of this set without the listed categories.
    pub fn without(&self, categories: &[Category]) -> RuleSet {
        let mut out = self.clone();
        for &category in categories {
            out.remove(category);
        }
        out
    }

    /// Fill categories missing here from `other`; existing values win.
    pub fn absorb(&mut self, other: &RuleSet) {
        for rule in other.iter() {
            let category = rule.category();
            match category {
                Category::Repeat => {
                    if self.repeat() == Repeat::One {
                        self.set_repeat(other.repeat());
                    }
                }
                _ => {
                    self.rules.entry(category).or_insert_with(|| rule.clone());
                }
            }
        }
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::default();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl RuleSet {
    /// Write each rule as a `category: value` map entry.
    pub(crate) fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        for (category, rule) in &self.rules {
            map.serialize_entry(category.name(), &RuleValue(rule))?;
        }
        Ok(())
    }
}

/// JSON value of a single rule, without its category key.
pub(crate) struct RuleValue<'a>(pub &'a Rule);

impl Serialize for RuleValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Rule::Repeat(r) => serializer.serialize_u64(r.count() as u64),
            Rule::Cross => serializer.serialize_bool(true),
            Rule::Sound { from, to } => BTreeMap::from([(from, to)]).serialize(serializer),
            Rule::Icon { from, glyph } => BTreeMap::from([(from, glyph)]).serialize(serializer),
            other => serializer.serialize_str(&other.value()),
        }
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        self.serialize_entries(&mut map)?;
        map.end()
    }
}
