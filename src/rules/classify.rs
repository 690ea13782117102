//! Single-word classification against the keyword catalog.
//!
//! ```text
//! word ──┬─ catalog index (word, singular) ──▶ style/direction/size/highlight rules
//!        ├─ repetition keywords ─────────────┐
//!        ├─ number-sound table ──▶ Sound ────┼─ RepeatPolicy ──▶ repeat
//!        └─ plural flag ─────────────────────┘
//! ```
//!
//! Conflicts are tracked beside the rules, not inside them: a word that lands
//! in two *exclusive* categories ("high" is both `Direction(up)` and
//! `Size(big)`) keeps both rules here, and the caller decides to branch
//! through [`Classification::branches`].

use crate::lexicon::Lexicon;
use crate::rules::catalog::{repeat_keyword, rules_for};
use crate::rules::helpers::singularize;
use crate::rules::rule::{Category, Repeat, Rule, RuleSet};

bitflags::bitflags! {
    /// Categories matched by a word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategoryMask: u8 {
        const COLOR     = 1 << 0;
        const CROSS     = 1 << 1;
        const DIRECTION = 1 << 2;
        const SIZE      = 1 << 3;
        const HIGHLIGHT = 1 << 4;

        const EXCLUSIVE = Self::CROSS.bits() | Self::DIRECTION.bits() | Self::SIZE.bits() | Self::HIGHLIGHT.bits();
    }
}

impl CategoryMask {
    fn of(category: Category) -> Self {
        match category {
            Category::Color => CategoryMask::COLOR,
            Category::Cross => CategoryMask::CROSS,
            Category::Direction => CategoryMask::DIRECTION,
            Category::Size => CategoryMask::SIZE,
            Category::Highlight => CategoryMask::HIGHLIGHT,
            Category::Repeat | Category::Sound | Category::Icon => CategoryMask::empty(),
        }
    }

    /// Matched categories in catalog order.
    fn categories(self) -> Vec<Category> {
        [Category::Color, Category::Cross, Category::Direction, Category::Size, Category::Highlight]
            .into_iter()
            .filter(|&c| self.contains(CategoryMask::of(c)))
            .collect()
    }
}

/// Repetition priority, highest first:
///
/// 1. a "four" keyword
/// 2. a "two" keyword
/// 3. a number-sound hint ("to" → 2, "for" → 4)
/// 4. the plural default (2)
/// 5. one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatPolicy {
    pub keyword: Option<Repeat>,
    pub sound: Option<Repeat>,
    pub plural: bool,
}

impl RepeatPolicy {
    pub fn resolve(self) -> Repeat {
        // `repeat_keyword` already ranks four above two.
        self.keyword.or(self.sound).unwrap_or(if self.plural { Repeat::Two } else { Repeat::One })
    }
}

/// Result of classifying one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub word: String,
    pub rules: RuleSet,
    /// Exclusive categories the word matched, in catalog order. Empty unless
    /// at least two matched: a single exclusive rule is not a conflict.
    pub conflicts: Vec<Category>,
}

impl Classification {
    /// True when something beyond the bare repeat fired.
    pub fn has_rule(&self) -> bool {
        self.rules.has_individual_rule()
    }

    /// Candidate rule sets. One set when there is nothing to branch on,
    /// otherwise one per conflicting category with the others stripped.
    pub fn branches(&self) -> Vec<RuleSet> {
        if self.conflicts.is_empty() {
            return vec![self.rules.clone()];
        }
        self.conflicts
            .iter()
            .map(|keep| {
                let others: Vec<Category> = self.conflicts.iter().copied().filter(|c| c != keep).collect();
                self.rules.without(&others)
            })
            .collect()
    }
}

/// Matches words against the catalog and the number-sound table.
#[derive(Debug, Clone, Copy)]
pub struct WordClassifier<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> WordClassifier<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn classify(&self, word: &str, is_plural: bool) -> Classification {
        let lower = word.to_lowercase();
        let singular = singularize(&lower);

        let mut rules = RuleSet::new();
        let mut matched = CategoryMask::empty();
        let mut forms = vec![lower.as_str()];
        if singular != lower {
            forms.push(singular.as_str());
        }

        for form in &forms {
            for rule in rules_for(form) {
                let category = rule.category();
                if !rules.contains(category) {
                    rules.insert(rule.clone());
                }
                matched |= CategoryMask::of(category);
            }
        }

        let keyword = forms.iter().filter_map(|f| repeat_keyword(f)).max();
        let sound = self.lexicon.number_sound(&lower);
        if let Some(repeat) = sound {
            rules.insert(Rule::Sound { from: lower.clone(), to: repeat.count().to_string() });
        }
        rules.set_repeat(RepeatPolicy { keyword, sound, plural: is_plural }.resolve());

        let exclusive = matched & CategoryMask::EXCLUSIVE;
        let conflicts = if exclusive.bits().count_ones() > 1 { exclusive.categories() } else { Vec::new() };

        tracing::trace!(word = %lower, rules = ?rules, conflicts = ?conflicts, "classified");

        Classification { word: lower, rules, conflicts }
    }
}
