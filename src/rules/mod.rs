//! Keyword catalog, rule vocabulary and the single-word classifier.

pub mod catalog;
pub mod classify;
pub mod helpers;
pub mod rule;

#[cfg(test)]
mod tests;

pub use catalog::Relation;
pub use classify::{Classification, RepeatPolicy, WordClassifier};
pub use rule::{Category, Color, Direction, Highlight, Repeat, Rule, RuleSet, Size};
