//! Compound words: one constituent supplies the rule, the other the picture.
//!
//! ```text
//! "red" + "coats" (plural)
//!   classify("red")   → { color: red, repeat: 2 }     ─┐
//!   display("coats")  → "COAT"                         ├─▶ [COAT {red, ×2}]
//!   classify("coats") → { repeat: 2 }  (nothing fired) ┘
//! ```
//!
//! Candidate order is stable: word1-as-rule branches, then word2-as-rule
//! branches, then the side-by-side rendering. Sound/icon splitting and dedup
//! run over that list before `answer` is stamped.

use crate::error::{RebusError, RebusResult};
use crate::graph::PuzzleGraph;
use crate::lexicon::Lexicon;
use crate::rules::helpers::singularize;
use crate::rules::{Category, Classification, Relation, Repeat, Rule, RuleSet, WordClassifier};

use super::dedup::dedup;

#[derive(Debug, Clone, Copy)]
pub struct CompoundGraphGenerator<'a> {
    lexicon: &'a Lexicon,
    classifier: WordClassifier<'a>,
}

impl<'a> CompoundGraphGenerator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon, classifier: WordClassifier::new(lexicon) }
    }

    pub fn classifier(&self) -> WordClassifier<'a> {
        self.classifier
    }

    /// Candidate graphs for `word1 + word2`. An empty list is a normal
    /// outcome: neither word triggered anything.
    pub fn generate(&self, word1: &str, word2: &str, is_plural: bool) -> RebusResult<Vec<PuzzleGraph>> {
        let (word1, word2) = (word1.trim(), word2.trim());
        if word1.is_empty() || word2.is_empty() {
            return Err(RebusError::MissingTextAttribute);
        }

        let first = self.classifier.classify(word1, is_plural);
        let second = self.classifier.classify(word2, is_plural);

        let mut candidates = Vec::new();
        self.push_modified(&mut candidates, &first, word2, is_plural)?;
        self.push_modified(&mut candidates, &second, word1, is_plural)?;
        if let Some(graph) = self.side_by_side(word1, word2, is_plural)? {
            candidates.push(graph);
        }

        let split: Vec<PuzzleGraph> =
            candidates.into_iter().flat_map(|g| split_sound_icon(g, is_plural)).collect();
        let mut graphs = dedup(split);

        let answer = format!("{word1}{word2}");
        for graph in &mut graphs {
            graph.answer = answer.clone();
        }

        tracing::debug!(word1, word2, is_plural, candidates = graphs.len(), "compound generated");
        Ok(graphs)
    }

    /// Look `combined` up in the compound table and generate from its row.
    /// `None` means the compound is unknown.
    pub fn generate_word(&self, combined: &str) -> RebusResult<Option<Vec<PuzzleGraph>>> {
        let Some(entry) = self.lexicon.compound(combined) else {
            tracing::debug!(combined, "unknown compound");
            return Ok(None);
        };
        self.generate(&entry.first, &entry.second, entry.plural).map(Some)
    }

    /// One single-node graph per rule-set branch of `rule_word`, drawing
    /// `content_word`.
    fn push_modified(
        &self,
        out: &mut Vec<PuzzleGraph>,
        rule_word: &Classification,
        content_word: &str,
        is_plural: bool,
    ) -> RebusResult<()> {
        if !rule_word.has_rule() {
            return Ok(());
        }
        let branches = rule_word.branches();
        if branches.len() > 1 {
            tracing::debug!(word = %rule_word.word, conflicts = ?rule_word.conflicts, "branching on conflicts");
        }
        for rules in branches {
            let (text, rules) = self.content_node(content_word, is_plural, rules);
            let mut graph = PuzzleGraph::new();
            graph.add_node(&text, rules)?;
            out.push(graph);
        }
        Ok(())
    }

    /// Both words next to each other, only when one of them substitutes.
    fn side_by_side(&self, word1: &str, word2: &str, is_plural: bool) -> RebusResult<Option<PuzzleGraph>> {
        if self.lexicon.substitution(word1).is_empty() && self.lexicon.substitution(word2).is_empty() {
            return Ok(None);
        }
        let (text1, rules1) = self.content_node(word1, false, RuleSet::new());
        let repeat = if is_plural { Repeat::Two } else { Repeat::One };
        let (text2, rules2) = self.content_node(word2, is_plural, RuleSet::with_repeat(repeat));

        let mut graph = PuzzleGraph::new();
        let a = graph.add_node(&text1, rules1)?;
        let b = graph.add_node(&text2, rules2)?;
        graph.add_edge(a, b, Relation::NextTo)?;
        Ok(Some(graph))
    }

    /// Displayed text for `word` plus `rules` extended with the word's own
    /// homophone/icon substitution.
    ///
    /// Number sounds render as their digit. A substitution never overwrites a
    /// Sound or Icon the rule word already brought.
    pub(crate) fn content_node(&self, word: &str, is_plural: bool, mut rules: RuleSet) -> (String, RuleSet) {
        let lower = word.to_lowercase();
        if let Some(repeat) = self.lexicon.number_sound(&lower) {
            return (repeat.count().to_string(), rules);
        }
        let substitution = self.lexicon.substitution(&lower);
        for rule in substitution.rules() {
            if !rules.contains(rule.category()) {
                rules.insert(rule.clone());
            }
        }
        let text = display_text(&lower, is_plural, &rules);
        (text, rules)
    }

    /// Plain node: the word itself, no rules.
    pub(crate) fn plain_node(&self, word: &str) -> RebusResult<PuzzleGraph> {
        let mut graph = PuzzleGraph::new();
        graph.add_node(&plain_text(word, false), RuleSet::new())?;
        Ok(graph)
    }
}

fn plain_text(word: &str, is_plural: bool) -> String {
    let word = if is_plural { singularize(word) } else { word.to_lowercase() };
    word.to_uppercase()
}

/// Icon glyph wins, then this word's own homophone, then the plain word.
fn display_text(word: &str, is_plural: bool, rules: &RuleSet) -> String {
    if let Some(Rule::Icon { from, glyph }) = rules.get(Category::Icon) {
        if from == word {
            return glyph.clone();
        }
    }
    if let Some(Rule::Sound { from, to }) = rules.get(Category::Sound) {
        if from == word {
            return to.to_uppercase();
        }
    }
    plain_text(word, is_plural)
}

/// Split every node carrying both Sound and Icon into a sound-only and an
/// icon-only variant. A graph with `n` such nodes yields `2^n` graphs.
pub(crate) fn split_sound_icon(graph: PuzzleGraph, is_plural: bool) -> Vec<PuzzleGraph> {
    let conflicted = graph
        .nodes()
        .find(|n| n.rules.contains(Category::Sound) && n.rules.contains(Category::Icon))
        .map(|n| n.id);
    let Some(id) = conflicted else {
        return vec![graph];
    };

    let mut sound_only = graph.clone();
    let mut icon_only = graph;

    if let Some(node) = sound_only.node_mut(id) {
        let icon_word = match node.rules.remove(Category::Icon) {
            Some(Rule::Icon { from, .. }) => from,
            _ => String::new(),
        };
        node.text = match node.rules.get(Category::Sound) {
            Some(Rule::Sound { from, to }) if *from == icon_word => to.to_uppercase(),
            _ => plain_text(&icon_word, is_plural),
        };
    }
    if let Some(node) = icon_only.node_mut(id) {
        node.rules.remove(Category::Sound);
        if let Some(Rule::Icon { glyph, .. }) = node.rules.get(Category::Icon) {
            node.text = glyph.clone();
        }
    }

    tracing::debug!(node = id, "split sound/icon conflict");
    let mut out = split_sound_icon(sound_only, is_plural);
    out.extend(split_sound_icon(icon_only, is_plural));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::difficulty;
    use crate::rules::{Color, Direction, Size};

    fn generator() -> CompoundGraphGenerator<'static> {
        CompoundGraphGenerator::new(Lexicon::shared())
    }

    fn only_node(graph: &PuzzleGraph) -> &crate::graph::PuzzleNode {
        assert_eq!(graph.node_count(), 1, "expected a single node:\n{graph}");
        graph.nodes().next().unwrap()
    }

    #[test]
    fn red_coat() {
        let graphs = generator().generate("red", "coat", false).unwrap();
        assert_eq!(graphs.len(), 1);
        let node = only_node(&graphs[0]);
        assert_eq!(node.text, "COAT");
        assert_eq!(node.rules.get(Category::Color), Some(&Rule::Color(Color::Red)));
        assert_eq!(node.rules.repeat(), Repeat::One);
        assert_eq!(graphs[0].answer, "redcoat");
    }

    #[test]
    fn red_coats_plural() {
        let graphs = generator().generate("red", "coats", true).unwrap();
        assert_eq!(graphs.len(), 1);
        let node = only_node(&graphs[0]);
        assert_eq!(node.text, "COAT");
        assert_eq!(node.rules.get(Category::Color), Some(&Rule::Color(Color::Red)));
        assert_eq!(node.rules.repeat(), Repeat::Two);
    }

    #[test]
    fn to_for_yields_both_number_readings() {
        let graphs = generator().generate("to", "for", false).unwrap();
        assert_eq!(graphs.len(), 2);

        let first = only_node(&graphs[0]);
        assert_eq!(first.text, "4");
        assert_eq!(first.rules.repeat(), Repeat::Two);
        assert_eq!(first.rules.get(Category::Sound), Some(&Rule::Sound { from: "to".into(), to: "2".into() }));

        let second = only_node(&graphs[1]);
        assert_eq!(second.text, "2");
        assert_eq!(second.rules.repeat(), Repeat::Four);
        assert_eq!(second.rules.get(Category::Sound), Some(&Rule::Sound { from: "for".into(), to: "4".into() }));
    }

    #[test]
    fn plain_words_produce_nothing() {
        assert!(generator().generate("door", "bell", false).unwrap().is_empty());
    }

    #[test]
    fn blank_word_is_rejected() {
        assert!(matches!(generator().generate(" ", "coat", false), Err(RebusError::MissingTextAttribute)));
    }

    #[test]
    fn conflicts_branch_into_separate_graphs() {
        // "high": Direction(up) and Size(big) are both exclusive.
        let graphs = generator().generate("high", "chair", false).unwrap();
        assert_eq!(graphs.len(), 2);
        let a = only_node(&graphs[0]);
        let b = only_node(&graphs[1]);
        assert_eq!(a.rules.get(Category::Direction), Some(&Rule::Direction(Direction::Up)));
        assert!(!a.rules.contains(Category::Size));
        assert_eq!(b.rules.get(Category::Size), Some(&Rule::Size(Size::Big)));
        assert!(!b.rules.contains(Category::Direction));
        assert!(graphs.iter().all(|g| g.nodes().all(|n| n.text == "CHAIR")));
    }

    #[test]
    fn side_by_side_when_a_word_substitutes() {
        // "knight" → NIGHT, "cap" is plain; no rule word, so only side-by-side.
        let graphs = generator().generate("knight", "cap", false).unwrap();
        assert_eq!(graphs.len(), 1);
        let texts: Vec<&str> = graphs[0].nodes().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["NIGHT", "CAP"]);
        assert_eq!(graphs[0].edges().len(), 1);
        assert_eq!(graphs[0].edges()[0].relation, Relation::NextTo);
    }

    #[test]
    fn sound_and_icon_never_share_a_node() {
        // "sun" is both a homophone (son) and an icon (☀).
        let graphs = generator().generate("sun", "flower", false).unwrap();
        assert!(graphs.len() >= 2, "expected a split, got {} graphs", graphs.len());
        for graph in &graphs {
            for node in graph.nodes() {
                assert!(
                    !(node.rules.contains(Category::Sound) && node.rules.contains(Category::Icon)),
                    "node carries both sound and icon:\n{graph}"
                );
            }
        }
        let firsts: Vec<&str> = graphs.iter().map(|g| g.nodes().next().unwrap().text.as_str()).collect();
        assert!(firsts.contains(&"SON"));
        assert!(firsts.contains(&"☀"));
    }

    #[test]
    fn rule_word_sound_split_against_content_icon() {
        // "to" brings Sound(to→2); "cat" brings an icon.
        let graphs = generator().generate("to", "cat", false).unwrap();
        let single: Vec<&PuzzleGraph> = graphs.iter().filter(|g| g.node_count() == 1).collect();
        assert_eq!(single.len(), 2);
        assert_eq!(only_node(single[0]).text, "CAT");
        assert!(only_node(single[0]).rules.contains(Category::Sound));
        assert_eq!(only_node(single[1]).text, "🐱");
        assert!(only_node(single[1]).rules.contains(Category::Icon));
        assert!(single.iter().all(|g| only_node(g).rules.repeat() == Repeat::Two));
    }

    #[test]
    fn generate_word_uses_compound_table() {
        let graphs = generator().generate_word("redcoats").unwrap().unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(only_node(&graphs[0]).rules.repeat(), Repeat::Two);
        assert!(generator().generate_word("notacompound").unwrap().is_none());
    }

    #[test]
    fn candidates_are_unique() {
        for (w1, w2, plural) in [("to", "for", false), ("sun", "flower", false), ("back", "fire", false)] {
            let graphs = generator().generate(w1, w2, plural).unwrap();
            let again = dedup(graphs.clone());
            assert_eq!(again.len(), graphs.len(), "{w1}+{w2} produced duplicates");
        }
    }

    #[test]
    fn difficulty_of_compound() {
        let graphs = generator().generate("red", "coats", true).unwrap();
        assert_eq!(difficulty(&graphs[0], false), 2.0);
    }
}
