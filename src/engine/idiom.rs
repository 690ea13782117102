//! Single-path idiom parser.
//!
//! Older pipeline kept for comparison with the phrase generator. It builds
//! exactly one graph per phrase: one node per content word, rule words folded
//! into the word that follows them, relational keywords turned into edge
//! labels. Runs of plain neighbours are then contracted so "piece of cake"
//! reads as a single `PIECE CAKE` node.

use crate::error::RebusResult;
use crate::graph::{NodeId, PuzzleGraph};
use crate::lexicon::Lexicon;
use crate::rules::catalog::relation_for;
use crate::rules::{Relation, RuleSet};

use super::compound::{CompoundGraphGenerator, split_sound_icon};
use super::phrase::{clean, gate};

#[derive(Debug, Clone, Copy)]
pub struct IdiomPathParser<'a> {
    compounds: CompoundGraphGenerator<'a>,
    lexicon: &'a Lexicon,
}

impl<'a> IdiomPathParser<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { compounds: CompoundGraphGenerator::new(lexicon), lexicon }
    }

    /// One graph for `phrase`, or `None` when it fails the validity gate.
    pub fn parse(&self, phrase: &str) -> RebusResult<Option<PuzzleGraph>> {
        let tokens = clean(self.lexicon, phrase);
        if let Some(rejection) = gate(&tokens) {
            tracing::debug!(phrase, %rejection, "idiom rejected");
            return Ok(None);
        }

        let classifier = self.compounds.classifier();
        let mut graph = PuzzleGraph::new();
        let mut pending: Option<RuleSet> = None;
        let mut last_rule_word: Option<&str> = None;
        let mut relation = Relation::NextTo;

        for token in &tokens {
            if let Some(r) = relation_for(token) {
                relation = r;
                continue;
            }
            let classification = classifier.classify(token, false);
            if classification.has_rule() {
                // First branch only: this path never fans out.
                let rules = classification.branches().into_iter().next().unwrap_or_default();
                pending.get_or_insert_with(RuleSet::new).absorb(&rules);
                last_rule_word = Some(token.as_str());
                continue;
            }

            let (text, rules) = self.compounds.content_node(token, false, pending.take().unwrap_or_default());
            let previous = graph.last_node();
            let id = graph.add_node(&text, rules)?;
            if let Some(previous) = previous {
                graph.add_edge(previous, id, relation)?;
            }
            relation = Relation::NextTo;
        }

        if let Some(rules) = pending {
            match graph.last_node().and_then(|id| graph.node_mut(id)) {
                Some(node) => node.rules.absorb(&rules),
                None => {
                    let word = last_rule_word.unwrap_or_default();
                    let (text, rules) = self.compounds.content_node(word, false, rules);
                    graph.add_node(&text, rules)?;
                }
            }
        }

        for run in plain_runs(&graph) {
            graph.merge_nodes(&run)?;
        }

        let mut graph = split_sound_icon(graph, false).into_iter().next().unwrap_or_default();
        graph.answer = phrase.to_string();
        tracing::debug!(phrase, nodes = graph.node_count(), "idiom parsed");
        Ok(Some(graph))
    }
}

/// Maximal runs (length ≥ 2) of rule-free nodes joined by `NEXT_TO` edges.
fn plain_runs(graph: &PuzzleGraph) -> Vec<Vec<NodeId>> {
    let is_plain = |id: NodeId| graph.node(id).is_some_and(|n| !n.rules.has_individual_rule());
    let joined = |a: NodeId, b: NodeId| {
        graph.edges().iter().any(|e| e.from == a && e.to == b && e.relation == Relation::NextTo)
    };

    let mut runs = Vec::new();
    let mut current: Vec<NodeId> = Vec::new();
    for id in graph.node_ids() {
        let extends = current.last().is_some_and(|&prev| is_plain(id) && joined(prev, id));
        if !extends {
            if current.len() > 1 {
                runs.push(std::mem::take(&mut current));
            }
            current.clear();
        }
        if is_plain(id) {
            current.push(id);
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}
