//! Structural deduplication keys for candidate graphs.
//!
//! Independently generated branches often converge on the same puzzle ("to"
//! modifying "for" and a side-by-side rendering can coincide). Without a
//! stable key those duplicates would reach the renderer twice.
//!
//! ## What counts as "the same graph"
//!
//! - Node attributes (text, rule set, merged values) compared as a multiset: node ids and
//!   creation order differ between branches, so they are ignored.
//! - Edges compared on *positional* node index (the n-th node in id order),
//!   so the node sequence still matters for edges.
//! - `answer` is ignored: it is stamped after dedup.

use std::collections::HashSet;

use crate::graph::PuzzleGraph;
use crate::rules::{Relation, Rule, RuleSet};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphKey {
    nodes: Vec<(String, RuleSet, Vec<Rule>)>,
    edges: Vec<(usize, usize, Relation)>,
}

impl GraphKey {
    pub fn from_graph(graph: &PuzzleGraph) -> Self {
        let mut nodes: Vec<(String, RuleSet, Vec<Rule>)> =
            graph.nodes().map(|n| (n.text.clone(), n.rules.clone(), n.merged.clone())).collect();
        nodes.sort();

        let dense = graph.dense_ids();
        let mut edges: Vec<(usize, usize, Relation)> =
            graph.edges().iter().map(|e| (dense[&e.from], dense[&e.to], e.relation)).collect();
        edges.sort();

        GraphKey { nodes, edges }
    }
}

pub fn structurally_equal(a: &PuzzleGraph, b: &PuzzleGraph) -> bool {
    GraphKey::from_graph(a) == GraphKey::from_graph(b)
}

/// Drop structural duplicates, keeping the first occurrence and the input
/// order. Idempotent.
pub fn dedup(graphs: Vec<PuzzleGraph>) -> Vec<PuzzleGraph> {
    let before = graphs.len();
    let mut seen: HashSet<GraphKey> = HashSet::with_capacity(before);
    let kept: Vec<PuzzleGraph> = graphs.into_iter().filter(|g| seen.insert(GraphKey::from_graph(g))).collect();
    if kept.len() != before {
        tracing::debug!(before, after = kept.len(), "dropped duplicate candidates");
    }
    kept
}
