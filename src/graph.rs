//! Puzzle graph: an arena of text nodes joined by spatial relations.
//!
//! Node ids are stable for the life of a graph. They start at 1 and grow in
//! creation order; contraction (`merge_nodes`) removes ids but never
//! renumbers the survivors. Dense renumbering happens only when the graph is
//! described or serialized.
//!
//! ```text
//! PuzzleGraph { answer: "redcoats" }
//!   nodes: 1 ─ text "COAT", { color: red, repeat: 2 }
//!   edges: (none)
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::error::{RebusError, RebusResult};
use crate::render::{Template, select_template};
use crate::rules::rule::RuleValue;
use crate::rules::{Category, Relation, Repeat, Rule, RuleSet};

pub type NodeId = usize;

/// A piece of displayed text plus the visual rules applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleNode {
    pub id: NodeId,
    pub text: String,
    /// First value per category; this is what the renderer draws.
    pub rules: RuleSet,
    /// Further values a contraction brought in for categories already held
    /// in `rules`, in path order.
    pub merged: Vec<Rule>,
}

impl PuzzleNode {
    fn new(id: NodeId, text: String, rules: RuleSet) -> Self {
        Self { id, text, rules, merged: Vec::new() }
    }

    /// Every value this node carries for `category`, in path order.
    pub fn values(&self, category: Category) -> impl Iterator<Item = &Rule> {
        self.rules.get(category).into_iter().chain(self.merged.iter().filter(move |r| r.category() == category))
    }

    /// Take in one absorbed value: free categories are filled, occupied ones
    /// queue the value behind the existing one. A neutral repeat carries
    /// nothing.
    fn push_value(&mut self, rule: &Rule) {
        match rule {
            Rule::Repeat(Repeat::One) => {}
            Rule::Repeat(repeat) if self.rules.repeat() == Repeat::One => self.rules.set_repeat(*repeat),
            _ if rule.category() != Category::Repeat && !self.rules.contains(rule.category()) => {
                self.rules.insert(rule.clone());
            }
            _ => self.merged.push(rule.clone()),
        }
    }
}

/// A directed, labelled edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub relation: Relation,
}

#[derive(Debug, Clone, Default)]
pub struct PuzzleGraph {
    nodes: BTreeMap<NodeId, PuzzleNode>,
    edges: Vec<Edge>,
    last_id: NodeId,
    /// The word or phrase this graph encodes.
    pub answer: String,
}

impl PuzzleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self { answer: answer.into(), ..Self::default() }
    }

    /// Add a node. Blank text is rejected with `MissingTextAttribute`.
    pub fn add_node(&mut self, text: &str, rules: RuleSet) -> RebusResult<NodeId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RebusError::MissingTextAttribute);
        }
        self.last_id += 1;
        let id = self.last_id;
        self.nodes.insert(id, PuzzleNode::new(id, text.to_string(), rules));
        Ok(id)
    }

    /// Add (or relabel) the edge `from → to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, relation: Relation) -> RebusResult<()> {
        for id in [from, to] {
            if !self.nodes.contains_key(&id) {
                return Err(RebusError::UnknownNode(id));
            }
        }
        match self.edges.iter_mut().find(|e| e.from == from && e.to == to) {
            Some(edge) => edge.relation = relation,
            None => self.edges.push(Edge { from, to, relation }),
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&PuzzleNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut PuzzleNode> {
        self.nodes.get_mut(&id)
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &PuzzleNode> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn last_node(&self) -> Option<NodeId> {
        self.nodes.keys().next_back().copied()
    }

    /// Edges carrying a spatial relation other than `NEXT_TO`.
    pub fn relational_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.relation.is_relational())
    }

    /// Layout template for this graph; `None` when no template fits.
    pub fn template(&self) -> Option<Template> {
        select_template(self)
    }

    /// Append every node and edge of `other`, returning the new ids in
    /// `other`'s node order.
    pub fn append(&mut self, other: &PuzzleGraph) -> Vec<NodeId> {
        let mut mapping: HashMap<NodeId, NodeId> = HashMap::with_capacity(other.nodes.len());
        let mut added = Vec::with_capacity(other.nodes.len());
        for node in other.nodes() {
            self.last_id += 1;
            let id = self.last_id;
            self.nodes.insert(id, PuzzleNode { id, ..node.clone() });
            mapping.insert(node.id, id);
            added.push(id);
        }
        for edge in &other.edges {
            self.edges.push(Edge { from: mapping[&edge.from], to: mapping[&edge.to], relation: edge.relation });
        }
        added
    }

    /// Contract a connected path into its first node.
    ///
    /// Texts are joined with spaces in path order. Rule values are
    /// concatenated per category in path order: the first value stays in
    /// `rules`, later ones land in `merged`. Edges touching absorbed nodes are
    /// re-attached to the survivor; edges inside the path disappear.
    pub fn merge_nodes(&mut self, path: &[NodeId]) -> RebusResult<NodeId> {
        let (&survivor, absorbed) =
            path.split_first().ok_or_else(|| RebusError::InvalidPath("empty path".to_string()))?;
        for &id in path {
            if !self.nodes.contains_key(&id) {
                return Err(RebusError::UnknownNode(id));
            }
        }
        for pair in path.windows(2) {
            let connected = self.edges.iter().any(|e| e.from == pair[0] && e.to == pair[1]);
            if !connected {
                return Err(RebusError::InvalidPath(format!("no edge {} -> {}", pair[0], pair[1])));
            }
        }
        if absorbed.contains(&survivor) || (1..absorbed.len()).any(|i| absorbed[..i].contains(&absorbed[i])) {
            return Err(RebusError::InvalidPath("path visits a node twice".to_string()));
        }

        let absorbed_nodes: Vec<PuzzleNode> = absorbed.iter().filter_map(|id| self.nodes.remove(id)).collect();
        if let Some(node) = self.nodes.get_mut(&survivor) {
            for other in &absorbed_nodes {
                node.text.push(' ');
                node.text.push_str(&other.text);
                for rule in other.rules.iter().chain(&other.merged) {
                    node.push_value(rule);
                }
            }
        }

        let mut edges: Vec<Edge> = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            let from = if absorbed.contains(&edge.from) { survivor } else { edge.from };
            let to = if absorbed.contains(&edge.to) { survivor } else { edge.to };
            if from == to || edges.iter().any(|e| e.from == from && e.to == to) {
                continue;
            }
            edges.push(Edge { from, to, relation: edge.relation });
        }
        self.edges = edges;

        Ok(survivor)
    }

    /// Stable id → dense position (1-based) map used by every output format.
    pub fn dense_ids(&self) -> HashMap<NodeId, usize> {
        self.nodes.keys().enumerate().map(|(i, &id)| (id, i + 1)).collect()
    }

    /// Deterministic text dump: nodes before edges, `text` first on each node.
    pub fn describe(&self) -> String {
        let dense = self.dense_ids();
        let mut out = String::new();
        out.push_str("Nodes:\n");
        for node in self.nodes() {
            out.push_str(&format!("  {}: text=\"{}\"", dense[&node.id], node.text));
            for category in node.rules.categories() {
                let values: Vec<String> = node.values(category).map(Rule::value).collect();
                out.push_str(&format!(", {}={}", category, values.join(",")));
            }
            out.push('\n');
        }
        out.push_str("Edges:\n");
        if self.edges.is_empty() {
            out.push_str("  (none)\n");
        }
        for edge in &self.edges {
            out.push_str(&format!("  {} -> {}: {}\n", dense[&edge.from], dense[&edge.to], edge.relation.name()));
        }
        out
    }
}

impl fmt::Display for PuzzleGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Node view used for serialization: dense id, text first, then rules.
struct NodeOut<'a> {
    id: usize,
    node: &'a PuzzleNode,
}

impl Serialize for NodeOut<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.node.rules.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("text", &self.node.text)?;
        if self.node.merged.is_empty() {
            self.node.rules.serialize_entries(&mut map)?;
        } else {
            for category in self.node.rules.categories() {
                let values: Vec<RuleValue<'_>> = self.node.values(category).map(RuleValue).collect();
                match values.as_slice() {
                    [single] => map.serialize_entry(category.name(), single)?,
                    _ => map.serialize_entry(category.name(), &values)?,
                }
            }
        }
        map.end()
    }
}

#[derive(serde::Serialize)]
struct EdgeOut {
    from: usize,
    to: usize,
    relation: Relation,
}

impl Serialize for PuzzleGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dense = self.dense_ids();
        let nodes: Vec<NodeOut<'_>> = self.nodes().map(|node| NodeOut { id: dense[&node.id], node }).collect();
        let edges: Vec<EdgeOut> = self
            .edges
            .iter()
            .map(|e| EdgeOut { from: dense[&e.from], to: dense[&e.to], relation: e.relation })
            .collect();

        let mut state = serializer.serialize_struct("PuzzleGraph", 4)?;
        state.serialize_field("answer", &self.answer)?;
        state.serialize_field("template", &self.template().map(Template::name))?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

/// Difficulty: individual rules summed over nodes (a neutral `repeat=1` does
/// not count, merged values do), optionally divided by node count, plus
/// relational edges.
pub fn difficulty(graph: &PuzzleGraph, normalize: bool) -> f64 {
    let rules: usize = graph.nodes().map(|n| n.rules.individual_count() + n.merged.len()).sum();
    let mut score = rules as f64;
    if normalize && graph.node_count() > 0 {
        score /= graph.node_count() as f64;
    }
    score + graph.relational_edges().count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Category, Color, Direction, Repeat, Rule};

    fn rules(list: &[Rule]) -> RuleSet {
        list.iter().cloned().collect()
    }

    #[test]
    fn node_requires_text() {
        let mut graph = PuzzleGraph::new();
        assert!(matches!(graph.add_node("", RuleSet::new()), Err(RebusError::MissingTextAttribute)));
        assert!(matches!(graph.add_node("   ", RuleSet::new()), Err(RebusError::MissingTextAttribute)));
        assert!(graph.is_empty());
    }

    #[test]
    fn ids_are_dense_from_one() {
        let mut graph = PuzzleGraph::new();
        let a = graph.add_node("A", RuleSet::new()).unwrap();
        let b = graph.add_node("B", RuleSet::new()).unwrap();
        assert_eq!((a, b), (1, 2));
        assert!(matches!(graph.add_edge(a, 7, Relation::NextTo), Err(RebusError::UnknownNode(7))));
    }

    #[test]
    fn add_edge_relabels_existing_edge() {
        let mut graph = PuzzleGraph::new();
        let a = graph.add_node("A", RuleSet::new()).unwrap();
        let b = graph.add_node("B", RuleSet::new()).unwrap();
        graph.add_edge(a, b, Relation::NextTo).unwrap();
        graph.add_edge(a, b, Relation::Inside).unwrap();
        assert_eq!(graph.edges(), &[Edge { from: a, to: b, relation: Relation::Inside }]);
    }

    #[test]
    fn append_renumbers_and_copies_edges() {
        let mut left = PuzzleGraph::new();
        left.add_node("A", RuleSet::new()).unwrap();

        let mut right = PuzzleGraph::new();
        let x = right.add_node("X", RuleSet::new()).unwrap();
        let y = right.add_node("Y", RuleSet::new()).unwrap();
        right.add_edge(x, y, Relation::NextTo).unwrap();

        let added = left.append(&right);
        assert_eq!(added, vec![2, 3]);
        assert_eq!(left.edges(), &[Edge { from: 2, to: 3, relation: Relation::NextTo }]);
    }

    #[test]
    fn merge_nodes_contracts_path() {
        let mut graph = PuzzleGraph::new();
        let a = graph.add_node("PIECE", rules(&[Rule::Color(Color::Red)])).unwrap();
        let b = graph.add_node("OF", rules(&[Rule::Color(Color::Blue), Rule::Cross])).unwrap();
        let c = graph.add_node("CAKE", rules(&[Rule::Repeat(Repeat::Two)])).unwrap();
        let d = graph.add_node("TODAY", RuleSet::new()).unwrap();
        graph.add_edge(a, b, Relation::NextTo).unwrap();
        graph.add_edge(b, c, Relation::NextTo).unwrap();
        graph.add_edge(c, d, Relation::Above).unwrap();

        let survivor = graph.merge_nodes(&[a, b, c]).unwrap();
        assert_eq!(survivor, a);
        assert_eq!(graph.node_ids(), vec![a, d]);

        let merged = graph.node(a).unwrap();
        assert_eq!(merged.text, "PIECE OF CAKE");
        assert_eq!(merged.rules.get(Category::Color), Some(&Rule::Color(Color::Red)));
        assert_eq!(merged.merged, vec![Rule::Color(Color::Blue)]);
        let colors: Vec<&Rule> = merged.values(Category::Color).collect();
        assert_eq!(colors, vec![&Rule::Color(Color::Red), &Rule::Color(Color::Blue)]);
        assert!(merged.rules.contains(Category::Cross));
        assert_eq!(merged.rules.repeat(), Repeat::Two);
        assert_eq!(graph.edges(), &[Edge { from: a, to: d, relation: Relation::Above }]);

        // Ids are not renumbered in the arena, only in the dump.
        let dump = graph.describe();
        assert!(dump.contains("1 -> 2: ABOVE"));
        assert!(dump.contains("color=red,blue"), "{dump}");

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nodes"][0]["color"], serde_json::json!(["red", "blue"]));
        assert_eq!(json["nodes"][0]["repeat"], 2);
    }

    #[test]
    fn merge_nodes_concatenates_values_in_path_order() {
        let mut graph = PuzzleGraph::new();
        let a = graph.add_node("UP", rules(&[Rule::Direction(Direction::Up), Rule::Repeat(Repeat::Two)])).unwrap();
        let b = graph.add_node("AND", RuleSet::new()).unwrap();
        let c = graph.add_node("DOWN", rules(&[Rule::Direction(Direction::Down), Rule::Repeat(Repeat::Four)])).unwrap();
        graph.add_edge(a, b, Relation::NextTo).unwrap();
        graph.add_edge(b, c, Relation::NextTo).unwrap();

        graph.merge_nodes(&[a, b, c]).unwrap();
        let node = graph.node(a).unwrap();
        let directions: Vec<&Rule> = node.values(Category::Direction).collect();
        assert_eq!(directions, vec![&Rule::Direction(Direction::Up), &Rule::Direction(Direction::Down)]);
        let repeats: Vec<&Rule> = node.values(Category::Repeat).collect();
        assert_eq!(repeats, vec![&Rule::Repeat(Repeat::Two), &Rule::Repeat(Repeat::Four)]);
        // Direction and repeat on the survivor, plus two merged values.
        assert_eq!(difficulty(&graph, false), 4.0);
    }

    #[test]
    fn merge_nodes_rejects_disconnected_path() {
        let mut graph = PuzzleGraph::new();
        let a = graph.add_node("A", RuleSet::new()).unwrap();
        let b = graph.add_node("B", RuleSet::new()).unwrap();
        assert!(matches!(graph.merge_nodes(&[a, b]), Err(RebusError::InvalidPath(_))));
        assert!(matches!(graph.merge_nodes(&[]), Err(RebusError::InvalidPath(_))));
        assert!(matches!(graph.merge_nodes(&[a, 9]), Err(RebusError::UnknownNode(9))));
    }

    #[test]
    fn describe_lists_nodes_then_edges() {
        let mut graph = PuzzleGraph::with_answer("upstairs");
        let a = graph.add_node("STAIR", rules(&[Rule::Direction(Direction::Up), Rule::Repeat(Repeat::Two)])).unwrap();
        let b = graph.add_node("B", RuleSet::new()).unwrap();
        graph.add_edge(a, b, Relation::NextTo).unwrap();

        let dump = graph.describe();
        assert_eq!(
            dump,
            "Nodes:\n  1: text=\"STAIR\", direction=up, repeat=2\n  2: text=\"B\", repeat=1\nEdges:\n  1 -> 2: NEXT_TO\n"
        );
        assert!(dump.find("Nodes:").unwrap() < dump.find("Edges:").unwrap());
    }

    #[test]
    fn json_output_uses_dense_ids() {
        let mut graph = PuzzleGraph::with_answer("redcoat");
        graph.add_node("COAT", rules(&[Rule::Color(Color::Red)])).unwrap();

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["answer"], "redcoat");
        assert_eq!(json["template"], "BASE");
        assert_eq!(json["nodes"][0]["id"], 1);
        assert_eq!(json["nodes"][0]["text"], "COAT");
        assert_eq!(json["nodes"][0]["color"], "red");
        assert!(json["edges"].as_array().unwrap().is_empty());
    }

    #[test]
    fn difficulty_counts_rules_and_relations() {
        let mut graph = PuzzleGraph::new();
        let a = graph.add_node("A", rules(&[Rule::Color(Color::Red), Rule::Repeat(Repeat::Two)])).unwrap();
        let b = graph.add_node("B", RuleSet::new()).unwrap();
        graph.add_edge(a, b, Relation::Inside).unwrap();

        assert_eq!(difficulty(&graph, false), 3.0);
        assert_eq!(difficulty(&graph, true), 2.0);
    }

    #[test]
    fn difficulty_is_monotonic_in_rule_count() {
        let mut graph = PuzzleGraph::new();
        let id = graph.add_node("A", RuleSet::new()).unwrap();
        let mut previous = difficulty(&graph, false);
        for rule in [Rule::Color(Color::Red), Rule::Cross, Rule::Direction(Direction::Up), Rule::Repeat(Repeat::Four)] {
            graph.node_mut(id).unwrap().rules.insert(rule);
            let current = difficulty(&graph, false);
            assert!(current > previous);
            previous = current;
        }
    }
}
