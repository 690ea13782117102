//! Layout templates.
//!
//! A template is picked from the graph's shape alone:
//!
//! ```text
//! relational edge?   INSIDE  > ABOVE > OUTSIDE
//!   none             BASE (1 node) | BASE_TWO (2) | BASE_THREE (3)
//! ```
//!
//! The relational edge cuts the node sequence in two groups. Each template
//! caps the size of both groups; a graph that exceeds every cap gets no
//! template and is not rendered.
//!
//! Coordinates are fractions of the canvas so any canvas size works.

use crate::graph::{NodeId, PuzzleGraph};
use crate::rules::Relation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Base,
    BaseTwo,
    BaseThree,
    Inside,
    Above,
    Outside,
}

impl Template {
    pub fn name(self) -> &'static str {
        match self {
            Template::Base => "BASE",
            Template::BaseTwo => "BASE_TWO",
            Template::BaseThree => "BASE_THREE",
            Template::Inside => "INSIDE",
            Template::Above => "ABOVE",
            Template::Outside => "OUTSIDE",
        }
    }

    /// Maximum node count of the (first, second) group around the relation.
    fn caps(self) -> (usize, usize) {
        match self {
            Template::Inside => (1, 2),
            Template::Above => (2, 2),
            Template::Outside => (1, 1),
            Template::Base | Template::BaseTwo | Template::BaseThree => (3, 0),
        }
    }

    fn for_relation(relation: Relation) -> Option<Template> {
        match relation {
            Relation::Inside => Some(Template::Inside),
            Relation::Above => Some(Template::Above),
            Relation::Outside => Some(Template::Outside),
            Relation::NextTo => None,
        }
    }

    /// Lower is preferred when a graph carries several relations.
    fn rank(self) -> u8 {
        match self {
            Template::Inside => 0,
            Template::Above => 1,
            Template::Outside => 2,
            Template::Base | Template::BaseTwo | Template::BaseThree => 3,
        }
    }
}

/// Where one node goes: centre as canvas fractions, plus a size multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

const fn at(x: f32, y: f32, scale: f32) -> Placement {
    Placement { x, y, scale }
}

/// Rectangle drawn by the template itself, as canvas fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub template: Template,
    pub slots: Vec<(NodeId, Placement)>,
    pub frame: Option<Frame>,
}

pub fn select_template(graph: &PuzzleGraph) -> Option<Template> {
    layout(graph).map(|l| l.template)
}

pub fn layout(graph: &PuzzleGraph) -> Option<Layout> {
    let ids = graph.node_ids();
    if ids.is_empty() {
        return None;
    }

    let relational = graph
        .relational_edges()
        .filter_map(|e| Template::for_relation(e.relation).map(|t| (t, e)))
        .min_by_key(|(t, _)| t.rank());

    let Some((template, edge)) = relational else {
        return base_layout(&ids);
    };

    let from = ids.iter().position(|&id| id == edge.from)?;
    let to = ids.iter().position(|&id| id == edge.to)?;
    let cut = from.max(to);
    let (first, second) = if from <= to { ids.split_at(cut) } else { (&ids[cut..], &ids[..cut]) };

    let (cap_first, cap_second) = template.caps();
    if first.is_empty() || second.is_empty() || first.len() > cap_first || second.len() > cap_second {
        tracing::debug!(
            template = template.name(),
            first = first.len(),
            second = second.len(),
            "graph exceeds template caps"
        );
        return None;
    }

    let (slots, frame) = match template {
        Template::Inside => inside(first[0], second),
        Template::Above => (above(first, second), None),
        Template::Outside => outside(first[0], second[0]),
        Template::Base | Template::BaseTwo | Template::BaseThree => return base_layout(&ids),
    };
    Some(Layout { template, slots, frame })
}

fn base_layout(ids: &[NodeId]) -> Option<Layout> {
    const ONE: [Placement; 1] = [at(0.5, 0.5, 1.0)];
    const TWO: [Placement; 2] = [at(0.25, 0.5, 1.0), at(0.75, 0.5, 1.0)];
    const THREE: [Placement; 3] = [at(0.175, 0.5, 0.8), at(0.5, 0.5, 0.8), at(0.825, 0.5, 0.8)];

    let (template, placements): (Template, &[Placement]) = match ids.len() {
        1 => (Template::Base, &ONE),
        2 => (Template::BaseTwo, &TWO),
        3 => (Template::BaseThree, &THREE),
        n => {
            tracing::debug!(nodes = n, "too many unrelated nodes for any template");
            return None;
        }
    };
    let slots = ids.iter().copied().zip(placements.iter().copied()).collect();
    Some(Layout { template, slots, frame: None })
}

fn inside(inner: NodeId, outer: &[NodeId]) -> (Vec<(NodeId, Placement)>, Option<Frame>) {
    let mut slots = vec![(inner, at(0.5, 0.5, 0.8))];
    let outer_spots = [at(0.5, 0.225, 0.6), at(0.5, 0.775, 0.6)];
    slots.extend(outer.iter().copied().zip(outer_spots));
    (slots, Some(Frame { x: 0.15, y: 0.15, width: 0.7, height: 0.7 }))
}

fn above(top: &[NodeId], bottom: &[NodeId]) -> Vec<(NodeId, Placement)> {
    let row = |ids: &[NodeId], y: f32| -> Vec<(NodeId, Placement)> {
        match ids {
            [one] => vec![(*one, at(0.5, y, 0.8))],
            _ => ids.iter().copied().zip([at(0.3, y, 0.7), at(0.7, y, 0.7)]).collect(),
        }
    };
    let mut slots = row(top, 0.325);
    slots.extend(row(bottom, 0.675));
    slots
}

fn outside(out: NodeId, boxed: NodeId) -> (Vec<(NodeId, Placement)>, Option<Frame>) {
    let slots = vec![(out, at(0.225, 0.5, 0.8)), (boxed, at(0.7, 0.5, 0.7))];
    (slots, Some(Frame { x: 0.475, y: 0.3, width: 0.45, height: 0.4 }))
}
