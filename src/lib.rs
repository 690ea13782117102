//! Rebus puzzle generation.
//!
//! Words and idioms go in, puzzle graphs come out, and graphs render to SVG:
//!
//! ```text
//! "redcoats" ─▶ WordClassifier ─▶ CompoundGraphGenerator ─▶ [COAT {red, ×2}] ─▶ Renderer ─▶ SVG
//! ```
//!
//! Public entry points live on [`Rebus`] (see `src/api.rs`); the building
//! blocks are re-exported for callers that want to drive the pipeline
//! themselves.

#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
mod error;
mod graph;
mod lexicon;
mod render;
pub mod rules;

pub use api::{PhraseOutput, Rebus};
pub use config::{RebusConfig, RenderConfig, TablesConfig};
pub use engine::{
    CompoundGraphGenerator, GraphKey, IdiomPathParser, PhraseDetails, PhraseGraphGenerator, Rejection, Span, dedup,
    structurally_equal,
};
pub use error::{RebusError, RebusResult};
pub use graph::{Edge, NodeId, PuzzleGraph, PuzzleNode, difficulty};
pub use lexicon::{CompoundEntry, Homophones, IconEntry, Lexicon, Substitution};
pub use render::{Frame, Layout, Placement, RebusImage, Renderer, Template, layout, select_template};
pub use rules::{Category, Classification, Relation, Repeat, Rule, RuleSet, WordClassifier};
