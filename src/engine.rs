//! Graph generation engine.
//!
//! The engine turns words into candidate `PuzzleGraph`s. It is split into
//! focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//!  word1, word2 ──▶ WordClassifier (rules/classify.rs)
//!                        │ Classification { rules, conflicts }
//!                        ▼
//!           CompoundGraphGenerator::generate        (compound.rs)
//!             - conflict branches (one per exclusive category)
//!             - rule word modifies the other word's rendering
//!             - side-by-side candidate when a substitution fires
//!             - sound/icon split
//!             - structural dedup via GraphKey       (dedup.rs)
//!                        │
//!  phrase ──▶ PhraseGraphGenerator::generate        (phrase.rs)
//!             - filler strip + validity gate
//!             - spans split on relational keywords
//!             - greedy pairing through CompoundGraphGenerator
//!             - Cartesian product of per-slot candidates
//!                        │
//!                        ▼
//!                 Vec<PuzzleGraph> ──▶ render
//! ```
//!
//! `idiom.rs` keeps the older single-path parser: one graph per phrase, with
//! plain neighbouring words contracted through `PuzzleGraph::merge_nodes`.
//!
//! ## Ownership
//!
//! Every branch owns its own graph. Fan-out always clones before mutating, so
//! no two candidates share state and batch generation can run in parallel
//! over the read-only lexicon.
//!
//! ## Debugging
//!
//! Set `REBUS_LOG=rebusgraph=debug` (or `trace`) to see gating decisions,
//! branch counts and dedup results.

#[path = "engine/compound.rs"]
mod compound;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/idiom.rs"]
mod idiom;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/phrase.rs"]
mod phrase;

pub use compound::CompoundGraphGenerator;
pub use dedup::{GraphKey, dedup, structurally_equal};
pub use idiom::IdiomPathParser;
pub use metrics::{PhraseDetails, Rejection};
pub use phrase::{PhraseGraphGenerator, Span};
