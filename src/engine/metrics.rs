//! Phrase generation details.
//!
//! `PhraseGraphGenerator::generate` returns only the graphs.
//! `PhraseGraphGenerator::generate_verbose` also returns a `PhraseDetails`
//! describing what each stage saw, for debugging and for the CLI report.
//!
//! Details are opt-in: the plain path never builds them.

use std::fmt;
use std::time::Duration;

use super::phrase::Span;

/// Why a phrase was refused before any graph was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing left after removing fillers.
    Empty,
    /// More than one relational keyword.
    MultipleRelations,
    /// A relational keyword starts or ends the phrase.
    BoundaryRelation,
}

impl Rejection {
    pub fn reason(self) -> &'static str {
        match self {
            Rejection::Empty => "no content words after removing fillers",
            Rejection::MultipleRelations => "more than one relational keyword",
            Rejection::BoundaryRelation => "relational keyword at the start or end",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhraseDetails {
    /// Tokens left after filler removal.
    pub cleaned: Vec<String>,
    /// Word runs and relational keywords, in phrase order.
    pub spans: Vec<Span>,
    /// Candidate count per slot, in slot order.
    pub slot_candidates: Vec<usize>,
    /// Set when the validity gate refused the phrase.
    pub rejected: Option<Rejection>,
    /// Graphs before the Cartesian product collapsed or deduplicated them.
    pub combinations: usize,
    pub elapsed: Duration,
}
