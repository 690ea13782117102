//! Phrase → candidate graphs.
//!
//! ```text
//! "clean up one's act"
//!   strip fillers      → [clean, up, act]
//!   gate               → ok (no relational keyword)
//!   spans              → Words[clean, up, act]
//!   slots              → (clean, up) → [CLEAN {direction: up}]
//!                        act         → [🎭 {icon}]
//!   product            → CLEAN ─NEXT_TO─▶ 🎭
//! ```
//!
//! Each slot holds the candidates for one word or one consumed word pair. The
//! product walks every combination, appending graphs left to right and
//! wiring the junctions. A relational keyword between two spans becomes the
//! label of the junction edge.

use std::fmt;
use std::time::Instant;

use crate::error::RebusResult;
use crate::graph::PuzzleGraph;
use crate::lexicon::Lexicon;
use crate::rules::catalog::relation_for;
use crate::rules::helpers::tokenize;
use crate::rules::Relation;

use super::compound::{CompoundGraphGenerator, split_sound_icon};
use super::dedup::dedup;
use super::metrics::{PhraseDetails, Rejection};

/// A run of content words, or the relational keyword separating two runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Words(Vec<String>),
    Keyword(Relation, String),
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Words(words) => write!(f, "[{}]", words.join(" ")),
            Span::Keyword(relation, word) => write!(f, "<{word}:{}>", relation.name()),
        }
    }
}

/// Candidates for one position of the phrase plus the relation that joins it
/// to the previous slot.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub relation: Relation,
    pub candidates: Vec<PuzzleGraph>,
}

/// Lowercase tokens with fillers removed.
pub(crate) fn clean(lexicon: &Lexicon, phrase: &str) -> Vec<String> {
    tokenize(phrase).into_iter().filter(|w| !lexicon.is_filler(w)).collect()
}

/// Validity gate shared by the phrase generator and the idiom parser.
pub(crate) fn gate(tokens: &[String]) -> Option<Rejection> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Some(Rejection::Empty);
    };
    let relations = tokens.iter().filter(|w| relation_for(w).is_some()).count();
    if relations > 1 {
        return Some(Rejection::MultipleRelations);
    }
    if relation_for(first).is_some() || relation_for(last).is_some() {
        return Some(Rejection::BoundaryRelation);
    }
    None
}

/// Split on relational keywords. Keyword spans are never adjacent and never
/// at either end once the gate has passed.
pub(crate) fn split_spans(tokens: &[String]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut words = Vec::new();
    for token in tokens {
        match relation_for(token) {
            Some(relation) => {
                if !words.is_empty() {
                    spans.push(Span::Words(std::mem::take(&mut words)));
                }
                spans.push(Span::Keyword(relation, token.clone()));
            }
            None => words.push(token.clone()),
        }
    }
    if !words.is_empty() {
        spans.push(Span::Words(words));
    }
    spans
}

/// Cartesian product of the slots. An empty slot empties the product, and so
/// does an empty slot list.
pub(crate) fn combine(slots: &[Slot]) -> RebusResult<Vec<PuzzleGraph>> {
    if slots.is_empty() {
        return Ok(Vec::new());
    }
    let mut partials = vec![PuzzleGraph::new()];
    for slot in slots {
        let mut next = Vec::with_capacity(partials.len() * slot.candidates.len());
        for partial in &partials {
            for candidate in &slot.candidates {
                let mut graph = partial.clone();
                let junction = graph.last_node();
                let added = graph.append(candidate);
                if let (Some(from), Some(&to)) = (junction, added.first()) {
                    graph.add_edge(from, to, slot.relation)?;
                }
                next.push(graph);
            }
        }
        partials = next;
        if partials.is_empty() {
            break;
        }
    }
    Ok(partials)
}

#[derive(Debug, Clone, Copy)]
pub struct PhraseGraphGenerator<'a> {
    lexicon: &'a Lexicon,
    compounds: CompoundGraphGenerator<'a>,
}

impl<'a> PhraseGraphGenerator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon, compounds: CompoundGraphGenerator::new(lexicon) }
    }

    /// Candidate graphs for `phrase`, or `None` when the phrase fails the
    /// validity gate.
    pub fn generate(&self, phrase: &str) -> RebusResult<Option<Vec<PuzzleGraph>>> {
        self.generate_verbose(phrase).map(|(graphs, _)| graphs)
    }

    /// Same as [`generate`](Self::generate), plus what each stage saw.
    pub fn generate_verbose(&self, phrase: &str) -> RebusResult<(Option<Vec<PuzzleGraph>>, PhraseDetails)> {
        let start = Instant::now();
        let mut details = PhraseDetails { cleaned: clean(self.lexicon, phrase), ..PhraseDetails::default() };

        if let Some(rejection) = gate(&details.cleaned) {
            tracing::debug!(phrase, %rejection, "phrase rejected");
            details.rejected = Some(rejection);
            details.elapsed = start.elapsed();
            return Ok((None, details));
        }

        details.spans = split_spans(&details.cleaned);
        let slots = self.slots(&details.spans)?;
        details.slot_candidates = slots.iter().map(|s| s.candidates.len()).collect();

        let combined = combine(&slots)?;
        details.combinations = combined.len();
        if combined.is_empty() {
            tracing::debug!(phrase, slots = ?details.slot_candidates, "a slot had no candidates");
        }

        let mut graphs = dedup(combined);
        for graph in &mut graphs {
            graph.answer = phrase.to_string();
        }

        details.elapsed = start.elapsed();
        tracing::debug!(phrase, candidates = graphs.len(), elapsed = ?details.elapsed, "phrase generated");
        Ok((Some(graphs), details))
    }

    fn slots(&self, spans: &[Span]) -> RebusResult<Vec<Slot>> {
        let mut slots = Vec::new();
        let mut junction = Relation::NextTo;
        for span in spans {
            match span {
                Span::Keyword(relation, _) => junction = *relation,
                Span::Words(words) => {
                    let mut first = true;
                    for candidates in self.span_candidates(words)? {
                        let relation = if first { junction } else { Relation::NextTo };
                        slots.push(Slot { relation, candidates });
                        first = false;
                    }
                    junction = Relation::NextTo;
                }
            }
        }
        Ok(slots)
    }

    /// Greedy left-to-right pairing through the compound generator.
    fn span_candidates(&self, words: &[String]) -> RebusResult<Vec<Vec<PuzzleGraph>>> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < words.len() {
            if i + 1 == words.len() {
                out.push(self.lone_word(&words[i])?);
                break;
            }
            let pair = self.compounds.generate(&words[i], &words[i + 1], false)?;
            if pair.is_empty() {
                out.push(vec![self.compounds.plain_node(&words[i])?]);
                i += 1;
            } else {
                tracing::trace!(left = %words[i], right = %words[i + 1], candidates = pair.len(), "paired");
                out.push(pair);
                i += 2;
            }
        }
        Ok(out)
    }

    /// A word without a partner: its own rules plus its substitution. A
    /// number sound keeps the classifier's sound and repeat and shows its digit.
    fn lone_word(&self, word: &str) -> RebusResult<Vec<PuzzleGraph>> {
        let classification = self.compounds.classifier().classify(word, false);
        let mut out = Vec::new();
        for rules in classification.branches() {
            let (text, rules) = self.compounds.content_node(word, false, rules);
            let mut graph = PuzzleGraph::new();
            graph.add_node(&text, rules)?;
            out.extend(split_sound_icon(graph, false));
        }
        Ok(dedup(out))
    }
}
