use std::path::{Path, PathBuf};
use std::time::Duration;

use rayon::prelude::*;

use crate::config::RebusConfig;
use crate::engine::{CompoundGraphGenerator, IdiomPathParser, PhraseDetails, PhraseGraphGenerator};
use crate::error::RebusResult;
use crate::graph::PuzzleGraph;
use crate::lexicon::{CompoundEntry, Lexicon};
use crate::render::{RebusImage, Renderer};
use crate::rules::{Classification, WordClassifier};

/// Entry point: lookup tables plus renderer settings.
///
/// Generation only reads from `Rebus`, so one instance can be shared across
/// threads (the batch helpers do exactly that).
///
/// # Example
/// ```
/// use rebusgraph::Rebus;
///
/// let rebus = Rebus::new();
/// let graphs = rebus.generate_compound("red", "coat", false).unwrap();
/// assert_eq!(graphs[0].nodes().next().unwrap().text, "COAT");
/// ```
#[derive(Debug, Clone)]
pub struct Rebus {
    lexicon: Lexicon,
    renderer: Renderer,
}

/// Result from [`Rebus::generate_phrase_verbose`].
#[derive(Debug, Clone)]
pub struct PhraseOutput {
    pub phrase: String,
    /// `None` when the phrase failed the validity gate.
    pub graphs: Option<Vec<PuzzleGraph>>,
    pub elapsed: Duration,
    pub details: PhraseDetails,
}

impl Default for Rebus {
    fn default() -> Self {
        Self::new()
    }
}

impl Rebus {
    /// Built-in tables and a default canvas.
    pub fn new() -> Self {
        Self { lexicon: Lexicon::shared().clone(), renderer: Renderer::default() }
    }

    pub fn from_config(config: &RebusConfig) -> RebusResult<Self> {
        let lexicon = Lexicon::from_config(&config.tables)?;
        Ok(Self { lexicon, renderer: Renderer::new(config.render.clone()) })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn classify(&self, word: &str, is_plural: bool) -> Classification {
        WordClassifier::new(&self.lexicon).classify(word, is_plural)
    }

    pub fn generate_compound(&self, word1: &str, word2: &str, is_plural: bool) -> RebusResult<Vec<PuzzleGraph>> {
        CompoundGraphGenerator::new(&self.lexicon).generate(word1, word2, is_plural)
    }

    /// `Ok(None)` when `combined` is not in the compound table.
    pub fn generate_word(&self, combined: &str) -> RebusResult<Option<Vec<PuzzleGraph>>> {
        CompoundGraphGenerator::new(&self.lexicon).generate_word(combined)
    }

    /// `Ok(None)` when the phrase is ill-formed (see [`crate::Rejection`]).
    pub fn generate_phrase(&self, phrase: &str) -> RebusResult<Option<Vec<PuzzleGraph>>> {
        PhraseGraphGenerator::new(&self.lexicon).generate(phrase)
    }

    /// Generate `phrase` and return extra (compact) details about each stage.
    ///
    /// Useful for debugging why a phrase produced no graphs. The default
    /// [`generate_phrase`](Self::generate_phrase) path skips these.
    pub fn generate_phrase_verbose(&self, phrase: &str) -> RebusResult<PhraseOutput> {
        let (graphs, details) = PhraseGraphGenerator::new(&self.lexicon).generate_verbose(phrase)?;
        Ok(PhraseOutput { phrase: phrase.to_string(), graphs, elapsed: details.elapsed, details })
    }

    pub fn parse_idiom(&self, phrase: &str) -> RebusResult<Option<PuzzleGraph>> {
        IdiomPathParser::new(&self.lexicon).parse(phrase)
    }

    pub fn render(&self, graph: &PuzzleGraph) -> Option<RebusImage> {
        self.renderer.render(graph)
    }

    /// Render every graph that fits a template into `dir` as
    /// `<answer>_<n>.svg`, returning the written paths. Graphs without a
    /// template are skipped.
    pub fn render_all(&self, graphs: &[PuzzleGraph], dir: impl AsRef<Path>) -> RebusResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::new();
        for (index, graph) in graphs.iter().enumerate() {
            let Some(image) = self.render(graph) else {
                continue;
            };
            let path = dir.join(format!("{}_{}.svg", file_stem(&graph.answer), index + 1));
            image.save(&path)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Every row of `entries`, generated in parallel. Output order matches
    /// input order.
    pub fn generate_compounds_batch(&self, entries: &[CompoundEntry]) -> Vec<RebusResult<Vec<PuzzleGraph>>> {
        entries.par_iter().map(|e| self.generate_compound(&e.first, &e.second, e.plural)).collect()
    }

    /// Whole compound table of the lexicon, in parallel.
    pub fn generate_compound_table(&self) -> Vec<(String, RebusResult<Vec<PuzzleGraph>>)> {
        let entries: Vec<&CompoundEntry> = self.lexicon.compounds().collect();
        entries
            .into_par_iter()
            .map(|e| (e.combined.clone(), self.generate_compound(&e.first, &e.second, e.plural)))
            .collect()
    }

    pub fn generate_phrases_batch<S: AsRef<str> + Sync>(
        &self,
        phrases: &[S],
    ) -> Vec<RebusResult<Option<Vec<PuzzleGraph>>>> {
        phrases.par_iter().map(|p| self.generate_phrase(p.as_ref())).collect()
    }
}

fn file_stem(answer: &str) -> String {
    let lower = answer.to_lowercase();
    let stem = regex!(r"[^a-z0-9]+").replace_all(&lower, "_");
    let stem = stem.trim_matches('_');
    if stem.is_empty() { "rebus".to_string() } else { stem.to_string() }
}
