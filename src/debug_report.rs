use std::path::PathBuf;

use rebusgraph::{PhraseDetails, PuzzleGraph, difficulty};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, graphs: &[PuzzleGraph], details: Option<&PhraseDetails>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Generating: \"{}\"", input), ansi::CYAN)));

    if let Some(details) = details {
        println!("\n{}", palette.paint("━━━ Stages ━━━", ansi::GRAY));
        print_stages(details, &palette);
    }

    println!("\n{}", palette.paint("━━━ Candidates ━━━", ansi::GRAY));
    if graphs.is_empty() {
        println!("{}", palette.dim("  No candidates produced"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Neither word matched a rule keyword, homophone or icon");
        println!("  • A phrase slot had no candidates, which empties the whole product");
        println!("\n{}", palette.dim("  Tip: Set REBUS_LOG=rebusgraph=debug to see generation details"));
    } else {
        for (idx, graph) in graphs.iter().enumerate() {
            print_graph(idx, graph, &palette);
        }
    }

    if let Some(details) = details {
        println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
        println!(
            "  Total: {}  │  Combinations: {}  │  Kept: {}",
            palette.paint(format!("{:?}", details.elapsed), ansi::GREEN),
            palette.paint(details.combinations.to_string(), ansi::CYAN),
            palette.dim(graphs.len().to_string()),
        );
    }
    println!();
}

pub fn print_rejected(input: &str, reason: &str, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Generating: \"{}\"", input), ansi::CYAN)));
    println!("  {} {}", palette.paint("✗ no puzzle:", ansi::YELLOW), palette.dim(reason));
    println!();
}

/// Goes to stderr so `--json` output stays parseable.
pub fn print_written(paths: &[PathBuf], candidates: usize, color: bool) {
    let palette = ansi::Palette::new(color);
    eprintln!("{}", palette.paint("━━━ Rendered ━━━", ansi::GRAY));
    for path in paths {
        eprintln!("  {} {}", palette.paint("✓", ansi::GREEN), path.display());
    }
    let skipped = candidates.saturating_sub(paths.len());
    if skipped > 0 {
        eprintln!("  {}", palette.dim(format!("{skipped} candidate(s) fit no template")));
    }
}

fn print_stages(details: &PhraseDetails, palette: &ansi::Palette) {
    println!("  {} {}", palette.paint("cleaned:", ansi::BLUE), details.cleaned.join(" "));
    let spans: Vec<String> = details.spans.iter().map(ToString::to_string).collect();
    println!("  {} {}", palette.paint("spans:", ansi::BLUE), spans.join(" "));
    let slots: Vec<String> = details.slot_candidates.iter().map(ToString::to_string).collect();
    println!("  {} {}", palette.paint("slots:", ansi::BLUE), palette.dim(format!("[{}]", slots.join(", "))));
}

fn print_graph(idx: usize, graph: &PuzzleGraph, palette: &ansi::Palette) {
    let template = graph.template().map_or("none", |t| t.name());
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.bold(palette.paint(template, ansi::GREEN)),
        palette.dim("│ difficulty:"),
        palette.paint(format!("{:.2}", difficulty(graph, false)), ansi::YELLOW),
    );
    for line in graph.describe().lines() {
        if line.ends_with(':') {
            println!("      {}", palette.dim(line.trim()));
        } else {
            println!("      {}", palette.paint(line, ansi::BLUE));
        }
    }
}
