mod debug_report;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rebusgraph::{PhraseDetails, PuzzleGraph, Rebus, RebusConfig, RebusResult};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rebusgraph", version, about = "Rebus puzzle generator", after_help = EXIT_CODES)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,
    #[command(subcommand)]
    command: Commands,
}

const EXIT_CODES: &str = "Exit codes:
  0  Success.
  1  No puzzle for this input, or an internal error.
  2  Invalid arguments.

Logging: set REBUS_LOG (e.g. REBUS_LOG=rebusgraph=debug).";

#[derive(Args, Debug)]
struct OutputArgs {
    /// Configuration file (JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Write one SVG per renderable candidate into this directory.
    #[arg(long, global = true, value_name = "DIR")]
    render: Option<PathBuf>,
    /// Print candidates as JSON instead of the text report.
    #[arg(long, global = true)]
    json: bool,
    /// Force ANSI color output.
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,
    /// Disable ANSI color output.
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Two constituents of a compound word.
    Compound {
        word1: String,
        word2: String,
        /// The compound is plural (e.g. "redcoats").
        #[arg(long)]
        plural: bool,
    },
    /// A compound word looked up in the compound table.
    Word { combined: String },
    /// A multi-word phrase.
    Phrase {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// A phrase through the single-path idiom parser.
    Idiom {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("REBUS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(cli: &Cli) -> RebusResult<ExitCode> {
    let config = match &cli.output.config {
        Some(path) => RebusConfig::from_path(path)?,
        None => RebusConfig::default(),
    };
    let render_dir = cli.output.render.clone().or_else(|| config.render.output_dir.clone());
    let rebus = Rebus::from_config(&config)?;
    let color = !cli.output.no_color && (cli.output.color || io::stdout().is_terminal());

    let mut details: Option<PhraseDetails> = None;
    let (input, graphs): (String, Option<Vec<PuzzleGraph>>) = match &cli.command {
        Commands::Compound { word1, word2, plural } => {
            (format!("{word1} + {word2}"), Some(rebus.generate_compound(word1, word2, *plural)?))
        }
        Commands::Word { combined } => (combined.clone(), rebus.generate_word(combined)?),
        Commands::Phrase { text } => {
            let out = rebus.generate_phrase_verbose(&text.join(" "))?;
            details = Some(out.details);
            (out.phrase, out.graphs)
        }
        Commands::Idiom { text } => {
            let phrase = text.join(" ");
            let graph = rebus.parse_idiom(&phrase)?;
            (phrase, graph.map(|g| vec![g]))
        }
    };

    let Some(graphs) = graphs else {
        let reason = match (&cli.command, details.as_ref().and_then(|d| d.rejected)) {
            (Commands::Word { .. }, _) => "unknown compound".to_string(),
            (_, Some(rejection)) => rejection.to_string(),
            _ => "phrase failed the validity gate".to_string(),
        };
        debug_report::print_rejected(&input, &reason, color);
        return Ok(ExitCode::FAILURE);
    };

    if cli.output.json {
        println!("{}", serde_json::to_string_pretty(&graphs)?);
    } else {
        debug_report::print_run(&input, &graphs, details.as_ref(), color);
    }

    if let Some(dir) = render_dir {
        let written = rebus.render_all(&graphs, &dir)?;
        debug_report::print_written(&written, graphs.len(), color);
    }

    Ok(if graphs.is_empty() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
