use std::fs;
use std::process;

use clap::{Parser, Subcommand};

use glossary_engine::engine::{PresentationSink, RenderedEntry};
use glossary_engine::highlight::apply_spans;
use glossary_engine::nav::{HistoryAdapter, HistoryEntry, NavState};
use glossary_engine::render::RenderStatus;
use glossary_engine::{Dataset, DatasetSource, EngineConfig, GlossaryEngine};

#[derive(Parser)]
#[command(name = "glostool", about = "Glossary dataset and search diagnostics")]
struct Cli {
    /// Path to a custom settings TOML (defaults are embedded)
    #[arg(long)]
    settings: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the dataset URL and download the JSON to a file
    Fetch {
        /// Output path for the dataset JSON
        output: String,
    },
    /// Search a local dataset file and print ranked matches
    Search {
        /// Path to the dataset JSON file
        data_file: String,
        /// Search term
        term: String,
    },
    /// Print the letters present in a local dataset file
    Letters {
        /// Path to the dataset JSON file
        data_file: String,
    },
    /// Print all entries for one leading letter
    Browse {
        /// Path to the dataset JSON file
        data_file: String,
        /// The letter to filter by
        letter: char,
    },
}

/// Unwrap a Result or print the error and exit.
macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

const HILIGHT_OPEN: &str = "\x1b[1;33m";
const HILIGHT_CLOSE: &str = "\x1b[0m";

/// Prints each batch straight to stdout.
#[derive(Default)]
struct ConsoleSink {
    letters: Vec<char>,
}

impl PresentationSink for ConsoleSink {
    fn set_mode(&mut self, _state: &NavState) {}

    fn clear_entries(&mut self) {}

    fn render_entry(&mut self, entry: &RenderedEntry) {
        let word = apply_spans(&entry.word, &entry.word_spans, HILIGHT_OPEN, HILIGHT_CLOSE);
        match &entry.secondary {
            Some(secondary) => {
                let secondary =
                    apply_spans(secondary, &entry.secondary_spans, HILIGHT_OPEN, HILIGHT_CLOSE);
                println!("{word}  [{secondary}]");
            }
            None => println!("{word}"),
        }
        let gloss = apply_spans(&entry.gloss, &entry.gloss_spans, HILIGHT_OPEN, HILIGHT_CLOSE);
        for line in gloss.lines() {
            println!("    {line}");
        }
    }

    fn set_status(&mut self, status: &RenderStatus) {
        println!("-- {status}");
    }

    fn show_letter_index(&mut self, letters: &[char]) {
        self.letters = letters.to_vec();
    }

    fn set_search_text(&mut self, _text: &str) {}
}

/// The CLI has no address bar; history transitions are dropped.
struct NoHistory;

impl HistoryAdapter for NoHistory {
    fn push(&mut self, _entry: &HistoryEntry, _fragment: Option<&str>) {}
    fn replace(&mut self, _entry: &HistoryEntry, _fragment: Option<&str>) {}
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.settings {
        Some(path) => {
            let toml_str = die!(fs::read_to_string(path), "Failed to read settings: {}");
            die!(
                EngineConfig::from_toml_str(&toml_str),
                "Invalid settings: {}"
            )
        }
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Fetch { output } => {
            let source = DatasetSource::new(config.source);
            let json = die!(source.fetch_json(), "Fetch failed: {}");
            // validate before writing anything
            let dataset = die!(Dataset::from_json_str(&json), "Invalid dataset: {}");
            die!(fs::write(&output, &json), "Failed to write output: {}");
            println!("Wrote {} entries to {output}", dataset.len());
        }
        Command::Search { data_file, term } => {
            let mut engine = load_engine(&data_file, config);
            let (mut sink, mut history) = (ConsoleSink::default(), NoHistory);
            engine.search_input(&term, 0);
            engine.tick(u64::MAX, &mut sink, &mut history);
        }
        Command::Letters { data_file } => {
            let mut engine = load_engine(&data_file, config);
            let (mut sink, mut history) = (ConsoleSink::default(), NoHistory);
            engine.toggle_index_view(&mut sink, &mut history);
            for letter in &sink.letters {
                println!("{letter}");
            }
        }
        Command::Browse { data_file, letter } => {
            let mut engine = load_engine(&data_file, config);
            let (mut sink, mut history) = (ConsoleSink::default(), NoHistory);
            engine.pick_letter(letter, &mut sink, &mut history);
        }
    }
}

fn load_engine(data_file: &str, config: EngineConfig) -> GlossaryEngine {
    let json = die!(fs::read_to_string(data_file), "Failed to read dataset: {}");
    let dataset = die!(Dataset::from_json_str(&json), "Invalid dataset: {}");
    GlossaryEngine::new(dataset, config)
}
