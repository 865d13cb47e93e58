//! sessionview - inspect, search and repair Claude Code session transcripts.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sessionview_cli::{config::Config, logging};
use sessionview_core::{
    Highlighter, SearchIndex, apply_block_edits, decode_project_path, parse_jsonl, relativize,
    remove_events, strip_thinking_blocks, to_json, to_markdown, transform,
};
use sessionview_types::{BlockEdit, ContentNode, RawEvent, SearchConfig};
use std::path::{Path, PathBuf};

use logging::{LogConfig, LogFormat};

/// Inspect, search and repair Claude Code session transcripts.
#[derive(Parser, Debug)]
#[command(name = "sessionview")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (INFO level for sessionview targets)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable trace logging (per-event classification)
    #[arg(long, global = true)]
    trace: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "finder=debug").
    /// Can be specified multiple times. Targets are prefixed with "sessionview::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL", global = true)]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct QueryArgs {
    /// Search query
    #[arg(long)]
    query: String,

    /// Match case exactly
    #[arg(long)]
    case_sensitive: bool,

    /// Interpret the query as a regular expression
    #[arg(long)]
    regex: bool,
}

impl QueryArgs {
    /// Flags only ever switch options on; config supplies the defaults.
    fn to_search_config(&self, config: &Config) -> SearchConfig {
        SearchConfig::literal(self.query.as_str())
            .case_sensitive(self.case_sensitive || config.case_sensitive)
            .regex(self.regex || config.use_regex)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the display units of a transcript as JSON
    Transform {
        file: PathBuf,
        /// Show working directories relative to this project root
        #[arg(long, value_name = "DIR")]
        root: Option<String>,
    },
    /// Print the display ids of units matching a query
    Search {
        file: PathBuf,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Highlight matches in a content tree (JSON, from a file or stdin)
    Highlight {
        tree: Option<PathBuf>,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Export a transcript as Markdown or JSON
    Export {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "markdown")]
        format: ExportFormat,
        /// Document title (defaults to the file stem)
        #[arg(long)]
        title: Option<String>,
    },
    /// Replace the text of one block and print the updated transcript
    Edit {
        file: PathBuf,
        /// Source event id
        #[arg(long)]
        id: String,
        /// Original block index
        #[arg(long, default_value_t = 0)]
        block: usize,
        #[arg(long)]
        text: String,
    },
    /// Remove events by id and print the updated transcript
    Remove {
        file: PathBuf,
        #[arg(long = "id", required = true)]
        ids: Vec<String>,
    },
    /// Remove thinking blocks and print the updated transcript
    StripThinking { file: PathBuf },
    /// Decode a ~/.claude/projects directory name into a path
    ProjectPath { encoded: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Markdown,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_overrides.clone(),
        cli.log_format,
    );
    logging::init(&log_config);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(target: "sessionview::cli", "Loaded configuration: {:?}", config);

    run(cli.command, &config)
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Transform { file, root } => {
            let mut session = transform(&read_events(&file)?);
            if let Some(root) = root {
                for unit in &mut session.units {
                    if let Some(cwd) = unit.cwd.take() {
                        unit.cwd = Some(relativize(&cwd, &root));
                    }
                }
            }
            print_json(&session, config)
        }
        Command::Search { file, query } => {
            let session = transform(&read_events(&file)?);
            let hits = SearchIndex::build(&session).search(&query.to_search_config(config));
            for id in hits {
                println!("{}", id);
            }
            Ok(())
        }
        Command::Highlight { tree, query } => {
            let content = match &tree {
                Some(path) => read_file(path)?,
                None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
            };
            let tree: ContentNode =
                serde_json::from_str(&content).context("Input is not a content tree")?;
            let highlighter = Highlighter::new(&query.to_search_config(config))
                .with_style(config.highlight_style());
            print_json(&highlighter.highlight(tree), config)
        }
        Command::Export {
            file,
            format,
            title,
        } => {
            let events = read_events(&file)?;
            let output = match format {
                ExportFormat::Markdown => {
                    let title = title.unwrap_or_else(|| file_stem(&file));
                    to_markdown(&events, &title, chrono::Utc::now())
                }
                ExportFormat::Json => to_json(&events)?,
            };
            println!("{}", output);
            Ok(())
        }
        Command::Edit {
            file,
            id,
            block,
            text,
        } => {
            let mut events = read_events(&file)?;
            let changed = apply_block_edits(&mut events, &id, &[BlockEdit { index: block, text }])?;
            if changed == 0 {
                bail!("Block {} of event {} was not changed", block, id);
            }
            print_jsonl(&events)
        }
        Command::Remove { file, ids } => {
            let mut events = read_events(&file)?;
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            remove_events(&mut events, &ids);
            print_jsonl(&events)
        }
        Command::StripThinking { file } => {
            let mut events = read_events(&file)?;
            strip_thinking_blocks(&mut events);
            print_jsonl(&events)
        }
        Command::ProjectPath { encoded } => {
            println!("{}", decode_project_path(&encoded));
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_events(path: &Path) -> Result<Vec<RawEvent>> {
    let events = parse_jsonl(&read_file(path)?);
    tracing::info!(
        target: "sessionview::cli",
        "Read {} events from {}",
        events.len(),
        path.display()
    );
    Ok(events)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "session".to_string())
}

fn print_json<T: Serialize>(value: &T, config: &Config) -> Result<()> {
    let output = if config.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}

fn print_jsonl(events: &[RawEvent]) -> Result<()> {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
