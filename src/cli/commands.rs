use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::engine::Engine;
use crate::models::Direction;
use crate::utils::{format_path_with_tilde, get_cache_file, init_logging};

/// Acknowledgment printed after a recorded command
pub const UPDATE_ACK: &str = "updated";

#[derive(Parser)]
#[command(name = "autocomplete")]
#[command(version = "0.1.0")]
#[command(about = "Prefix completion and history navigation for shell commands", long_about = None)]
pub struct Cli {
    /// Cache file to read and write (default: $XDG_CACHE_HOME/zsh-autocomplete/trie_data.txt)
    #[arg(long, global = true, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load shell history piped on stdin, keeping it or the cache, whichever is larger
    Init,
    /// Print the best completion for the current buffer
    Ghost {
        #[arg(default_value = "", allow_hyphen_values = true)]
        buffer: String,
    },
    /// Step through history entries starting with the buffer, printing `<command>|<cursor>`
    History {
        #[arg(allow_hyphen_values = true)]
        buffer: String,
        #[arg(value_enum)]
        direction: Direction,
        /// Cursor returned by the previous step (-1 for the original text)
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        cursor: i64,
    },
    /// Record an executed command and save the cache
    ///
    /// Takes `[BUFFER] COMMAND`; the last argument is always the command, so
    /// widgets that pass the current buffer first keep working.
    Update {
        #[arg(
            required = true,
            num_args = 1..=2,
            allow_hyphen_values = true,
            value_name = "[BUFFER] COMMAND"
        )]
        args: Vec<String>,
    },
    /// List ranked completions for the buffer
    Complete {
        #[arg(default_value = "", allow_hyphen_values = true)]
        buffer: String,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// List recently used commands, most relevant first
    Recent {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show statistics about the index
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cache_file = match cli.cache_file {
        Some(path) => path,
        None => get_cache_file()?,
    };
    tracing::debug!(cache_file = %cache_file.display(), "Resolved cache file");

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Init => init(cache_file),
        Commands::Ghost { buffer } => {
            let engine = Engine::from_cache(cache_file);
            if let Some(completion) = engine.best_completion(&buffer) {
                write!(out, "{}", completion)?;
            }
        }
        Commands::History { buffer, direction, cursor } => {
            let engine = Engine::from_cache(cache_file);
            write!(out, "{}", engine.navigate(&buffer, direction, cursor))?;
        }
        Commands::Update { args } => {
            let command = args.last().map(String::as_str).unwrap_or_default();
            let mut engine = Engine::from_cache(cache_file);
            match engine.record_usage(command) {
                Ok(true) => writeln!(out, "{}", UPDATE_ACK)?,
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %format!("{e:#}"), "Failed to record command"),
            }
        }
        Commands::Complete { buffer, limit } => {
            let engine = Engine::from_cache(cache_file);
            for entry in engine.completions(&buffer, limit) {
                writeln!(out, "{}", entry.command)?;
            }
        }
        Commands::Recent { limit } => {
            let engine = Engine::from_cache(cache_file);
            for ranked in engine.recent(limit) {
                writeln!(out, "{}", ranked.command)?;
            }
        }
        Commands::Stats { json } => show_stats(&mut out, &Engine::from_cache(cache_file), json)?,
    }
    out.flush().context("Failed to flush stdout")?;

    Ok(())
}

fn init(cache_file: PathBuf) {
    let stdin = io::stdin();
    // Reading a terminal would block until the user hits Ctrl-D
    let input = if stdin.is_terminal() {
        tracing::warn!("stdin is a terminal, not reading history from it");
        None
    } else {
        Some(stdin.lock())
    };

    let (engine, report) = Engine::initialize(cache_file, input);
    tracing::info!(
        fresh = report.fresh_count,
        cached = report.cache_count,
        decision = ?report.decision,
        commands = engine.index().total_commands(),
        "Initialized history index"
    );
}

fn show_stats<W: Write>(out: &mut W, engine: &Engine, json: bool) -> Result<()> {
    let stats = engine.stats();

    if json {
        let rendered = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    writeln!(out, "Command History Statistics")?;
    writeln!(out, "==========================")?;
    writeln!(out, "Unique commands: {}", stats.total_commands)?;
    writeln!(out, "History entries: {}", stats.history_entries)?;
    writeln!(out, "Trie nodes: {}", stats.trie_nodes)?;
    if let Some(top) = &stats.top_command {
        writeln!(out, "Top command: {} (used {} times)", top.command, top.frequency)?;
    }
    writeln!(out)?;
    writeln!(out, "Cache file: {}", format_path_with_tilde(&stats.cache_file))?;

    Ok(())
}
