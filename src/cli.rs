use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Browse a movie and technology catalog from the terminal
#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Search and page through a JSON catalog of movies and technologies", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the per-user vitrine.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog location: http(s) URL or file path
    #[arg(long, global = true, value_name = "LOCATION")]
    pub source: Option<String>,

    /// Items per page
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<usize>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of the (optionally filtered) catalog
    List {
        /// Search term matched against title, description and tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// Page to show; clamped to the last page
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Emit JSON instead of text cards
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Show the detail of the N-th item (1-based) of the filtered catalog
    Show {
        #[arg(value_name = "N")]
        position: usize,
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Interactive session reading commands from stdin
    Browse,
}

/// A line typed during `browse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Search(String),
    Open(usize),
    Close,
    Theme,
    Reload,
    Help,
    Quit,
    Unknown(String),
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Some(term) = line.strip_prefix('/') {
            return Some(BrowseCommand::Search(term.to_string()));
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let cmd = match word.to_ascii_lowercase().as_str() {
            "n" | "next" => BrowseCommand::Next,
            "p" | "prev" | "previous" => BrowseCommand::Previous,
            "s" | "search" => BrowseCommand::Search(rest.to_string()),
            "o" | "open" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => BrowseCommand::Open(n),
                _ => BrowseCommand::Unknown(line.to_string()),
            },
            "c" | "close" => BrowseCommand::Close,
            "t" | "theme" => BrowseCommand::Theme,
            "r" | "reload" => BrowseCommand::Reload,
            "h" | "help" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            _ => BrowseCommand::Unknown(line.to_string()),
        };
        Some(cmd)
    }
}

pub const BROWSE_HELP: &str = "commands: next|n, prev|p, search <term> or /<term>, open <n>, close, theme, reload, quit|q";
