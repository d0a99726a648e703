//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::Traversal;

/// Order parent-pointer records so every parent is inserted before its children
#[derive(Parser, Debug)]
#[command(name = "insertorder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory searched for .insertorder.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    /// Explicit config file (replaces global and local config files)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reorder a JSON array of records for insertion
    Sort(SortArgs),

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct SortArgs {
    /// JSON array of records, e.g. '[{"id": 1, "parent_id": null}]'
    #[arg(conflicts_with_all = ["input", "file"])]
    pub records: Option<String>,

    /// JSON array of records (alternative to the positional argument)
    #[arg(long, alias = "category-input", alias = "category_input", conflicts_with = "file")]
    pub input: Option<String>,

    /// Read the JSON array from a file ("-" for stdin)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Name of the identifier field
    #[arg(long)]
    pub id_field: Option<String>,

    /// Name of the parent-identifier field
    #[arg(long)]
    pub parent_field: Option<String>,

    /// Queue discipline used for flattening
    #[arg(long, value_enum)]
    pub traversal: Option<TraversalArg>,

    /// Reject duplicate ids, multiple roots, orphan references and cycles
    #[arg(long)]
    pub strict: bool,

    /// Print the reordered output on a single line
    #[arg(long)]
    pub compact: bool,

    /// Do not echo the decoded input before the output
    #[arg(long)]
    pub no_echo: bool,

    /// Print the built hierarchy as a tree
    #[arg(long)]
    pub tree: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalArg {
    /// Breadth-first, level by level
    LevelOrder,
    /// Legacy last-in-first-out order
    Stack,
}

impl From<TraversalArg> for Traversal {
    fn from(arg: TraversalArg) -> Self {
        match arg {
            TraversalArg::LevelOrder => Traversal::LevelOrder,
            TraversalArg::Stack => Traversal::Stack,
        }
    }
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print a commented template config file
    Template,
    /// Show config file locations
    Path,
}
