//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Build, walk and prune forests from flat key/parent-key record files
#[derive(Parser, Debug)]
#[command(name = "rsforest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .rsforest.toml (default: record file directory)
    #[arg(short = 'c', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every tree of the forest
    Tree {
        /// Record file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List all descendants of each root, depth first
    Nodes {
        /// Record file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List leaf records
    Leaves {
        /// Record file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List records that have children (roots excluded)
    Internal {
        /// Record file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show all branches linearly (leaf <- ... <- root)
    Branches {
        /// Record file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show the forest without the given records and their subtrees
    Prune {
        /// Record file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Keys to drop
        #[arg(long = "drop", required = true, num_args = 1..)]
        drop: Vec<String>,
    },

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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings
    Show,
    /// Print a commented config template
    Template,
    /// Print the global config file location
    Path,
}
