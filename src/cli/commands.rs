//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ForestService, Record};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{Forest, NodeRef, TreeNodeConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { file }) => cmd_tree(cli, file),
        Some(Commands::Nodes { file }) => cmd_nodes(cli, file),
        Some(Commands::Leaves { file }) => cmd_leaves(cli, file),
        Some(Commands::Internal { file }) => cmd_internal(cli, file),
        Some(Commands::Branches { file }) => cmd_branches(cli, file),
        Some(Commands::Prune { file, drop }) => cmd_prune(cli, file, drop),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

fn load_settings(cli: &Cli, file: Option<&Path>) -> CliResult<Settings> {
    let local_dir = cli
        .config_dir
        .as_deref()
        .or_else(|| file.and_then(Path::parent));
    let settings = Settings::load(local_dir)?;
    if !settings.color {
        colored::control::set_override(false);
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

fn load_forest(cli: &Cli, file: &Path) -> CliResult<(ForestService, Forest<Record>)> {
    let service = ForestService::new(load_settings(cli, Some(file))?);
    let forest = service.load(file)?;
    if forest.is_empty() {
        output::warning(&format!("no records in {}", file.display()));
    }
    Ok((service, forest))
}

fn print_forest(forest: &Forest<Record>) {
    for tree in forest {
        output::line(tree.to_tree_string().to_string().trim_end());
    }
}

fn print_labels<'a>(nodes: impl Iterator<Item = NodeRef<'a, Record>>) {
    for node in nodes {
        output::line(&node.model().label);
    }
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, file: &Path) -> CliResult<()> {
    let (_, forest) = load_forest(cli, file)?;
    print_forest(&forest);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_nodes(cli: &Cli, file: &Path) -> CliResult<()> {
    let (_, forest) = load_forest(cli, file)?;
    for tree in &forest {
        output::root(&tree[tree.root()].label);
        for node in tree.descendants() {
            output::nested(node.level(), &node.model().label);
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_leaves(cli: &Cli, file: &Path) -> CliResult<()> {
    let (_, forest) = load_forest(cli, file)?;
    for tree in &forest {
        print_labels(tree.leaf_nodes());
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_internal(cli: &Cli, file: &Path) -> CliResult<()> {
    let (_, forest) = load_forest(cli, file)?;
    for tree in &forest {
        print_labels(tree.non_leaf_nodes());
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_branches(cli: &Cli, file: &Path) -> CliResult<()> {
    let (service, forest) = load_forest(cli, file)?;
    for branch in service.branches(&forest) {
        output::line(&branch.iter().join(" <- "));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_prune(cli: &Cli, file: &Path, drop: &[String]) -> CliResult<()> {
    if drop.iter().any(|key| key.trim().is_empty()) {
        return Err(CliError::InvalidArgs("empty key in --drop".to_string()));
    }
    let (service, forest) = load_forest(cli, file)?;
    let pruned = service.prune(&forest, drop);
    debug!(before = forest.len(), after = pruned.len(), "pruned forest");
    print_forest(&pruned);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli, None)?;
            output::line(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Template => output::line(Settings::template().trim_end()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::line(&path.display()),
            None => output::warning("cannot determine config directory"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
