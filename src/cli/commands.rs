//! Command dispatch

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{decode_records, encode_records, pretty_print, IoResultExt, SortService};
use crate::cli::args::{Cli, Commands, ConfigCommands, SortArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{HierarchyArena, TreeDisplay, ValidationMode};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Sort(args)) => {
            let settings = load_settings(cli)?;
            cmd_sort(args, settings)
        }
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            print_completions(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

fn config_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(|e| CliError::io("get current directory", e)),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = match &cli.config_file {
        Some(path) => Settings::load_file(path)?,
        None => Settings::load(Some(&config_dir(cli)?))?,
    };
    debug!(?settings, "settings loaded");
    Ok(settings)
}

/// Command line flags override every config layer.
fn apply_flags(mut settings: Settings, args: &SortArgs) -> Settings {
    if let Some(id_field) = &args.id_field {
        settings.id_field = id_field.clone();
    }
    if let Some(parent_field) = &args.parent_field {
        settings.parent_field = parent_field.clone();
    }
    if let Some(traversal) = args.traversal {
        settings.traversal = traversal.into();
    }
    if args.strict {
        settings.validation = ValidationMode::Strict;
    }
    if args.compact {
        settings.pretty = false;
    }
    settings
}

fn read_input(args: &SortArgs) -> CliResult<String> {
    if let Some(records) = args.records.as_ref().or(args.input.as_ref()) {
        return Ok(records.clone());
    }
    match args.file.as_deref() {
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => {
            if !path.exists() {
                return Err(CliError::InputNotFound(path.to_path_buf()));
            }
            Ok(std::fs::read_to_string(path).with_path_context("read input", path)?)
        }
        None if io::stdin().is_terminal() => Err(CliError::InvalidArgs(
            "no records given: pass a JSON string, --input, --file or pipe to stdin".to_string(),
        )),
        None => read_stdin(),
    }
}

fn read_stdin() -> CliResult<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| CliError::io("read stdin", e))?;
    Ok(buffer)
}

#[instrument(skip(args, settings))]
fn cmd_sort(args: &SortArgs, settings: Settings) -> CliResult<()> {
    let settings = apply_flags(settings, args);
    let input = read_input(args)?;

    if !args.no_echo {
        output::header("Input");
        output::info(&pretty_print(&input)?);
    }

    let service = SortService::new(settings.sort_options());
    let records = decode_records(&input)?;
    let hierarchy = service.build_hierarchy(records)?;

    if args.tree {
        output::header("Hierarchy");
        output::info(&hierarchy.to_tree_string());
        output::action("shape", &tree_summary(&hierarchy));
    }
    if hierarchy.root().is_none() && !hierarchy.is_empty() {
        output::warning("no record has a null parent identifier, nothing to insert");
    }

    let ordered = service.flatten(hierarchy);
    if !args.no_echo {
        output::header("Insertion order");
    }
    output::info(&encode_records(&ordered, settings.pretty)?);
    Ok(())
}

/// One-line shape of the hierarchy shown under `--tree`.
fn tree_summary(hierarchy: &HierarchyArena) -> String {
    let leaves = hierarchy.leaf_keys();
    format!(
        "depth {}, {} leaves ({})",
        hierarchy.depth(),
        leaves.len(),
        leaves.iter().join(", ")
    )
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let describe = |path: &Path| {
                let state = if path.exists() { "exists" } else { "not found" };
                format!("{} ({state})", path.display())
            };
            match global_config_path() {
                Some(path) => output::action("global", &describe(&path)),
                None => output::action("global", "unavailable (no home directory)"),
            }
            match &cli.config_file {
                Some(path) => output::action("file", &describe(path)),
                None => output::action("local", &describe(&local_config_path(&config_dir(cli)?))),
            }
        }
    }
    Ok(())
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
