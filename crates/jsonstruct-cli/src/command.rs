use clap::{Args, Parser, Subcommand};
use jsonstruct_aggregation::{AggregationDescriptor, AggregationError, Description};
use jsonstruct_config_build::{CONFIG_FILE_NAME, Config, ConfigError};
use serde::Serialize;
use std::{fs, io, path::PathBuf};
use thiserror::Error as ThisError;
use tracing::info;

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "jsonstruct")]
#[command(about = "Resolve aggregation rules of JSON data descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the resolved aggregation descriptor
    Resolve(Input),

    /// Print every element and alias name in sorted order
    Elements(Input),

    /// Print sorted `[key, element]` pairs, aliases included
    Map(Input),
}

#[derive(Args, Debug)]
pub struct Input {
    /// Path to the JSON data description
    pub file: PathBuf,

    /// Path to the config file
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Command {
    const fn input(&self) -> &Input {
        match self {
            Self::Resolve(input) | Self::Elements(input) | Self::Map(input) => input,
        }
    }
}

///
/// CliError
///

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: {source}")]
    Aggregation {
        path: PathBuf,
        #[source]
        source: AggregationError,
    },

    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Run one command and return the text to print.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let input = cli.command.input();
    let descriptor = load_descriptor(input)?;
    info!(
        file = %input.file.display(),
        kind = %descriptor.kind(),
        keys = descriptor.len(),
        "resolved description"
    );

    match &cli.command {
        Command::Resolve(_) => encode(&descriptor, input.pretty),
        Command::Elements(_) => encode(&descriptor.sorted_array_elements(), input.pretty),
        Command::Map(_) => {
            let pairs: Vec<[&str; 2]> = descriptor
                .sorted_map_elements()
                .into_iter()
                .map(|(key, element)| [key, element])
                .collect();

            encode(&pairs, input.pretty)
        }
    }
}

fn load_descriptor(input: &Input) -> Result<AggregationDescriptor, CliError> {
    let config = Config::load_or_default(&input.config)?;

    let text = fs::read_to_string(&input.file).map_err(|source| CliError::Read {
        path: input.file.clone(),
        source,
    })?;
    let description = Description::from_json_str(&text).map_err(|source| CliError::Parse {
        path: input.file.clone(),
        source,
    })?;

    config
        .resolver()
        .resolve(&description)
        .map_err(|source| CliError::Aggregation {
            path: input.file.clone(),
            source,
        })
}

fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(CliError::Encode)
}

///
/// TESTS
///
