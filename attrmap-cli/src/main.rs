//! CLI tool for translating resource fields to and from API attributes.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::{Context, Result};
use attrmap_core::{load_config, ApiAttributes, ResourceConfig, ResourceData, Value};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Imports API attributes into local fields and prints the fields
    Import {
        /// Resource definition (schema + attribute map)
        #[arg(short, long)]
        config: PathBuf,
        /// JSON object of API attribute names to string values
        #[arg(short, long)]
        attributes: PathBuf,
    },
    /// Prints the API attributes for a create call
    Create {
        /// Resource definition (schema + attribute map)
        #[arg(short, long)]
        config: PathBuf,
        /// JSON object of local field values
        #[arg(long)]
        values: PathBuf,
    },
    /// Prints the API attributes for an update call
    Update {
        /// Resource definition (schema + attribute map)
        #[arg(short, long)]
        config: PathBuf,
        /// JSON object of last applied local field values
        #[arg(short, long)]
        state: PathBuf,
        /// JSON object of desired local field values; omitted fields are cleared
        #[arg(long)]
        values: PathBuf,
    },
    /// Lists the API attribute names a resource maps
    Names {
        /// Resource definition (schema + attribute map)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn sorted(attributes: ApiAttributes) -> BTreeMap<String, String> {
    attributes.into_iter().collect()
}

/// Replaces the current values of `store` with `values`; schema fields
/// missing from `values` are cleared.
fn apply_values(
    config: &ResourceConfig,
    store: &mut ResourceData,
    mut values: HashMap<String, Value>,
) -> Result<()> {
    for name in config.schema.keys() {
        values.entry(name.clone()).or_insert(Value::Null);
    }
    for (name, value) in values {
        store.set_value(&name, value).with_context(|| format!("invalid value for {name}"))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Import { config, attributes } => {
            let config = load_config(&config)?;
            let attributes: ApiAttributes = read_json(&attributes)?;

            let mut store = config.new_store();
            config.attributes.import_to_local(&attributes, &mut store)?;
            info!("Imported {} attribute(s) into {}", store.values().len(), config.resource);
            print_json(&store.values())?;
        },
        Commands::Create { config, values } => {
            let config = load_config(&config)?;
            let mut store = config.new_store();
            apply_values(&config, &mut store, read_json(&values)?)?;

            let attributes = config.attributes.export_for_create(&store)?;
            info!("Prepared {} create attribute(s) for {}", attributes.len(), config.resource);
            print_json(&sorted(attributes))?;
        },
        Commands::Update { config, state, values } => {
            let config = load_config(&config)?;
            let state: HashMap<String, Value> = read_json(&state)?;
            let mut store = ResourceData::with_state(config.schema.clone(), state)
                .context("invalid applied state")?;
            apply_values(&config, &mut store, read_json(&values)?)?;

            let attributes = config.attributes.export_for_update(&store)?;
            info!("Prepared {} update attribute(s) for {}", attributes.len(), config.resource);
            print_json(&sorted(attributes))?;
        },
        Commands::Names { config } => {
            let config = load_config(&config)?;
            for name in config.attributes.api_attribute_names() {
                println!("{name}");
            }
        },
    }

    Ok(())
}
