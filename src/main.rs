use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use cypherforge::config;
use cypherforge::cypher_generator::{
    compile_count, compile_delete, compile_return, compile_set, CompiledQuery, Target,
};
use cypherforge::graph_model::{Properties, Query};

/// Cypherforge - compile graph query descriptions into parameterized Cypher
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a query description (JSON or YAML) and print the Cypher with its parameters
    Compile {
        /// Query description file
        #[arg(long)]
        query: PathBuf,

        /// Operation appended after MATCH/WHERE
        #[arg(long, value_enum, default_value_t = Operation::Return)]
        operation: Operation,

        /// Property map to assign, for set-nodes / set-edges
        #[arg(long)]
        set: Option<PathBuf>,
    },
    /// Load and validate client configuration, then print it with secrets hidden
    Config {
        /// YAML configuration file (environment variables are used otherwise)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Connection URI; takes precedence over the environment
        #[arg(long)]
        uri: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        database: Option<String>,

        #[arg(long, default_value_t = 1000)]
        bulk_batch_size: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Operation {
    Return,
    Count,
    SetNodes,
    SetEdges,
    DeleteNodes,
    DeleteEdges,
}

/// JSON or YAML by extension; YAML is a superset, so anything else goes there.
fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        _ => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
    };
    Ok(parsed)
}

fn compile(
    query_path: &Path,
    operation: Operation,
    set: Option<&Path>,
) -> anyhow::Result<CompiledQuery> {
    let query: Query = read_document(query_path)?;
    let properties: Properties = match set {
        Some(path) => read_document(path)?,
        None => Properties::new(),
    };
    if matches!(operation, Operation::SetNodes | Operation::SetEdges) && set.is_none() {
        bail!("--set is required for set-nodes and set-edges");
    }

    let compiled = match operation {
        Operation::Return => compile_return(&query),
        Operation::Count => compile_count(&query),
        Operation::SetNodes => compile_set(&query, Target::FirstNode, &properties),
        Operation::SetEdges => compile_set(&query, Target::FirstEdge, &properties),
        Operation::DeleteNodes => compile_delete(&query, Target::FirstNode),
        Operation::DeleteEdges => compile_delete(&query, Target::FirstEdge),
    };
    if !compiled.has_operation() {
        log::warn!("Operation clause is empty; the statement only matches");
    }
    Ok(compiled)
}

fn main() -> anyhow::Result<()> {
    // Defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            log::warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    match Cli::parse().command {
        Command::Compile {
            query,
            operation,
            set,
        } => {
            let compiled = compile(&query, operation, set.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&compiled)?);
        }
        Command::Config {
            file,
            uri,
            username,
            password,
            database,
            bulk_batch_size,
        } => {
            let client_config = match (file, uri) {
                (Some(path), _) => config::ClientConfig::from_yaml_file(path)?,
                (None, Some(uri)) => config::ClientConfig::from_cli(config::CliConfig {
                    uri,
                    username,
                    password,
                    database,
                    bulk_batch_size,
                })?,
                (None, None) => config::ClientConfig::from_env()?,
            };
            log::info!("Configuration OK: {}", client_config);
            print!("{}", serde_yaml::to_string(&client_config.redacted())?);
        }
    }

    Ok(())
}
