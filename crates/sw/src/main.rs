use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use sw_core::types::{Decision, DecisionBatch};
use sw_core::{encode_batch, reconstruct, Configuration};
use sw_wire::types::ExecutionHistory;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sw")]
struct Cli {
    /// TOML file with per-type defaults. Falls back to SWFLOW_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the typed history of a saved execution (description plus events).
    History { file: PathBuf },
    /// Encode one decision or a list of decisions into service decision records.
    Encode { file: PathBuf },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecisionInput {
    Batch(Vec<Decision>),
    Single(Decision),
}

impl From<DecisionInput> for DecisionBatch {
    fn from(value: DecisionInput) -> Self {
        match value {
            DecisionInput::Batch(decisions) => decisions.into(),
            DecisionInput::Single(decision) => decision.into(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::History { file } => {
            let history: ExecutionHistory = read_json(&file)?;
            let process = reconstruct(&history.info, &history.events).map_err(|err| err.to_string())?;
            print_json(&process)
        }
        Command::Encode { file } => {
            let config = load_config(cli.config)?;
            let input: DecisionInput = read_json(&file)?;
            let batch = DecisionBatch::from(input);
            let encoded = encode_batch(&batch, &config).map_err(|err| err.to_string())?;
            print_json(&encoded)
        }
    }
}

fn load_config(flag: Option<PathBuf>) -> Result<Configuration, String> {
    let path = flag.or_else(|| std::env::var_os("SWFLOW_CONFIG").map(PathBuf::from));
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Configuration::load(&path).map_err(|err| err.to_string())
        }
        None => Ok(Configuration::default()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("read {}: {err}", path.display()))?;
    serde_json::from_str(&content).map_err(|err| format!("parse {}: {err}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let output = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{output}");
    Ok(())
}
