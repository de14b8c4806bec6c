use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use statnorm_core::{EngineConfig, NormalizationOptions, Normalizer};

#[derive(Parser)]
#[command(name = "statnorm", about = "Normalize a device statistics payload")]
struct Cli {
    /// Payload JSON file. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Normalization options JSON file (defaults to `{}`: reduce only).
    #[arg(long, short)]
    options: Option<PathBuf>,

    /// Engine config TOML layered over the built-in defaults.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,

    /// Log each pipeline stage to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = EngineConfig::load(cli.config.as_deref()).context("loading engine config")?;

    let options: NormalizationOptions = match &cli.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing options from {}", path.display()))?
        }
        None => NormalizationOptions::default(),
    };

    let payload = read_payload(cli.input.as_ref())?;
    let data: serde_json::Value = serde_json::from_str(&payload).context("parsing payload JSON")?;

    tracing::info!(options = ?options, "normalizing payload");
    let out = Normalizer::new(config)
        .normalize(data, &options)
        .context("normalization failed")?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    println!("{rendered}");
    Ok(())
}

fn read_payload(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading payload from {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading payload from stdin")?;
            Ok(buf)
        }
    }
}
