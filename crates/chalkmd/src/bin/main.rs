//! chalkmd CLI

use anyhow::Context;
use chalkmd::{ChalkApp, Command};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// chalkmd - vault-scoped file operations for markdown notes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Vault directory to open before running the command
    #[arg(short, long, env = "CHALKMD_VAULT")]
    vault: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (overrides the config file; RUST_LOG overrides both)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let app = ChalkApp::from_config_file(args.config.as_deref())
        .await
        .context("Failed to load configuration")?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| app.config().log_level.clone());
    init_logging(&level, args.log_format);

    log::debug!("chalkmd v{}", env!("CARGO_PKG_VERSION"));

    if let Some(vault) = &args.vault {
        app.vault
            .open_vault(vault)
            .await
            .with_context(|| format!("Failed to open vault {}", vault))?;
    }

    let command = match args.command {
        Command::Write {
            path,
            content: None,
        } => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read note content from stdin")?;
            Command::Write {
                path,
                content: Some(content),
            }
        }
        other => other,
    };

    let output = app.run(command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
