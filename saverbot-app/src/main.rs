use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use saverbot_client::SaverApi;
use saverbot_commands::{ArticleQueryCommand, CommandRegistry, SaveTaskCommand, TaskStatusCommand};
use saverbot_common::observability::{init_logging, LogConfig, LogFormat};
use saverbot_config::{SaverConfig, SaverConfigLoader};

mod console;

#[derive(Parser)]
#[command(name = "saverbot", about = "Chat-command front-end for the article archive")]
struct Args {
    /// Path to the YAML configuration file; skipped when absent.
    #[arg(long, default_value = "saverbot.yaml")]
    config: PathBuf,
    /// Emit logs as JSON instead of text.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1) Load config (env wins over the file).
    let mut loader = SaverConfigLoader::new();
    if args.config.exists() {
        loader = loader.with_file(&args.config);
    }
    let cfg: SaverConfig = loader.load()?;

    init_logging(LogConfig {
        format: if args.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        ..LogConfig::default()
    })?;

    tracing::info!(
        endpoint = %cfg.api.endpoint,
        user_agent = %cfg.api.user_agent,
        "saverbot.starting"
    );

    let api = SaverApi::new(&cfg.api.endpoint, &cfg.api.user_agent)?;
    let registry = build_registry(api);

    console::run(registry).await
}

fn build_registry(api: SaverApi) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .register(Arc::new(ArticleQueryCommand::new(api.clone())))
        .register(Arc::new(SaveTaskCommand::new(api.clone())))
        .register(Arc::new(TaskStatusCommand::new(api)));
    registry
}
