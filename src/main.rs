use clap::{Parser, Subcommand};
use std::path::Path;

use spark_bot::{Config, SparkBot};

#[derive(Parser)]
#[command(name = "spark-bot")]
#[command(about = "A webhook-driven Webex bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and environment)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the webhook and start serving
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = match Config::resolve(&cli.config, cli.token) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to load config: {}", e);
                    std::process::exit(1);
                }
            };
            init_logging(config.bot.debug);
            run_bot(config).await;
        }
        Commands::Version => {
            println!("spark-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_logging(false);
            init_config(&cli.config);
        }
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "info,spark_bot=debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

async fn run_bot(config: Config) {
    tracing::info!("Spark Bot URL (for webhook): {}", config.bot.url);
    tracing::info!("Spark Bot App Name: {}", config.bot.name);

    let bot = match SparkBot::new(config) {
        Ok(bot) => bot,
        Err(e) => {
            tracing::error!("Failed to start bot: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = bot.run().await {
        tracing::error!("Bot stopped: {}", e);
        std::process::exit(1);
    }
}

fn init_config(path: &str) {
    if Path::new(path).exists() {
        tracing::warn!("{} already exists, not overwriting", path);
        return;
    }

    let yaml = match Config::default().to_yaml() {
        Ok(yaml) => yaml,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    match std::fs::write(path, yaml) {
        Ok(()) => tracing::info!("Wrote default config to {}", path),
        Err(e) => {
            tracing::error!("Failed to write {}: {}", path, e);
            std::process::exit(1);
        }
    }
}
