use bale_client::{Bot, EchoHandler, Poller, PollingConfig};
use bale_core::{config, message::User, sanitize::mask_token};
use clap::{Parser, Subcommand};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bale", version, about = "Long-polling bot for the Bale messenger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start polling and answer messages until Ctrl-C.
    Start,
    /// Show the effective config and check the token with `getMe`.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.bale.log_level)),
        )
        .init();

    match cli.command {
        Commands::Start => {
            cfg.bot.validate()?;

            let bot = Bot::from_config(&cfg.bot);
            let handler = EchoHandler::new(&cfg.echo);
            let mut poller = Poller::new(bot, handler, PollingConfig::from(&cfg.bot));

            info!(
                "starting bale bot | endpoint: {} | token: {}",
                cfg.bot.base_url,
                mask_token(&cfg.bot.token)
            );
            poller.long_polling(shutdown_signal()).await;
            println!("⏹ Bot stopped.");
        }
        Commands::Status => {
            println!("Bale — Status Check\n");
            println!("Config: {}", cli.config);
            println!("Endpoint: {}", cfg.bot.base_url);

            if cfg.bot.token.trim().is_empty() {
                println!("Token: not set (bot.token or {})", config::TOKEN_ENV);
                return Ok(());
            }
            println!("Token: {}", mask_token(&cfg.bot.token));
            println!();

            let bot = Bot::from_config(&cfg.bot);
            match bot.get_me().await {
                Ok(body) if body.get("ok").and_then(|v| v.as_bool()) == Some(true) => {
                    let me: User = serde_json::from_value(body["result"].clone())?;
                    println!(
                        "  getMe: ok — {} (@{}, id {})",
                        me.first_name,
                        me.username.as_deref().unwrap_or("-"),
                        me.id
                    );
                }
                Ok(body) => {
                    println!(
                        "  getMe: rejected — {}",
                        body.get("description")
                            .and_then(|v| v.as_str())
                            .unwrap_or("no description")
                    );
                }
                Err(e) => println!("  getMe: failed — {e}"),
            }
            bot.close().await;
        }
    }

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}
