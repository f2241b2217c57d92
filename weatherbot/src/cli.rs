use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use std::sync::Arc;
use tracing::{info, warn};
use weatherbot_core::{
    Config, WeatherService,
    provider::{forecast_provider_from_config, geocoder_from_config},
};

use crate::{bot, telegram::TelegramClient};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "Telegram weather bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start answering Telegram messages.
    Run,

    /// Enter the Telegram token and the Yandex Weather API key.
    Configure,

    /// Answer one message locally and print the reply, e.g. `ask /weather -l Москва`.
    Ask {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Run => {
                let config = Config::load()?;
                let telegram = TelegramClient::new(config.telegram_token()?, &config.telegram)?;
                let me = telegram
                    .get_me()
                    .await
                    .context("Failed to identify the bot; check the Telegram token")?;
                let service = service_from_config(&config)?;
                let bot = Arc::new(bot::Bot::new(telegram, service, me.username));

                bot.run(shutdown_signal()).await;
            }
            Command::Configure => configure()?,
            Command::Ask { text } => {
                let config = Config::load()?;
                let service = service_from_config(&config)?;

                match bot::respond(&service, &text.join(" "), None).await {
                    Some(reply) => {
                        for chunk in reply.chunks {
                            println!("{chunk}\n");
                        }
                    }
                    None => println!("Not a bot command. Try `/help`."),
                }
            }
        }

        Ok(())
    }
}

/// Resolves on Ctrl-C, or right away if the signal cannot be watched.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}

fn service_from_config(config: &Config) -> anyhow::Result<WeatherService> {
    Ok(WeatherService::new(
        geocoder_from_config(config)?,
        forecast_provider_from_config(config)?,
        config.forecast.days,
    ))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let token = Password::new("Telegram bot token (empty keeps the current one):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    if !token.trim().is_empty() {
        config.telegram_token = Some(token.trim().to_string());
    }

    let key = Password::new("Yandex Weather API key (empty keeps the current one):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    if !key.trim().is_empty() {
        config.yandex_api_key = Some(key.trim().to_string());
    }

    config.forecast.days = CustomType::<u8>::new("Forecast days to request:")
        .with_default(config.forecast.days)
        .with_error_message("Enter a number between 1 and 255")
        .prompt()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
