//! Configuration CLI commands

use clap::Subcommand;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::remote::Session;

use super::AppContext;

/// How many event log entries `config show` lists
const RECENT_EVENT_COUNT: usize = 5;

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Configure the hosted backend
    SetApi {
        /// Backend base URL
        url: String,
        /// Public API key
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Configure the AI endpoint
    SetAi {
        /// Chat-completions base URL
        url: String,
        /// Model name
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Set the display currency (ISO 4217 code)
    SetCurrency {
        /// Three-letter code, e.g. "EUR"
        code: String,
    },
}

/// Handle a config command
pub fn handle_config_command(ctx: &AppContext, cmd: ConfigCommands) -> SpendwiseResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let profile = ctx.store.profile()?;
            println!("Data directory: {}", ctx.paths.base_dir().display());
            println!("Currency:       {}", profile.currency);
            println!(
                "Backend:        {}",
                ctx.settings.api_url().unwrap_or_else(|| "not configured".into())
            );
            println!(
                "API key:        {}",
                if ctx.settings.api_key().is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!(
                "AI endpoint:    {}",
                ctx.settings.ai_url().unwrap_or_else(|| "not configured".into())
            );
            println!("AI model:       {}", ctx.settings.ai_model);
            println!(
                "AI key:         {}",
                if ctx.settings.ai_api_key().is_some() {
                    "set (from environment)"
                } else {
                    "not set (export SPENDWISE_AI_API_KEY)"
                }
            );
            match Session::load(&ctx.paths)? {
                Some(session) if session.is_expired() => {
                    println!("Session:        expired ({}), run 'spendwise auth login'", session.email);
                }
                Some(session) => {
                    println!("Session:        signed in as {}", session.email);
                }
                None => println!("Session:        guest mode"),
            }

            let recent = ctx.events.read_recent(RECENT_EVENT_COUNT)?;
            if !recent.is_empty() {
                println!("Recent activity:");
                for entry in recent {
                    println!("  {}", entry);
                }
            }
        }

        ConfigCommands::SetApi { url, key } => {
            let mut settings = ctx.settings.clone();
            settings.api_url = Some(url);
            if key.is_some() {
                settings.api_key = key;
            }
            settings.save(&ctx.paths)?;
            println!("Backend configuration saved.");
        }

        ConfigCommands::SetAi { url, model } => {
            let mut settings = ctx.settings.clone();
            settings.ai_url = Some(url);
            if let Some(model) = model {
                settings.ai_model = model;
            }
            settings.save(&ctx.paths)?;
            println!("AI configuration saved. Remember to export SPENDWISE_AI_API_KEY.");
        }

        ConfigCommands::SetCurrency { code } => {
            let mut profile = ctx.store.profile()?;
            profile.currency = code.to_uppercase();
            profile
                .validate()
                .map_err(|e| SpendwiseError::Validation(e.to_string()))?;
            ctx.store.update_profile(&profile)?;
            println!("Currency set to {}.", profile.currency);
        }
    }

    Ok(())
}
