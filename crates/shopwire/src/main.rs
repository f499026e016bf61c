// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shopwire - a commerce storefront administered over a messaging API.
//!
//! This is the binary entry point.

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Shopwire - a commerce storefront administered over a messaging API.
#[derive(Parser, Debug)]
#[command(name = "shopwire", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook gateway and conversational engine.
    Serve,
    /// Print the resolved configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            shopwire_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run(config).await {
                tracing::error!(error = %e, "serve failed");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_config(&config);
        }
        None => {
            println!("shopwire: use --help for available commands");
        }
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<shopwire_config::ShopwireConfig, Vec<shopwire_config::ConfigError>> {
    match path {
        Some(path) => match shopwire_config::load_config_from_path(path) {
            Ok(config) => {
                shopwire_config::validation::validate_config(&config)?;
                Ok(config)
            }
            Err(err) => Err(shopwire_config::diagnostic::figment_to_config_errors(err)),
        },
        None => shopwire_config::load_and_validate(),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_config(config: &shopwire_config::ShopwireConfig) {
    let mut redacted = config.clone();
    redacted.whatsapp.access_token = redacted
        .whatsapp
        .access_token
        .as_ref()
        .map(|_| "(set)".to_string());
    redacted.whatsapp.verify_token = redacted
        .whatsapp
        .verify_token
        .as_ref()
        .map(|_| "(set)".to_string());

    match toml::to_string_pretty(&redacted) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("shopwire: failed to render config: {e}"),
    }
}
