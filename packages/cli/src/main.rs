#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the remedy data extraction toolchain.
//!
//! `remedy keynotes` turns the Keynotes PDF into a CSV of symptom rows and
//! `remedy phytochemicals` scrapes one phytochemical table per plant into a
//! CSV. Running without a subcommand opens an interactive menu.

mod commands;
mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use remedy_models::config::Config;

#[derive(Parser)]
#[command(name = "remedy", about = "Remedy data extraction toolchain")]
struct Cli {
    /// TOML file overriding the built-in markers, URL template and selectors
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the Keynotes PDF into a CSV of symptom rows
    Keynotes {
        /// Path to the Keynotes PDF
        #[arg(long, default_value = commands::DEFAULT_KEYNOTES_PDF)]
        input: PathBuf,
        /// Where to write the cleaned CSV
        #[arg(long, default_value = commands::DEFAULT_KEYNOTES_CSV)]
        output: PathBuf,
    },
    /// Scrape the phytochemical table of every plant in a CSV
    Phytochemicals {
        /// Headerless CSV of plant names (every field is one plant)
        #[arg(long, default_value = commands::DEFAULT_PLANTS_CSV)]
        plants: PathBuf,
        /// Where to write the scraped rows
        #[arg(long, default_value = commands::DEFAULT_PHYTOCHEMICALS_CSV)]
        output: PathBuf,
        /// URL template with a `{plant}` placeholder (overrides config)
        #[arg(long)]
        url_template: Option<String>,
        /// Delay between plant requests in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = remedy_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        return interactive::run(&multi, config).await;
    };

    match command {
        Commands::Keynotes { input, output } => {
            commands::keynotes(&config, &input, &output)?;
        }
        Commands::Phytochemicals {
            plants,
            output,
            url_template,
            delay_ms,
        } => {
            if let Some(template) = url_template {
                config.phytochemicals.url_template = template;
            }
            if delay_ms.is_some() {
                config.phytochemicals.delay_ms = delay_ms;
            }
            commands::phytochemicals(&multi, &config, &plants, &output).await?;
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
