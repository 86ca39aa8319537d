//! Interactive menu for the remedy toolchain.
//!
//! Provides a menu-driven interface using `dialoguer` for running either
//! pipeline without memorizing CLI flags.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use remedy_cli_utils::MultiProgress;
use remedy_models::config::Config;

use crate::commands;

/// Top-level actions available in the interactive menu.
enum Action {
    Keynotes,
    Phytochemicals,
}

impl Action {
    const ALL: &[Self] = &[Self::Keynotes, Self::Phytochemicals];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Keynotes => "Extract Keynotes PDF to CSV",
            Self::Phytochemicals => "Scrape phytochemical tables",
        }
    }
}

/// Prompts for a path, offering `default`.
fn prompt_path(prompt: &str, default: &str) -> Result<PathBuf, dialoguer::Error> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .interact_text()?;
    Ok(PathBuf::from(value))
}

/// Runs the interactive menu, prompting for the pipeline and its paths.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected pipeline fails.
pub async fn run(
    multi: &MultiProgress,
    mut config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Remedy Data Toolchain");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Keynotes => {
            let input = prompt_path("Keynotes PDF", commands::DEFAULT_KEYNOTES_PDF)?;
            let output = prompt_path("Output CSV", commands::DEFAULT_KEYNOTES_CSV)?;
            commands::keynotes(&config, &input, &output)?;
        }
        Action::Phytochemicals => {
            let plants = prompt_path("Plant names CSV", commands::DEFAULT_PLANTS_CSV)?;
            let output = prompt_path("Output CSV", commands::DEFAULT_PHYTOCHEMICALS_CSV)?;

            let custom_url = Confirm::new()
                .with_prompt(format!(
                    "Use a different URL template than {}?",
                    config.phytochemicals.url_template
                ))
                .default(false)
                .interact()?;
            if custom_url {
                config.phytochemicals.url_template = Input::new()
                    .with_prompt("URL template ({plant} is replaced by each name)")
                    .interact_text()?;
            }

            commands::phytochemicals(multi, &config, &plants, &output).await?;
        }
    }

    Ok(())
}
