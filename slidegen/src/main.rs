//! slidegen - plain-text outline to HTML slide deck
//!
//! Splits a text file into `%kind` directive blocks, renders each block as a
//! slide, and appends the slides to the body of an HTML template.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cli;
mod pipeline;
mod section;
mod slide;
mod template;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;

/// Main entry point for the slidegen CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("Building slides...");
    println!("Input: {}", cli.input.display());
    println!("Template: {}", cli.template.display());

    let count = pipeline::build_deck(&cli.input, &cli.template, &cli.output)
        .with_context(|| format!("Failed to build slides from {}", cli.input.display()))?;

    println!("✓ Wrote {} slides to {}", count, cli.output.display());

    Ok(())
}
