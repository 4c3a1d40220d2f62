//! Command-line interface definitions for slidegen

use clap::Parser;
use std::path::PathBuf;

/// CLI structure for the slidegen application
#[derive(Parser, Debug)]
#[command(name = "slidegen")]
#[command(version)]
#[command(about = "Build an HTML slide deck from a plain-text outline", long_about = None)]
pub struct Cli {
    /// Source text made of `%kind` directive blocks
    #[arg(short, long, default_value = "input.txt")]
    pub input: PathBuf,

    /// HTML template whose <body> receives the slides
    #[arg(short, long, default_value = "template.html")]
    pub template: PathBuf,

    /// Output HTML file
    #[arg(short, long, default_value = "gen.html")]
    pub output: PathBuf,
}
