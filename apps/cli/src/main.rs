//! CiteScout CLI — reference spreadsheet to retrieval checklist page.
//!
//! Reads a spreadsheet of literature references and writes a self-contained
//! HTML page with outbound search links and browser-persisted progress.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
