//! dwkit CLI: build a text corpus from one dataset release.

use anyhow::Result;
use clap::Parser;
use dwkit::engine::arg_parser::Cli;
use dwkit::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    // .env may supply WEB_DATA_CORPUS_ROOT and friends; a missing file is fine.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
