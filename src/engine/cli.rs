//! CLI command handler: merge defaults, `.dwkit.toml`, env and flags, then run the pipeline.

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::dataset::{Dataset, ExtractionStrategy};
use crate::engine::arg_parser::{Cli, RunRequest};
use crate::engine::parallel::normalize_num_proc;
use crate::extract_corpus;
use crate::pipeline::CancelToken;
use crate::types::PipelineConfig;
use crate::utils::config::Defaults;
use crate::utils::dwkit_toml::{DwkitToml, apply_file_to_config, load_dwkit_toml};
use crate::utils::setup_logging;

fn default_output(dataset: Dataset) -> &'static str {
    match dataset {
        Dataset::WebDataCorpus => Defaults::WEB_DATA_CORPUS_OUTPUT,
        Dataset::KoreanSns => Defaults::KOREAN_SNS_OUTPUT,
    }
}

/// Layer config: built-in defaults, then the data root's config file, then flags (which
/// already carry env values through clap).
pub fn build_config(request: &RunRequest<'_>, file: Option<&DwkitToml>) -> PipelineConfig {
    let mut config = PipelineConfig::new(request.root, default_output(request.dataset));
    config.show_progress = true;
    if let Some(file) = file {
        apply_file_to_config(file, &mut config);
    }

    let common = request.common;
    if let Some(output) = request.output {
        config.output = output.to_path_buf();
    }
    if let Some(ref temp_dir) = common.temp_dir {
        config.temp_root = temp_dir.clone();
    }
    if let Some(target) = common.target {
        config.category = target;
    }
    if let Some(unzip) = common.unzip() {
        config.unzip = unzip;
    }
    if common.num_proc.is_some() {
        config.num_workers = normalize_num_proc(common.num_proc);
    }
    if let Some(strict) = common.strict {
        config.strict = strict;
    }
    if let Some(verbose) = common.verbose {
        config.verbose = verbose;
    }
    if common.no_progress {
        config.show_progress = false;
    }
    config
}

/// Run the selected dataset subcommand. Skipped documents and archives do not fail the run.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let request = cli.command.request();
    let (file, file_error) = match load_dwkit_toml(request.root) {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };
    let config = build_config(&request, file.as_ref());

    // After merging, so `verbose` from the config file applies too.
    setup_logging(config.verbose);
    if let Some(e) = file_error {
        warn!("Ignoring config file {}", e);
    }
    debug!("Running {} on {}", request.dataset.name(), config.data_root.display());

    let cancel = CancelToken::new();
    cancel
        .install_ctrlc_handler()
        .context("set Ctrl+C handler")?;

    extract_corpus(config, request.dataset, &cancel)
        .with_context(|| format!("{} extraction failed", request.dataset.name()))?;
    Ok(())
}
