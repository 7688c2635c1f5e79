use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::types::Category;

/// Build a one-sentence-per-line text corpus from zipped JSON datasets.
#[derive(Clone, Parser)]
#[command(name = "dwkit", version)]
#[command(about = "Unpack dataset archives and extract every sentence into one text file.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Large-scale web data Korean corpus (label or source data).
    #[command(alias = "web_data_corpus")]
    WebDataCorpus(WebDataCorpusArgs),

    /// Korean SNS dialogue corpus (label data only).
    #[command(alias = "korean_sns")]
    KoreanSns(KoreanSnsArgs),
}

#[derive(Clone, Args)]
pub struct WebDataCorpusArgs {
    /// Dataset root directory.
    #[arg(value_name = "ROOT", env = "WEB_DATA_CORPUS_ROOT")]
    pub root: PathBuf,

    /// Output corpus file. Default: ./data/web_data_corpus.txt
    #[arg(long, short, env = "WEB_DATA_CORPUS_OUTPUT")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Clone, Args)]
pub struct KoreanSnsArgs {
    /// Dataset root directory.
    #[arg(value_name = "ROOT", env = "KOREAN_SNS_ROOT")]
    pub root: PathBuf,

    /// Output corpus file. Default: ./data/korean_sns.txt
    #[arg(long, short, env = "KOREAN_SNS_OUTPUT")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory in which the scratch workspace for unpacked archives is created. Default: ./temp
    #[arg(long = "temp-dir", visible_alias = "tmp", value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Data to read: label (라벨링) or source (원천). Default: label.
    #[arg(long, short = 't', value_enum)]
    pub target: Option<Category>,

    /// Unpack archives before reading (default).
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub unzip: Option<bool>,

    /// Read already-unpacked JSON documents under ROOT; source files are never deleted.
    #[arg(long, conflicts_with = "unzip")]
    pub no_unzip: bool,

    /// Worker count. 0, negative or absent uses every core.
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub num_proc: Option<i64>,

    /// Abort on the first document that cannot be parsed or extracted instead of skipping it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Hide progress bars.
    #[arg(long)]
    pub no_progress: bool,
}

impl CommonArgs {
    /// `--no-unzip` wins over `--unzip`; `None` when neither was given.
    pub fn unzip(&self) -> Option<bool> {
        if self.no_unzip {
            Some(false)
        } else {
            self.unzip
        }
    }
}

/// The parts of a subcommand the run needs, independent of which dataset was picked.
pub struct RunRequest<'a> {
    pub dataset: Dataset,
    pub root: &'a Path,
    pub output: Option<&'a Path>,
    pub common: &'a CommonArgs,
}

impl Commands {
    pub fn request(&self) -> RunRequest<'_> {
        match self {
            Commands::WebDataCorpus(args) => RunRequest {
                dataset: Dataset::WebDataCorpus,
                root: &args.root,
                output: args.output.as_deref(),
                common: &args.common,
            },
            Commands::KoreanSns(args) => RunRequest {
                dataset: Dataset::KoreanSns,
                root: &args.root,
                output: args.output.as_deref(),
                common: &args.common,
            },
        }
    }
}
