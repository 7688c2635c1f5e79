//! Terminal logging: env_logger with coloured tags and quiet dependencies.

use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Colours for the end-of-run summary line.
pub struct Colors;

impl Colors {
    pub const EXTRACTED: &'static str = "green";
    pub const SKIPPED: &'static str = "yellow";
    pub const FAILED: &'static str = "red";

    pub fn colorize(color: &str, text: &str) -> ColoredString {
        text.color(color)
    }
}

fn level_tag(level: Level) -> Option<ColoredString> {
    match level {
        Level::Error => Some("ERROR".red().bold()),
        Level::Warn => Some("WARN".yellow()),
        Level::Debug => Some("debug".dimmed()),
        Level::Info | Level::Trace => None,
    }
}

/// Dependencies log at warn, this crate at info (debug when `verbose`). `RUST_LOG` is applied last.
pub fn setup_logging(verbose: bool) {
    let name = env!("CARGO_PKG_NAME");
    let own_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(name, own_level)
        .parse_default_env()
        .format(move |buf, record| {
            let prefix = name.cyan();
            match level_tag(record.level()) {
                // Problems carry the module they came from.
                Some(tag) if record.level() <= Level::Warn => writeln!(
                    buf,
                    "[{} {} {}] {}",
                    prefix,
                    tag,
                    record.target().white(),
                    record.args()
                ),
                Some(tag) => writeln!(buf, "[{} {}] {}", prefix, tag, record.args()),
                None => writeln!(buf, "[{}] {}", prefix, record.args()),
            }
        })
        .init();
}
