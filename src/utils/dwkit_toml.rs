//! Load `.dwkit.toml` from the data root (CLI only). Library callers build [`PipelineConfig`] directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::engine::parallel::normalize_num_proc;
use crate::types::{Category, PipelineConfig};
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct DwkitToml {
    #[serde(default)]
    settings: RunSection,
}

#[derive(Debug, Default, Deserialize)]
struct RunSection {
    output: Option<String>,
    temp_dir: Option<String>,
    target: Option<Category>,
    unzip: Option<bool>,
    num_proc: Option<i64>,
    strict: Option<bool>,
    verbose: Option<bool>,
    progress: Option<bool>,
}

/// Load the config file from `dir`. `Ok(None)` if missing or unreadable; `Err` names the file
/// and the parse error. Callers report the error themselves since logging may not be up yet.
pub fn load_dwkit_toml(dir: &Path) -> Result<Option<DwkitToml>, String> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_dwkit_toml(&s)
        .map(Some)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn parse_dwkit_toml(s: &str) -> Result<DwkitToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite config field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $config:expr, $section_field:ident => $config_field:ident) => {
        if let Some(v) = $section.$section_field {
            $config.$config_field = v;
        }
    };
}

/// Apply file settings to `config` (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_config(file: &DwkitToml, config: &mut PipelineConfig) {
    let s = &file.settings;
    if let Some(ref p) = s.output {
        config.output = PathBuf::from(p);
    }
    if let Some(ref p) = s.temp_dir {
        config.temp_root = PathBuf::from(p);
    }
    apply_file_opt!(s, config, target => category);
    apply_file_opt!(s, config, unzip => unzip);
    if s.num_proc.is_some() {
        config.num_workers = normalize_num_proc(s.num_proc);
    }
    apply_file_opt!(s, config, strict => strict);
    apply_file_opt!(s, config, verbose => verbose);
    apply_file_opt!(s, config, progress => show_progress);
}
