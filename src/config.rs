use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::source::CsvSource;

const CONFIG_FILE: &str = "config.toml";

/// Default configuration embedded in the binary.
const DEFAULT_CONFIG: &str = r#"
[source]
csv = "inventario.csv"

[window]
width = 1280.0
height = 800.0
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub window: WindowConfig,
    /// Directory relative CSV paths resolve against (the config file's own
    /// directory, when one was found).
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SourceConfig {
    /// Path or http(s) URL of the CSV loaded at startup.
    pub csv: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig {
                csv: "inventario.csv".to_string(),
            },
            window: WindowConfig::default(),
            base_dir: None,
        }
    }
}

impl Config {
    /// Replace the startup CSV location (first command-line argument).
    /// An override given on the command line resolves against the working
    /// directory, not the config file.
    pub fn with_source_override(mut self, location: Option<String>) -> Self {
        if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
            self.source.csv = location;
            self.base_dir = None;
        }
        self
    }

    /// The startup CSV location, with relative paths resolved.
    pub fn csv_source(&self) -> CsvSource {
        let source = CsvSource::parse(&self.source.csv);
        match &self.base_dir {
            Some(base) => source.relative_to(base),
            None => source,
        }
    }
}

/// Parse configuration text.
pub fn parse_config(text: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(text).context("parsing configuration")?;
    Ok(config)
}

/// Load configuration from `config.toml`.
///
/// Search order:
/// 1. Next to the executable
/// 2. The working directory
/// 3. Falls back to the embedded default
pub fn load_config() -> anyhow::Result<Config> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();

    for dir in [exe_dir, cwd].into_iter().flatten() {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            log::debug!("{} not found", config_path.display());
            continue;
        }
        log::info!("Loading config from: {}", config_path.display());
        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        let mut config = parse_config(&contents)
            .with_context(|| format!("in {}", config_path.display()))?;
        config.base_dir = Some(dir);
        return Ok(config);
    }

    log::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}
