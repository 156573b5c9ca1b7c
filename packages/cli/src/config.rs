use parchment_evaluator::RenderMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "parchment.config.json";

/// Parchment configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding page documents and `navigation.json`
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Where rendered HTML is written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default)]
    pub render_mode: RenderMode,

    /// Used as the `<title>` of rendered pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
}

fn default_src_dir() -> String {
    "pages".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            pretty: default_pretty(),
            render_mode: RenderMode::default(),
            site_title: None,
        }
    }
}
