use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use vizkit_rules::EditorOptions;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Rule list options used when no flag overrides them.
    #[serde(default)]
    pub editor: EditorOptions,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/vizkit/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("vizkit");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_config_path() {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "No config directory, using defaults");
                    return Ok(Self::with_defaults());
                }
            },
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::with_defaults())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn with_defaults() -> Self {
        Self {
            editor: EditorOptions::default(),
            pretty: default_pretty(),
        }
    }

    /// Editor options for one invocation.
    /// Priority: cli flag > env (`RULES_FIELD`) > config file > built-in default.
    pub fn resolve_editor(
        &self,
        name_override: Option<&str>,
        env_field: &str,
        hide_secondary: bool,
    ) -> EditorOptions {
        let mut options = self.editor.clone();
        if let Some(name) = name_override {
            options.name = name.to_string();
        } else if env_field != EditorOptions::default().name {
            options.name = env_field.to_string();
        }
        if hide_secondary {
            options.hide_secondary = true;
        }
        options
    }
}
