use crate::error::{CalcError, CalcResult};
use crate::CONFIG_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Title shown in the main menu banner
    pub title: String,
    /// Prompt used when asking for a menu choice
    pub choice_prompt: String,
    /// Clear the terminal before drawing each menu
    pub clear_screen: bool,
    /// Wait for Enter after showing a result or the history
    pub pause_after_result: bool,
    /// Colourize results and errors
    pub color: bool,
    /// Print the welcome and goodbye lines
    pub greeting: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub config_dir: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "🧮 SCIENTIFIC CALCULATOR".to_string(),
            choice_prompt: "Enter choice: ".to_string(),
            clear_screen: true,
            pause_after_result: true,
            color: true,
            greeting: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scicalc")
}

/// Expand `~` and environment variables in a user-supplied path.
pub fn expand_path(path: &Path) -> CalcResult<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .map_err(|e| CalcError::config(format!("Cannot expand {}: {}", raw, e)))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

impl Config {
    /// Load configuration from file or fall back to defaults
    pub async fn load(config_path: Option<&Path>) -> CalcResult<Self> {
        let config_file = match config_path {
            Some(path) => expand_path(path)?,
            None => default_config_dir().join(CONFIG_FILE),
        };

        if config_file.exists() {
            log::debug!("Loading configuration from {}", config_file.display());
            let content = fs::read_to_string(&config_file).await?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CalcError::config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else if config_path.is_some() {
            Err(CalcError::config(format!(
                "Configuration file not found: {}",
                config_file.display()
            )))
        } else {
            log::debug!("No configuration file, using defaults");
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub async fn save(&self, config_path: Option<&Path>) -> CalcResult<()> {
        let config_file = match config_path {
            Some(path) => expand_path(path)?,
            None => self.config_file(),
        };

        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CalcError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_file, content).await?;
        Ok(())
    }

    /// Write the default config file unless one already exists
    pub async fn init(&self, force: bool) -> CalcResult<PathBuf> {
        let config_file = self.config_file();

        if config_file.exists() && !force {
            return Err(CalcError::config(
                "Configuration file already exists. Use --force to overwrite.",
            ));
        }

        self.save(Some(&config_file)).await?;
        Ok(config_file)
    }

    /// Path of the config file inside the config directory
    pub fn config_file(&self) -> PathBuf {
        self.paths.config_dir.join(CONFIG_FILE)
    }
}
