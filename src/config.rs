//! Configuration for the responder and its gateway.

use crate::error::{BotError, Result};
use crate::faq::DEFAULT_MAX_DISTANCE;
use crate::memory::transcript::DEFAULT_MAX_ENTRIES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Where facts and the FAQ catalog live.
    pub storage: StorageConfig,
    /// Short-term transcript settings.
    pub transcript: TranscriptConfig,
    /// FAQ matching settings.
    pub faq: FaqConfig,
    /// Reply text settings.
    pub replies: RepliesConfig,
    /// HTTP webhook gateway settings.
    pub gateway: GatewayConfig,
}

/// Storage locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory for persisted data.
    pub data_dir: PathBuf,
    /// Fact store file (defaults to `<data_dir>/facts.json`).
    pub facts_file: Option<PathBuf>,
    /// FAQ catalog file (defaults to `<data_dir>/faq.json`).
    pub faq_file: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: crate::bot_dirs::data_dir(),
            facts_file: None,
            faq_file: None,
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn facts_path(&self) -> PathBuf {
        self.facts_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("facts.json"))
    }

    #[must_use]
    pub fn faq_path(&self) -> PathBuf {
        self.faq_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("faq.json"))
    }
}

/// Short-term transcript configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Maximum number of turns kept (user and bot turns count separately).
    pub max_entries: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// FAQ matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqConfig {
    /// Largest edit distance still accepted as a fuzzy match.
    pub max_distance: usize,
    /// Extra misspelling → question corrections, merged over the built-ins.
    pub typos: BTreeMap<String, String>,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            typos: BTreeMap::new(),
        }
    }
}

/// Reply text configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepliesConfig {
    /// Line appended to the fallback echo reply. Empty disables it.
    pub signature: String,
}

impl Default for RepliesConfig {
    fn default() -> Self {
        Self {
            signature: "I am your always-on memory bot 🚀".to_owned(),
        }
    }
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address (all interfaces by default).
    pub host: String,
    /// Bind port. The `PORT` environment variable takes precedence.
    pub port: u16,
    /// Bearer token required on `/message` when set.
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            bearer_token: None,
        }
    }
}

impl GatewayConfig {
    /// Port after applying the `PORT` override; unparsable values are ignored.
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(self.port)
    }
}

impl BotConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BotError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| BotError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        crate::bot_dirs::config_file()
    }

    /// Load `explicit` if given (it must exist), otherwise the default config
    /// file when present, otherwise built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file exists but cannot be read or parsed,
    /// or if an explicit path does not exist.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let path = Self::default_config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}
