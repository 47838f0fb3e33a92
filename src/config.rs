use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::cli::Cli;
use crate::error::NetworkError;
use crate::games::hangman::{Difficulty, Language};
use crate::random::{RandomSource, SystemRandom};
use crate::services::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::words::{Dictionary, LocalWords, RaeClient};

pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "ahorcado.log";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub language: Language,
    pub difficulty: Option<Difficulty>,
    pub api_url: String,
    pub timeout: Duration,
    pub offline: bool,
    pub seed: Option<u64>,
    pub data_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub mute: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.timeout_ms == 0 {
            bail!("--timeout-ms must be greater than zero");
        }
        if !cli.api_url.starts_with("http://") && !cli.api_url.starts_with("https://") {
            bail!("--api-url must be an http(s) URL, got '{}'", cli.api_url);
        }

        Ok(Self {
            language: cli.lang,
            difficulty: cli.difficulty,
            api_url: cli.api_url.clone(),
            timeout: Duration::from_millis(cli.timeout_ms),
            offline: cli.offline,
            seed: cli.seed,
            data_dir: cli.data_dir.clone().or_else(default_data_dir),
            log_file: cli.log_file.clone(),
            mute: cli.mute,
        })
    }

    pub fn settings_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(SETTINGS_FILE))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| self.data_dir.as_ref().map(|dir| dir.join(LOG_FILE)))
    }

    /// The settings file, or an in-memory store when there is no data directory.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        match self.settings_path() {
            Some(path) => Arc::new(FileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        }
    }

    pub fn dictionary(&self) -> Result<Dictionary, NetworkError> {
        let local = LocalWords::default();
        if self.offline {
            return Ok(Dictionary::offline(local));
        }
        Ok(Dictionary::new(self.client()?, local))
    }

    pub fn client(&self) -> Result<RaeClient, NetworkError> {
        RaeClient::new(self.api_url.clone(), self.timeout)
    }

    pub fn rng(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(SystemRandom::seeded(seed)),
            None => Box::new(SystemRandom::new()),
        }
    }
}

/// `$XDG_CONFIG_HOME/ahorcado`, else `$HOME/.config/ahorcado`.
pub fn default_data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir).join("ahorcado"));
    }
    std::env::var_os("HOME")
        .filter(|d| !d.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join("ahorcado"))
}
