//! Configuration for the token CLI.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LEDGER_DATA_DIR";

/// Name of the ledger file inside the data directory.
pub const STATE_FILE_NAME: &str = "ledger.bin";

/// Configuration for the token CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Path to the persisted ledger
    pub state_file: PathBuf,
    /// Token parameters used by `init` when no flags are given
    pub token: TokenConfig,
}

/// Token parameters for a new ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Display precision
    pub decimals: u8,
    /// Fixed total supply
    pub total_supply: u128,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: default_data_dir().join(STATE_FILE_NAME),
            token: TokenConfig::default(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Cool Token".to_string(),
            symbol: "COOL".to_string(),
            decimals: 18,
            total_supply: 10000,
        }
    }
}

/// Returns `$LEDGER_DATA_DIR`, or `erc20-ledger` under the platform data directory.
pub fn default_data_dir() -> PathBuf {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            dir.push("erc20-ledger");
            dir
        }
    }
}

impl CliConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
