//! TON network and adapter configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TonError;

/// TON network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TonNetwork {
    /// TON Mainnet
    #[default]
    Mainnet,
    /// TON Testnet
    Testnet,
}

impl TonNetwork {
    /// Returns the default API endpoint
    pub fn api_endpoint(&self) -> &'static str {
        match self {
            TonNetwork::Mainnet => "https://toncenter.com/api/v2/jsonRPC",
            TonNetwork::Testnet => "https://testnet.toncenter.com/api/v2/jsonRPC",
        }
    }

    /// Returns the explorer URL
    pub fn explorer_url(&self) -> &'static str {
        match self {
            TonNetwork::Mainnet => "https://tonscan.org",
            TonNetwork::Testnet => "https://testnet.tonscan.org",
        }
    }

    /// Returns the user-friendly address flag for this network
    pub fn address_flag(&self, bounceable: bool) -> u8 {
        match (self, bounceable) {
            (TonNetwork::Mainnet, true) => 0x11,
            (TonNetwork::Mainnet, false) => 0x51,
            (TonNetwork::Testnet, true) => 0x91,
            (TonNetwork::Testnet, false) => 0xD1,
        }
    }

    /// Check if this is testnet
    pub fn is_testnet(&self) -> bool {
        matches!(self, TonNetwork::Testnet)
    }
}

impl fmt::Display for TonNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TonNetwork::Mainnet => write!(f, "mainnet"),
            TonNetwork::Testnet => write!(f, "testnet"),
        }
    }
}

/// Configuration shared by the TON adapters and the kit manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TonConfig {
    /// Network the kit connects to
    #[serde(default)]
    pub network: TonNetwork,
    /// Whether addresses shown to the user are bounceable
    #[serde(default)]
    pub bounceable_default: bool,
    /// Explorer name shown next to transactions
    #[serde(default = "default_explorer_title")]
    pub explorer_title: String,
    /// Explorer base URL; transaction links are `{explorer_url}/tx/{hash}`
    #[serde(default)]
    pub explorer_url: Option<String>,
    /// API endpoint override; kits use [`TonConfig::api_url`]
    #[serde(default)]
    pub api_endpoint: Option<String>,
    /// Optional API key handed to the kit
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_explorer_title() -> String {
    "tonscan.org".to_string()
}

impl TonConfig {
    /// Mainnet configuration
    pub fn mainnet() -> Self {
        Self {
            network: TonNetwork::Mainnet,
            bounceable_default: false,
            explorer_title: default_explorer_title(),
            explorer_url: None,
            api_endpoint: None,
            api_key: None,
        }
    }

    /// Testnet configuration
    pub fn testnet() -> Self {
        Self {
            network: TonNetwork::Testnet,
            ..Self::mainnet()
        }
    }

    /// Configuration following the wallet's test-net switch
    pub fn for_network(testnet_enabled: bool) -> Self {
        if testnet_enabled {
            Self::testnet()
        } else {
            Self::mainnet()
        }
    }

    /// Parses a JSON configuration; missing fields take mainnet defaults
    pub fn from_json(json: &str) -> Result<Self, TonError> {
        serde_json::from_str(json).map_err(|e| TonError::Config(e.to_string()))
    }

    /// Endpoint kits connect to, falling back to the network's default
    pub fn api_url(&self) -> &str {
        self.api_endpoint
            .as_deref()
            .unwrap_or_else(|| self.network.api_endpoint())
    }

    /// Explorer base URL, falling back to the network's explorer
    pub fn explorer_base_url(&self) -> &str {
        self.explorer_url
            .as_deref()
            .unwrap_or_else(|| self.network.explorer_url())
    }

    /// Explorer link for a transaction hash
    pub fn transaction_url(&self, transaction_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_base_url().trim_end_matches('/'), transaction_hash)
    }
}

impl Default for TonConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}
