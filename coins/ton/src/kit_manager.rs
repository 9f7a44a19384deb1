//! Owns the TON kit of the active account.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use walletd_traits::{Account, AccountType};

use crate::{TonAddress, TonConfig, TonError, TonKit, TonResult};

/// What a kit is created for
#[derive(Clone, PartialEq, Eq)]
pub enum KitWalletType {
    /// Signing wallet restored from a mnemonic
    Full {
        /// Mnemonic words
        words: Vec<String>,
        /// Optional passphrase
        passphrase: String,
    },
    /// Watch-only wallet
    Watch(TonAddress),
}

impl std::fmt::Debug for KitWalletType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KitWalletType::Full { .. } => f.write_str("Full"),
            KitWalletType::Watch(address) => f.debug_tuple("Watch").field(&address.to_raw()).finish(),
        }
    }
}

impl KitWalletType {
    /// Kit wallet type for an account
    pub fn for_account(account: &Account) -> TonResult<Self> {
        match &account.account_type {
            AccountType::Mnemonic { words, passphrase } => {
                if words.is_empty() {
                    return Err(TonError::MnemonicNoSeed);
                }
                Ok(KitWalletType::Full {
                    words: words.clone(),
                    passphrase: passphrase.clone(),
                })
            }
            AccountType::TonAddress { address } => Ok(KitWalletType::Watch(TonAddress::from_friendly(address)?)),
            AccountType::EvmAddress { .. } => Err(TonError::UnsupportedAccount),
        }
    }
}

/// Creates kits; key derivation and storage live behind this trait
pub trait KitFactory: Send + Sync {
    /// Kit type produced
    type Kit: TonKit + 'static;

    /// Creates a kit for a wallet, connecting to `config.api_url()`
    fn create(&self, wallet_type: KitWalletType, wallet_id: &str, config: &TonConfig) -> TonResult<Arc<Self::Kit>>;
}

struct KitSlot<K> {
    kit: Option<Arc<K>>,
    account: Option<Account>,
    started: bool,
}

impl<K> Default for KitSlot<K> {
    fn default() -> Self {
        Self {
            kit: None,
            account: None,
            started: false,
        }
    }
}

/// Keeps one kit for the current account and follows app lifecycle
pub struct TonKitManager<F: KitFactory> {
    factory: F,
    config: TonConfig,
    slot: Mutex<KitSlot<F::Kit>>,
}

impl<F: KitFactory> TonKitManager<F> {
    /// Creates a manager; `config.network` follows the wallet's test-net switch
    pub fn new(factory: F, config: TonConfig) -> Self {
        Self {
            factory,
            config,
            slot: Mutex::new(KitSlot::default()),
        }
    }

    /// Configuration kits are created with
    pub fn config(&self) -> &TonConfig {
        &self.config
    }

    /// Current kit, if one was created
    pub async fn kit(&self) -> Option<Arc<F::Kit>> {
        self.slot.lock().await.kit.clone()
    }

    /// Kit for `account`, reusing the current one when the account matches
    pub async fn kit_for(&self, account: &Account) -> TonResult<Arc<F::Kit>> {
        let mut slot = self.slot.lock().await;

        if let (Some(kit), Some(current)) = (&slot.kit, &slot.account) {
            if current == account {
                return Ok(kit.clone());
            }
        }

        let wallet_type = KitWalletType::for_account(account)?;
        let kit = self.factory.create(wallet_type, &account.id, &self.config)?;

        if let Some(previous) = slot.kit.take() {
            if slot.started {
                debug!("TonKitManager: stop previous kit");
                previous.stop();
            }
        }

        info!(account = %account.id, network = %self.config.network, "TonKitManager: create and start kit");
        kit.start();

        slot.kit = Some(kit.clone());
        slot.account = Some(account.clone());
        slot.started = true;

        Ok(kit)
    }

    /// Restarts a kit stopped by [`Self::did_enter_background`]
    pub async fn will_enter_foreground(&self) {
        let mut slot = self.slot.lock().await;
        if slot.started {
            return;
        }
        if let Some(kit) = &slot.kit {
            debug!("TonKitManager: start kit");
            kit.start();
            slot.started = true;
        }
    }

    /// Stops the running kit
    pub async fn did_enter_background(&self) {
        let mut slot = self.slot.lock().await;
        if !slot.started {
            return;
        }
        if let Some(kit) = &slot.kit {
            debug!("TonKitManager: stop kit");
            kit.stop();
            slot.started = false;
        }
    }
}
