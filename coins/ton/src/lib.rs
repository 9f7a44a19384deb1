//! # WalletD TON
//!
//! TON (The Open Network) integration layer for the WalletD SDK.
//!
//! The TON SDK (event fetching, jetton discovery, fee estimation, sync) is
//! consumed through the [`TonKit`] trait; this crate translates its account and
//! transaction model into the wallet abstractions from `walletd-traits`.
//!
//! ## Features
//!
//! - Exact amount normalization between on-chain integers and decimals
//! - Classification of decorated account events into transaction records
//! - Transaction tag queries for native and jetton history
//! - Jetton balance/send adapter and base-coin transactions adapter
//! - Kit lifecycle management per account
//! - User-friendly address encoding (base64 with flags and checksum)
//!
//! ## Example
//!
//! ```rust
//! use walletd_ton::amount;
//! use num_bigint::BigUint;
//!
//! let value = amount::to_decimal(&BigUint::from(1_500_000u32), 6);
//! assert_eq!(value.to_string(), "1.500000");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod amount;
pub mod config;
pub mod converter;
pub mod jetton_adapter;
pub mod kit;
pub mod kit_manager;
pub mod record;
pub mod tag_query;
pub mod transactions_adapter;

pub use address::TonAddress;
pub use config::{TonConfig, TonNetwork};
pub use converter::{classify, classify_jetton, JettonTransactionConverter, TonTransactionConverter};
pub use jetton_adapter::JettonAdapter;
pub use kit::{AccountAddress, AccountEvent, Action, Decoration, Jetton, JettonTransfer, SyncState, TonKit};
pub use kit_manager::{KitFactory, KitWalletType, TonKitManager};
pub use record::{TonRecordKind, TonTransactionRecord, Transfer};
pub use tag_query::{TagProtocol, TagType, TransactionTagQuery};
pub use transactions_adapter::TonTransactionsAdapter;

use thiserror::Error;

// Re-export traits
pub use walletd_traits::WalletError;

/// Result type for TON operations
pub type TonResult<T> = Result<T, TonError>;

/// TON-specific errors
#[derive(Error, Debug)]
pub enum TonError {
    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Adapter built for a token that is not a jetton
    #[error("Wrong token type: expected a jetton")]
    WrongTokenType,

    /// Jetton address of the token does not parse
    #[error("Wrong jetton address: {0}")]
    WrongJettonAddress(String),

    /// Jetton is not known to the kit
    #[error("Can't create jetton {0}")]
    CantCreateJetton(String),

    /// Account kind has no TON kit
    #[error("Unsupported account")]
    UnsupportedAccount,

    /// Mnemonic account without seed material
    #[error("Mnemonic account has no seed")]
    MnemonicNoSeed,

    /// Decimal amount not representable in the token's on-chain units
    #[error("Invalid amount {amount} for {decimals} decimals")]
    InvalidAmount {
        /// Offending decimal amount
        amount: String,
        /// Token decimals
        decimals: u8,
    },

    /// Failure reported by the TON kit
    #[error("Kit error: {0}")]
    Kit(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<TonError> for WalletError {
    fn from(e: TonError) -> Self {
        match e {
            TonError::InvalidAddress(address) => WalletError::InvalidAddress(address),
            TonError::InvalidAmount { .. } => WalletError::InvalidAmount(e.to_string()),
            TonError::Kit(message) => WalletError::NetworkError(message),
            TonError::UnsupportedAccount => WalletError::NotSupported(e.to_string()),
            other => WalletError::Other(other.to_string()),
        }
    }
}
