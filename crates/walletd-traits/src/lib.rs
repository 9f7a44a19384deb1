//! # WalletD Traits
//!
//! Chain-agnostic wallet abstractions shared by the WalletD chain adapters.
//! A chain crate translates its SDK's account and transaction model into the
//! types defined here, and exposes itself through the adapter traits.
//!
//! ## Core Types
//!
//! - [`Token`] / [`TokenType`] - a fungible asset on some blockchain
//! - [`TransactionValue`] - a signed decimal amount of a token
//! - [`TransactionSource`] - where a transaction record came from
//! - [`AdapterState`] / [`BalanceData`] - adapter sync and balance snapshots
//!
//! ## Adapter Traits
//!
//! - [`Adapter`] - lifecycle (start, stop, refresh)
//! - [`BalanceAdapter`] - balance and sync state
//! - [`DepositAdapter`] - receive address
//! - [`SendAdapter`] - fee estimation and sending
//! - [`TransactionsAdapter`] - paged transaction history
//! - [`Reachability`] - network reachability collaborator
//!
//! ## Example
//!
//! ```ignore
//! use walletd_traits::prelude::*;
//!
//! async fn available<A: BalanceAdapter>(adapter: &A) -> WalletResult<BigDecimal> {
//!     Ok(adapter.balance_data().await?.available)
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Blockchains known to the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockchainType {
    /// Bitcoin
    Bitcoin,
    /// Ethereum
    Ethereum,
    /// Solana
    Solana,
    /// TON (The Open Network)
    Ton,
}

impl BlockchainType {
    /// Stable identifier used in token queries and storage
    pub fn uid(&self) -> &'static str {
        match self {
            BlockchainType::Bitcoin => "bitcoin",
            BlockchainType::Ethereum => "ethereum",
            BlockchainType::Solana => "solana",
            BlockchainType::Ton => "the-open-network",
        }
    }
}

impl fmt::Display for BlockchainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uid())
    }
}

/// Market coin a token belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Unique coin id (e.g. "the-open-network", "tether")
    pub uid: String,
    /// Display name
    pub name: String,
    /// Ticker code (e.g. "TON", "USDT")
    pub code: String,
    /// Optional icon URL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Coin {
    /// Creates a coin without an icon
    pub fn new(uid: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            code: code.into(),
            image_url: None,
        }
    }
}

/// How a token lives on its blockchain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenType {
    /// The chain's native coin
    Native,
    /// ERC-20 style contract token
    Eip20 {
        /// Contract address
        address: String,
    },
    /// Solana SPL token
    Spl {
        /// Mint address
        address: String,
    },
    /// TON jetton
    Jetton {
        /// Jetton master address (user-friendly form)
        address: String,
    },
    /// Anything the wallet does not know how to handle
    Unsupported {
        /// Token standard name
        kind: String,
        /// Optional reference (address, id)
        reference: Option<String>,
    },
}

impl TokenType {
    /// Contract-style address, absent for the native coin
    pub fn address(&self) -> Option<&str> {
        match self {
            TokenType::Native => None,
            TokenType::Eip20 { address }
            | TokenType::Spl { address }
            | TokenType::Jetton { address } => Some(address),
            TokenType::Unsupported { reference, .. } => reference.as_deref(),
        }
    }

    /// Checks if this is the chain's native coin
    pub fn is_native(&self) -> bool {
        matches!(self, TokenType::Native)
    }
}

/// A fungible asset on a specific blockchain. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Coin this token represents
    pub coin: Coin,
    /// Blockchain the token lives on
    pub blockchain_type: BlockchainType,
    /// Native coin or contract token
    pub token_type: TokenType,
    /// Number of fractional decimal places
    pub decimals: u8,
}

impl Token {
    /// Creates a new token
    pub fn new(coin: Coin, blockchain_type: BlockchainType, token_type: TokenType, decimals: u8) -> Self {
        Self {
            coin,
            blockchain_type,
            token_type,
            decimals,
        }
    }

    /// Ticker code of the underlying coin
    pub fn code(&self) -> &str {
        &self.coin.code
    }
}

/// Kind of account a wallet is attached to
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountType {
    /// Full account restored from a mnemonic
    Mnemonic {
        /// Mnemonic words
        words: Vec<String>,
        /// Optional passphrase, empty when unused
        #[serde(default)]
        passphrase: String,
    },
    /// Watch-only TON account
    TonAddress {
        /// Watched address, user-friendly or raw form
        address: String,
    },
    /// Watch-only EVM account
    EvmAddress {
        /// Watched address
        address: String,
    },
}

impl fmt::Debug for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Mnemonic { words, .. } => f
                .debug_struct("Mnemonic")
                .field("words", &words.len())
                .finish_non_exhaustive(),
            AccountType::TonAddress { address } => f.debug_struct("TonAddress").field("address", address).finish(),
            AccountType::EvmAddress { address } => f.debug_struct("EvmAddress").field("address", address).finish(),
        }
    }
}

/// A user account. Two accounts are the same account when their ids match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account id
    pub id: String,
    /// Display name
    pub name: String,
    /// Account kind and key material
    pub account_type: AccountType,
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

/// Identifies the producer of a transaction record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionSource {
    /// Blockchain the record belongs to
    pub blockchain_type: BlockchainType,
    /// Optional adapter-specific discriminator
    #[serde(default)]
    pub meta: Option<String>,
}

impl TransactionSource {
    /// Source with no meta
    pub fn new(blockchain_type: BlockchainType) -> Self {
        Self {
            blockchain_type,
            meta: None,
        }
    }
}

/// A token enabled in an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Token held by this wallet
    pub token: Token,
    /// Owning account
    pub account: Account,
}

impl Wallet {
    /// Creates a wallet entry
    pub fn new(token: Token, account: Account) -> Self {
        Self { token, account }
    }

    /// Coin of the wallet's token
    pub fn coin(&self) -> &Coin {
        &self.token.coin
    }

    /// Transaction source for records produced by this wallet
    pub fn transaction_source(&self) -> TransactionSource {
        TransactionSource::new(self.token.blockchain_type)
    }
}

/// A signed decimal amount of a specific token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionValue {
    /// Amount of a known token
    CoinValue {
        /// Token the amount is denominated in
        token: Token,
        /// Decimal amount, negative for debits
        value: BigDecimal,
    },
}

impl TransactionValue {
    /// Creates a coin value
    pub fn coin_value(token: Token, value: BigDecimal) -> Self {
        TransactionValue::CoinValue { token, value }
    }

    /// Token the value is denominated in
    pub fn token(&self) -> &Token {
        match self {
            TransactionValue::CoinValue { token, .. } => token,
        }
    }

    /// Decimal amount
    pub fn decimal_value(&self) -> &BigDecimal {
        match self {
            TransactionValue::CoinValue { value, .. } => value,
        }
    }

    /// Checks if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.decimal_value().is_zero()
    }
}

impl fmt::Display for TransactionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionValue::CoinValue { token, value } => write!(f, "{} {}", value, token.code()),
        }
    }
}

/// Transaction list filter selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionTypeFilter {
    /// Everything
    #[default]
    All,
    /// Incoming transfers
    Incoming,
    /// Outgoing transfers
    Outgoing,
    /// Swaps
    Swap,
    /// Approvals
    Approve,
}

/// Sync state of an adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdapterState {
    /// Up to date
    Synced,
    /// Sync in progress
    Syncing {
        /// Progress percent, when known
        progress: Option<u8>,
        /// Unix timestamp of the last synced block, when known
        last_block_date: Option<u64>,
    },
    /// Sync failed
    NotSynced {
        /// Failure description
        error: String,
    },
}

impl AdapterState {
    /// Checks if a sync is in progress
    pub fn is_syncing(&self) -> bool {
        matches!(self, AdapterState::Syncing { .. })
    }
}

/// Balance snapshot of an adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceData {
    /// Spendable amount
    pub available: BigDecimal,
}

impl BalanceData {
    /// Creates a balance snapshot
    pub fn new(available: BigDecimal) -> Self {
        Self { available }
    }
}

impl Default for BalanceData {
    fn default() -> Self {
        Self::new(BigDecimal::zero())
    }
}

/// Common wallet errors
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid amount for the token
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Transaction failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Network/RPC error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Key/signing error
    #[error("Key error: {0}")]
    KeyError(String),

    /// Wallet not synced
    #[error("Wallet not synced")]
    NotSynced,

    /// Feature not supported
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

/// Network reachability, passed to adapters that only start syncing when online
pub trait Reachability: Send + Sync {
    /// Checks if the network is currently reachable
    fn is_reachable(&self) -> bool;
}

/// Adapter lifecycle
pub trait Adapter: Send + Sync {
    /// Starts the adapter
    fn start(&self);

    /// Stops the adapter
    fn stop(&self);

    /// Requests a fresh sync
    fn refresh(&self);

    /// Checks if the adapter talks to mainnet
    fn is_main_net(&self) -> bool;
}

/// Adapters exposing a balance
#[async_trait]
pub trait BalanceAdapter: Send + Sync {
    /// Current sync state
    async fn balance_state(&self) -> AdapterState;

    /// Current balance
    async fn balance_data(&self) -> WalletResult<BalanceData>;
}

/// Adapters exposing a receive address
pub trait DepositAdapter: Send + Sync {
    /// Address to receive funds on
    fn receive_address(&self) -> String;
}

/// Adapters able to send funds
#[async_trait]
pub trait SendAdapter: Send + Sync {
    /// Spendable balance
    async fn available_balance(&self) -> WalletResult<BigDecimal>;

    /// Validates a recipient address
    fn validate(&self, address: &str) -> WalletResult<()>;

    /// Estimates the fee of a transfer, in the fee token
    async fn estimate_fee(&self, recipient: &str, amount: &BigDecimal, memo: Option<&str>) -> WalletResult<BigDecimal>;

    /// Sends a transfer
    async fn send(&self, recipient: &str, amount: &BigDecimal, memo: Option<&str>) -> WalletResult<()>;
}

/// Adapters exposing transaction history
#[async_trait]
pub trait TransactionsAdapter: Send + Sync {
    /// Record type produced by this adapter
    type Record: Send + Sync;

    /// Whether a sync is running
    async fn syncing(&self) -> bool;

    /// Human readable explorer name
    fn explorer_title(&self) -> &str;

    /// Explorer link for a transaction
    fn explorer_url(&self, transaction_hash: &str) -> Option<String>;

    /// Loads up to `limit` records older than `from`, newest first
    async fn transactions(
        &self,
        from: Option<&Self::Record>,
        token: Option<&Token>,
        filter: TransactionTypeFilter,
        address: Option<&str>,
        limit: usize,
    ) -> WalletResult<Vec<Self::Record>>;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Account, AccountType, Adapter, AdapterState, BalanceAdapter, BalanceData, BlockchainType, Coin,
        DepositAdapter, Reachability, SendAdapter, Token, TokenType, TransactionSource, TransactionTypeFilter,
        TransactionValue, TransactionsAdapter, Wallet, WalletError, WalletResult,
    };
    pub use bigdecimal::BigDecimal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn jetton() -> Token {
        Token::new(
            Coin::new("tether", "Tether USD", "USDT"),
            BlockchainType::Ton,
            TokenType::Jetton {
                address: "EQCxE6mUtQJKFnGfaROTKOt1lZbDiiX1kCixRv7Nw2Id_sDs".to_string(),
            },
            6,
        )
    }

    fn account(id: &str) -> Account {
        Account {
            id: id.to_string(),
            name: "Main".to_string(),
            account_type: AccountType::TonAddress {
                address: "EQ...".to_string(),
            },
        }
    }

    // ============================================================================
    // Token Tests
    // ============================================================================

    #[test]
    fn test_token_address() {
        let token = jetton();
        assert_eq!(token.token_type.address(), Some("EQCxE6mUtQJKFnGfaROTKOt1lZbDiiX1kCixRv7Nw2Id_sDs"));
        assert!(!token.token_type.is_native());
        assert_eq!(TokenType::Native.address(), None);
        assert_eq!(token.code(), "USDT");
    }

    #[test]
    fn test_blockchain_uid() {
        assert_eq!(BlockchainType::Ton.uid(), "the-open-network");
        assert_eq!(BlockchainType::Ton.to_string(), "the-open-network");
    }

    // ============================================================================
    // Account Tests
    // ============================================================================

    #[test]
    fn test_account_equality_by_id() {
        let mut other = account("a1");
        other.name = "Renamed".to_string();
        assert_eq!(account("a1"), other);
        assert_ne!(account("a1"), account("a2"));
    }

    #[test]
    fn test_mnemonic_debug_hides_words() {
        let account_type = AccountType::Mnemonic {
            words: vec!["abandon".to_string(); 24],
            passphrase: String::new(),
        };
        let debug = format!("{:?}", account_type);
        assert!(!debug.contains("abandon"));
        assert!(debug.contains("24"));
    }

    #[test]
    fn test_wallet_transaction_source() {
        let wallet = Wallet::new(jetton(), account("a1"));
        assert_eq!(wallet.transaction_source(), TransactionSource::new(BlockchainType::Ton));
        assert_eq!(wallet.coin().code, "USDT");
    }

    // ============================================================================
    // TransactionValue Tests
    // ============================================================================

    #[test]
    fn test_transaction_value() {
        let value = TransactionValue::coin_value(jetton(), BigDecimal::from_str("-1.50").unwrap());
        assert_eq!(value.decimal_value(), &BigDecimal::from_str("-1.5").unwrap());
        assert!(!value.is_zero());
        assert_eq!(value.token().decimals, 6);
        assert!(value.to_string().ends_with("USDT"));
    }

    #[test]
    fn test_zero_value() {
        let value = TransactionValue::coin_value(jetton(), BigDecimal::zero());
        assert!(value.is_zero());
    }

    // ============================================================================
    // State Tests
    // ============================================================================

    #[test]
    fn test_adapter_state_syncing() {
        let syncing = AdapterState::Syncing {
            progress: None,
            last_block_date: None,
        };
        assert!(syncing.is_syncing());
        assert!(!AdapterState::Synced.is_syncing());
    }

    #[test]
    fn test_balance_data_default() {
        assert!(BalanceData::default().available.is_zero());
    }

    #[test]
    fn test_filter_default() {
        assert_eq!(TransactionTypeFilter::default(), TransactionTypeFilter::All);
    }

    // ============================================================================
    // WalletError Tests
    // ============================================================================

    #[test]
    fn test_wallet_error_display() {
        let err = WalletError::InvalidAddress("bad address".to_string());
        assert!(err.to_string().contains("Invalid address"));
        assert!(err.to_string().contains("bad address"));
    }

    #[test]
    fn test_wallet_error_not_synced() {
        let err = WalletError::NotSynced;
        assert!(err.to_string().contains("not synced"));
    }

    // ============================================================================
    // Serialization Tests
    // ============================================================================

    #[test]
    fn test_token_serialization() {
        let token = jetton();
        let json = serde_json::to_string(&token).unwrap();
        let deserialized: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(token, deserialized);
    }

    #[test]
    fn test_adapter_state_serialization() {
        let state = AdapterState::NotSynced {
            error: "timeout".to_string(),
        };
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: AdapterState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
