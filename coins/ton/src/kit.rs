//! Data produced by the TON kit and the kit interface itself.
//!
//! Everything here is owned by the kit: the adapters only read events,
//! actions and decorations, and drive the kit through [`TonKit`].

use async_trait::async_trait;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::tag_query::TransactionTagQuery;
use crate::{TonAddress, TonError};

/// Account reference attached to actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAddress {
    /// Account address
    pub address: TonAddress,
    /// Known name (DNS or label)
    #[serde(default)]
    pub name: Option<String>,
    /// Flagged as scam by the indexer
    #[serde(default)]
    pub is_scam: bool,
    /// Whether the account is a wallet contract
    #[serde(default)]
    pub is_wallet: bool,
}

impl AccountAddress {
    /// Plain wallet account without metadata
    pub fn new(address: TonAddress) -> Self {
        Self {
            address,
            name: None,
            is_scam: false,
            is_wallet: true,
        }
    }
}

/// Jetton master metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jetton {
    /// Jetton master address
    pub address: TonAddress,
    /// Display name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Fractional decimal places
    pub decimals: u8,
    /// Optional icon URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Jetton transfer action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JettonTransfer {
    /// Sender, absent for mints
    #[serde(default)]
    pub sender: Option<AccountAddress>,
    /// Recipient, absent for burns
    #[serde(default)]
    pub recipient: Option<AccountAddress>,
    /// Raw amount in the jetton's smallest unit
    #[serde(with = "biguint_string")]
    pub amount: BigUint,
    /// Transferred jetton
    pub jetton: Jetton,
    /// Attached text comment
    #[serde(default)]
    pub comment: Option<String>,
}

/// One action inside an account event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Native coin transfer
    TonTransfer {
        /// Sender
        sender: AccountAddress,
        /// Recipient
        recipient: AccountAddress,
        /// Raw amount in nanotons
        #[serde(with = "biguint_string")]
        amount: BigUint,
        /// Attached text comment
        #[serde(default)]
        comment: Option<String>,
    },
    /// Jetton transfer
    JettonTransfer(JettonTransfer),
    /// Smart contract call
    SmartContract {
        /// Called contract
        contract: AccountAddress,
        /// Native coins attached to the call
        #[serde(with = "biguint_string")]
        ton_attached: BigUint,
        /// Operation name
        operation: String,
    },
    /// Anything the kit does not model
    #[serde(other)]
    Unknown,
}

impl Action {
    /// The jetton transfer carried by this action, if any
    pub fn as_jetton_transfer(&self) -> Option<&JettonTransfer> {
        match self {
            Action::JettonTransfer(transfer) => Some(transfer),
            _ => None,
        }
    }
}

/// Semantic shape the kit assigned to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decoration {
    /// Native coins received
    IncomingNative,
    /// Native coins sent
    OutgoingNative {
        /// Sender and recipient are the same wallet
        #[serde(default)]
        sent_to_self: bool,
    },
    /// Jettons received
    IncomingJetton,
    /// Jettons sent
    OutgoingJetton {
        /// Sender and recipient are the same wallet
        #[serde(default)]
        sent_to_self: bool,
    },
    /// Unrecognized shape, including tags newer than this crate
    #[default]
    #[serde(other)]
    Unknown,
}

/// One on-chain event of the wallet's account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEvent {
    /// Event id, used as the transaction hash
    pub event_id: String,
    /// Logical time, used for paging
    pub lt: u64,
    /// Unix timestamp
    pub timestamp: i64,
    /// Flagged as scam by the indexer
    #[serde(default)]
    pub is_scam: bool,
    /// Still pending
    #[serde(default)]
    pub in_progress: bool,
    /// Actions in execution order
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Semantic shape of the event
    #[serde(default)]
    pub decoration: Decoration,
}

impl AccountEvent {
    /// Jetton transfer actions in order
    pub fn jetton_transfers(&self) -> impl Iterator<Item = &JettonTransfer> {
        self.actions.iter().filter_map(Action::as_jetton_transfer)
    }
}

/// Kit sync state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// Sync in progress
    Syncing,
    /// Up to date
    Synced,
    /// Sync failed
    NotSynced(String),
}

/// The TON kit: account sync, history, jettons, fees and sending.
#[async_trait]
pub trait TonKit: Send + Sync {
    /// Address of the wallet contract
    fn address(&self) -> TonAddress;

    /// Address to receive funds on
    fn receive_address(&self) -> TonAddress;

    /// Current sync state
    fn sync_state(&self) -> SyncState;

    /// Raw balance of a jetton
    async fn jetton_balance(&self, jetton: &TonAddress) -> Result<BigUint, TonError>;

    /// Jettons held by the wallet
    async fn jettons(&self) -> Result<Vec<Jetton>, TonError>;

    /// Events matching any of the tag queries, older than `before_lt`, newest first
    async fn transactions(
        &self,
        tag_queries: &[TransactionTagQuery],
        before_lt: Option<u64>,
        limit: usize,
    ) -> Result<Vec<AccountEvent>, TonError>;

    /// Raw fee, in nanotons, of a jetton transfer
    async fn estimate_fee(
        &self,
        recipient: &str,
        jetton: &Jetton,
        amount: &BigUint,
        comment: Option<&str>,
    ) -> Result<BigUint, TonError>;

    /// Sends a jetton transfer
    async fn send(&self, recipient: &str, jetton: &Jetton, amount: &BigUint, comment: Option<&str>) -> Result<(), TonError>;

    /// Starts syncing
    fn start(&self);

    /// Stops syncing
    fn stop(&self);

    /// Requests a fresh sync
    fn refresh(&self);
}

/// Big integers travel as decimal strings in kit JSON
mod biguint_string {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| de::Error::custom(format!("invalid integer amount: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(byte: u8) -> String {
        TonAddress::new(0, [byte; 32]).to_raw()
    }

    #[test]
    fn test_event_from_json() {
        let json = format!(
            r#"{{
                "event_id": "e1",
                "lt": 42,
                "timestamp": 1700000000,
                "actions": [
                    {{"type": "ton_transfer", "sender": {{"address": "{a}"}}, "recipient": {{"address": "{b}"}}, "amount": "1000"}},
                    {{"type": "jetton_transfer", "recipient": {{"address": "{b}"}}, "amount": "250",
                      "jetton": {{"address": "{c}", "name": "Tether USD", "symbol": "USDT", "decimals": 6}}}},
                    {{"type": "nft_item_transfer"}}
                ],
                "decoration": {{"type": "outgoing_jetton", "sent_to_self": true}}
            }}"#,
            a = raw(1),
            b = raw(2),
            c = raw(3)
        );

        let event: AccountEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.lt, 42);
        assert_eq!(event.actions.len(), 3);
        assert_eq!(event.actions[2], Action::Unknown);
        assert_eq!(event.decoration, Decoration::OutgoingJetton { sent_to_self: true });

        let transfers: Vec<_> = event.jetton_transfers().collect();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].amount, BigUint::from(250u32));
        assert!(transfers[0].sender.is_none());
    }

    #[test]
    fn test_unknown_decoration_tag() {
        let decoration: Decoration = serde_json::from_str(r#"{"type": "swap"}"#).unwrap();
        assert_eq!(decoration, Decoration::Unknown);
    }

    #[test]
    fn test_missing_decoration_defaults_to_unknown() {
        let event: AccountEvent = serde_json::from_str(r#"{"event_id": "e", "lt": 1, "timestamp": 0}"#).unwrap();
        assert_eq!(event.decoration, Decoration::Unknown);
        assert!(event.actions.is_empty());
    }

    #[test]
    fn test_amount_must_be_integer_string() {
        let json = format!(
            r#"{{"type": "ton_transfer", "sender": {{"address": "{a}"}}, "recipient": {{"address": "{a}"}}, "amount": "1.5"}}"#,
            a = raw(1)
        );
        assert!(serde_json::from_str::<Action>(&json).is_err());
    }

    #[test]
    fn test_amount_roundtrips_as_string() {
        let action = Action::SmartContract {
            contract: AccountAddress::new(TonAddress::new(0, [9; 32])),
            ton_attached: BigUint::from(10u32).pow(30),
            operation: "mint".to_string(),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"1000000000000000000000000000000\""));
        assert_eq!(serde_json::from_str::<Action>(&json).unwrap(), action);
    }
}
