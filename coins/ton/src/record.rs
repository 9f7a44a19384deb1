//! Wallet-side transaction records built from TON account events.

use serde::Serialize;
use walletd_traits::{Token, TransactionSource, TransactionValue};

use crate::AccountEvent;

/// One leg of a jetton transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    /// Counterparty address, user-friendly form
    pub address: String,
    /// Signed value, negative for debits
    pub value: TransactionValue,
}

/// Variant-specific payload of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TonRecordKind {
    /// Native coins received
    NativeIncoming {
        /// Received token
        token: Token,
    },
    /// Native coins sent
    NativeOutgoing {
        /// Sent token
        token: Token,
        /// Sender and recipient are the same wallet
        sent_to_self: bool,
    },
    /// Jettons received
    JettonIncoming {
        /// The received transfer, absent when no action names a recipient
        transfer: Option<Transfer>,
    },
    /// Jettons sent
    JettonOutgoing {
        /// Every transfer leg that names a recipient
        transfers: Vec<Transfer>,
        /// Sum of the legs, zero when there are none
        total_value: TransactionValue,
        /// Sender and recipient are the same wallet
        sent_to_self: bool,
    },
    /// Anything else
    Generic,
}

/// A classified TON transaction. Built once per event, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TonTransactionRecord {
    source: TransactionSource,
    event: AccountEvent,
    fee_token: Token,
    kind: TonRecordKind,
}

impl TonTransactionRecord {
    /// Assembles a record
    pub fn new(source: TransactionSource, event: AccountEvent, fee_token: Token, kind: TonRecordKind) -> Self {
        Self {
            source,
            event,
            fee_token,
            kind,
        }
    }

    /// Producer of the record
    pub fn source(&self) -> &TransactionSource {
        &self.source
    }

    /// Originating event
    pub fn event(&self) -> &AccountEvent {
        &self.event
    }

    /// Token fees are paid in
    pub fn fee_token(&self) -> &Token {
        &self.fee_token
    }

    /// Variant payload
    pub fn kind(&self) -> &TonRecordKind {
        &self.kind
    }

    /// Event id
    pub fn transaction_hash(&self) -> &str {
        &self.event.event_id
    }

    /// Logical time, the paging cursor
    pub fn lt(&self) -> u64 {
        self.event.lt
    }

    /// Unix timestamp
    pub fn timestamp(&self) -> i64 {
        self.event.timestamp
    }

    /// Still pending
    pub fn in_progress(&self) -> bool {
        self.event.in_progress
    }

    /// Flagged as scam
    pub fn spam(&self) -> bool {
        self.event.is_scam
    }

    /// Whether the wallet sent to itself; false for non-outgoing records
    pub fn sent_to_self(&self) -> bool {
        match &self.kind {
            TonRecordKind::NativeOutgoing { sent_to_self, .. } | TonRecordKind::JettonOutgoing { sent_to_self, .. } => {
                *sent_to_self
            }
            TonRecordKind::NativeIncoming { .. } | TonRecordKind::JettonIncoming { .. } | TonRecordKind::Generic => false,
        }
    }

    /// The single value the record presents
    pub fn main_value(&self) -> Option<&TransactionValue> {
        match &self.kind {
            TonRecordKind::JettonIncoming { transfer } => transfer.as_ref().map(|t| &t.value),
            TonRecordKind::JettonOutgoing { total_value, .. } => Some(total_value),
            TonRecordKind::NativeIncoming { .. } | TonRecordKind::NativeOutgoing { .. } | TonRecordKind::Generic => None,
        }
    }
}
