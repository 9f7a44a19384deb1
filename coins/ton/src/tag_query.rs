//! Transaction tag queries handed to the kit when loading history.

use serde::{Deserialize, Serialize};
use walletd_traits::{Token, TokenType, TransactionTypeFilter};

use crate::TonAddress;

/// Direction or kind tag of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagType {
    /// Received funds
    Incoming,
    /// Sent funds
    Outgoing,
    /// Swap
    Swap,
    /// Approval
    Approve,
}

/// Asset protocol tag of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagProtocol {
    /// Native coin
    Native,
    /// Jetton
    Jetton,
}

/// Filter over tagged events; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionTagQuery {
    /// Event kind
    pub tag_type: Option<TagType>,
    /// Asset protocol
    pub protocol: Option<TagProtocol>,
    /// Jetton master address, for jetton queries
    pub jetton_address: Option<TonAddress>,
    /// Counterparty address in raw form
    pub address: Option<String>,
}

impl TagType {
    /// Tag for a user-facing filter; `All` has none
    pub fn from_filter(filter: TransactionTypeFilter) -> Option<Self> {
        match filter {
            TransactionTypeFilter::All => None,
            TransactionTypeFilter::Incoming => Some(TagType::Incoming),
            TransactionTypeFilter::Outgoing => Some(TagType::Outgoing),
            TransactionTypeFilter::Swap => Some(TagType::Swap),
            TransactionTypeFilter::Approve => Some(TagType::Approve),
        }
    }
}

/// Converts a user-entered counterparty filter into raw form.
/// Unparseable addresses are dropped rather than failing the query.
pub fn raw_address_filter(address: Option<&str>) -> Option<String> {
    address
        .and_then(|a| TonAddress::from_friendly(a).ok())
        .map(|a| a.to_raw())
}

/// Query used by the base-coin transactions adapter
pub fn tag_query(token: Option<&Token>, filter: TransactionTypeFilter, address: Option<&str>) -> TransactionTagQuery {
    let mut protocol = None;
    let mut jetton_address = None;

    if let Some(token) = token {
        match &token.token_type {
            TokenType::Native => protocol = Some(TagProtocol::Native),
            TokenType::Jetton { address } => {
                if let Ok(address) = TonAddress::from_friendly(address) {
                    protocol = Some(TagProtocol::Jetton);
                    jetton_address = Some(address);
                }
            }
            TokenType::Eip20 { .. } | TokenType::Spl { .. } | TokenType::Unsupported { .. } => {}
        }
    }

    TransactionTagQuery {
        tag_type: TagType::from_filter(filter),
        protocol,
        jetton_address,
        address: raw_address_filter(address),
    }
}

/// Query used by a jetton adapter: always scoped to its jetton
pub fn jetton_tag_query(
    jetton_address: &TonAddress,
    filter: TransactionTypeFilter,
    address: Option<&str>,
) -> TransactionTagQuery {
    TransactionTagQuery {
        tag_type: TagType::from_filter(filter),
        protocol: Some(TagProtocol::Jetton),
        jetton_address: Some(jetton_address.clone()),
        address: raw_address_filter(address),
    }
}
