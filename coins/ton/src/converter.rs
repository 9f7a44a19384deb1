//! Classification of decorated account events into transaction records.
//!
//! [`classify`] is pure: it reads the event's decoration and actions and
//! builds exactly one [`TonTransactionRecord`]. Amounts go through
//! [`crate::amount`], so values are exact decimals.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::collections::HashMap;
use walletd_traits::{BlockchainType, Coin, Token, TokenType, TransactionSource, TransactionValue};

use crate::amount::{debit, to_decimal};
use crate::record::{TonRecordKind, TonTransactionRecord, Transfer};
use crate::{AccountEvent, Decoration, Jetton, JettonTransfer, TonAddress};

/// Display form of transfer counterparties
const BOUNCEABLE_DEFAULT: bool = false;

/// Builds the record for one event.
///
/// `fee_token` is the token fees are paid in; `transfer_token` is the token
/// jetton amounts are denominated in. Native records use `fee_token` for both.
pub fn classify(
    event: AccountEvent,
    fee_token: &Token,
    transfer_token: &Token,
    source: &TransactionSource,
) -> TonTransactionRecord {
    let kind = match event.decoration {
        Decoration::IncomingNative => TonRecordKind::NativeIncoming {
            token: fee_token.clone(),
        },
        Decoration::OutgoingNative { sent_to_self } => TonRecordKind::NativeOutgoing {
            token: fee_token.clone(),
            sent_to_self,
        },
        Decoration::IncomingJetton => TonRecordKind::JettonIncoming {
            transfer: incoming_transfer(&event, transfer_token),
        },
        Decoration::OutgoingJetton { sent_to_self } => {
            let (transfers, total) = outgoing_transfers(&event, transfer_token);
            TonRecordKind::JettonOutgoing {
                transfers,
                total_value: TransactionValue::coin_value(transfer_token.clone(), total),
                sent_to_self,
            }
        }
        Decoration::Unknown => TonRecordKind::Generic,
    };

    TonTransactionRecord::new(source.clone(), event, fee_token.clone(), kind)
}

/// Builds the record for one event as seen by a jetton adapter: only jetton
/// decorations produce typed records.
pub fn classify_jetton(
    event: AccountEvent,
    fee_token: &Token,
    jetton_token: &Token,
    source: &TransactionSource,
) -> TonTransactionRecord {
    match event.decoration {
        Decoration::IncomingJetton | Decoration::OutgoingJetton { .. } => classify(event, fee_token, jetton_token, source),
        Decoration::IncomingNative | Decoration::OutgoingNative { .. } | Decoration::Unknown => {
            TonTransactionRecord::new(source.clone(), event, fee_token.clone(), TonRecordKind::Generic)
        }
    }
}

fn transfer_leg(transfer: &JettonTransfer, value: BigDecimal, token: &Token) -> Option<Transfer> {
    let recipient = transfer.recipient.as_ref()?;
    Some(Transfer {
        address: recipient.address.to_display_string(BOUNCEABLE_DEFAULT),
        value: TransactionValue::coin_value(token.clone(), value),
    })
}

fn incoming_transfer(event: &AccountEvent, token: &Token) -> Option<Transfer> {
    event
        .jetton_transfers()
        .find(|transfer| transfer.recipient.is_some())
        .and_then(|transfer| transfer_leg(transfer, to_decimal(&transfer.amount, token.decimals), token))
}

fn outgoing_transfers(event: &AccountEvent, token: &Token) -> (Vec<Transfer>, BigDecimal) {
    let mut total = BigDecimal::zero();

    let transfers = event
        .jetton_transfers()
        .filter(|transfer| transfer.recipient.is_some())
        .filter_map(|transfer| {
            let amount = to_decimal(&transfer.amount, token.decimals);
            let value = debit(&amount);
            if !value.is_zero() {
                total += value.clone();
            }
            transfer_leg(transfer, value, token)
        })
        .collect();

    (transfers, total)
}

/// Token for a jetton the wallet has not enabled, built from kit metadata
pub fn jetton_token(jetton: &Jetton) -> Token {
    let address = jetton.address.to_display_string(true);
    let mut coin = Coin::new(format!("jetton:{}", jetton.address.to_raw()), jetton.name.clone(), jetton.symbol.clone());
    coin.image_url = jetton.image.clone();
    Token::new(coin, BlockchainType::Ton, TokenType::Jetton { address }, jetton.decimals)
}

/// Converter used by the base-coin transactions adapter.
///
/// Fees and native amounts are in the base token. Jetton amounts use the
/// wallet's enabled token for that jetton when known, the kit's jetton
/// metadata otherwise.
#[derive(Debug, Clone)]
pub struct TonTransactionConverter {
    source: TransactionSource,
    base_token: Token,
    jetton_tokens: HashMap<TonAddress, Token>,
}

impl TonTransactionConverter {
    /// Creates a converter
    pub fn new(source: TransactionSource, base_token: Token) -> Self {
        Self {
            source,
            base_token,
            jetton_tokens: HashMap::new(),
        }
    }

    /// Registers the wallet's tokens so jetton records use them.
    /// Tokens whose address does not parse are ignored.
    pub fn with_tokens<'a>(mut self, tokens: impl IntoIterator<Item = &'a Token>) -> Self {
        for token in tokens {
            if let TokenType::Jetton { address } = &token.token_type {
                if let Ok(address) = TonAddress::from_friendly(address) {
                    self.jetton_tokens.insert(address, token.clone());
                }
            }
        }
        self
    }

    /// Token jetton amounts of `event` are denominated in
    fn transfer_token(&self, event: &AccountEvent) -> Token {
        match event.decoration {
            Decoration::IncomingJetton | Decoration::OutgoingJetton { .. } => event
                .jetton_transfers()
                .find(|transfer| transfer.recipient.is_some())
                .map(|transfer| {
                    self.jetton_tokens
                        .get(&transfer.jetton.address)
                        .cloned()
                        .unwrap_or_else(|| jetton_token(&transfer.jetton))
                })
                .unwrap_or_else(|| self.base_token.clone()),
            Decoration::IncomingNative | Decoration::OutgoingNative { .. } | Decoration::Unknown => {
                self.base_token.clone()
            }
        }
    }

    /// Builds the record for one event
    pub fn transaction_record(&self, event: AccountEvent) -> TonTransactionRecord {
        let transfer_token = self.transfer_token(&event);
        classify(event, &self.base_token, &transfer_token, &self.source)
    }
}

/// Converter used by a jetton adapter
#[derive(Debug, Clone)]
pub struct JettonTransactionConverter {
    source: TransactionSource,
    base_token: Token,
    jetton_token: Token,
}

impl JettonTransactionConverter {
    /// Creates a converter
    pub fn new(source: TransactionSource, base_token: Token, jetton_token: Token) -> Self {
        Self {
            source,
            base_token,
            jetton_token,
        }
    }

    /// Builds the record for one event
    pub fn transaction_record(&self, event: AccountEvent) -> TonTransactionRecord {
        classify_jetton(event, &self.base_token, &self.jetton_token, &self.source)
    }
}
