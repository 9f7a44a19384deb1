//! Transaction history adapter for the account's base coin and jettons.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use walletd_traits::{Token, TransactionSource, TransactionTypeFilter, TransactionsAdapter, WalletResult};

use crate::converter::TonTransactionConverter;
use crate::record::TonTransactionRecord;
use crate::tag_query::tag_query;
use crate::{SyncState, TonConfig, TonKit};

/// History adapter of a TON account
pub struct TonTransactionsAdapter<K: TonKit> {
    kit: Arc<K>,
    config: TonConfig,
    converter: TonTransactionConverter,
}

impl<K: TonKit> TonTransactionsAdapter<K> {
    /// Creates an adapter; jetton records use `tokens` when they match
    pub fn new<'a>(
        kit: Arc<K>,
        source: TransactionSource,
        base_token: Token,
        tokens: impl IntoIterator<Item = &'a Token>,
        config: TonConfig,
    ) -> Self {
        Self {
            kit,
            config,
            converter: TonTransactionConverter::new(source, base_token).with_tokens(tokens),
        }
    }
}

#[async_trait]
impl<K: TonKit> TransactionsAdapter for TonTransactionsAdapter<K> {
    type Record = TonTransactionRecord;

    async fn syncing(&self) -> bool {
        self.kit.sync_state() == SyncState::Syncing
    }

    fn explorer_title(&self) -> &str {
        &self.config.explorer_title
    }

    fn explorer_url(&self, transaction_hash: &str) -> Option<String> {
        Some(self.config.transaction_url(transaction_hash))
    }

    async fn transactions(
        &self,
        from: Option<&TonTransactionRecord>,
        token: Option<&Token>,
        filter: TransactionTypeFilter,
        address: Option<&str>,
        limit: usize,
    ) -> WalletResult<Vec<TonTransactionRecord>> {
        let query = tag_query(token, filter, address);
        let before_lt = from.map(TonTransactionRecord::lt);

        let events = self.kit.transactions(&[query], before_lt, limit).await?;
        debug!(count = events.len(), ?before_lt, "TonTransactionsAdapter loaded transactions");

        Ok(events
            .into_iter()
            .map(|event| self.converter.transaction_record(event))
            .collect())
    }
}
