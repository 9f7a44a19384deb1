//! Balance, send and history adapter for a single jetton.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use walletd_traits::{
    Adapter, AdapterState, BalanceAdapter, BalanceData, DepositAdapter, Reachability, SendAdapter, Token, TokenType,
    TransactionTypeFilter, TransactionsAdapter, Wallet, WalletResult,
};

use crate::amount::{to_decimal, to_raw};
use crate::converter::JettonTransactionConverter;
use crate::record::TonTransactionRecord;
use crate::tag_query::jetton_tag_query;
use crate::{Jetton, SyncState, TonAddress, TonConfig, TonError, TonKit, TonResult};

/// Maps the kit's sync state onto the wallet's adapter state
pub fn adapter_state(sync_state: SyncState) -> AdapterState {
    match sync_state {
        SyncState::Syncing => AdapterState::Syncing {
            progress: None,
            last_block_date: None,
        },
        SyncState::Synced => AdapterState::Synced,
        SyncState::NotSynced(error) => AdapterState::NotSynced { error },
    }
}

/// Adapter for one jetton of a TON account
pub struct JettonAdapter<K: TonKit> {
    kit: Arc<K>,
    config: TonConfig,
    reachability: Arc<dyn Reachability>,
    jetton_address: TonAddress,
    jetton_token: Token,
    base_token: Token,
    converter: JettonTransactionConverter,
    adapter_started: AtomicBool,
    kit_started: AtomicBool,
}

impl<K: TonKit> JettonAdapter<K> {
    /// Creates an adapter for `wallet`, whose token must be a jetton.
    pub fn new(
        kit: Arc<K>,
        wallet: &Wallet,
        base_token: Token,
        config: TonConfig,
        reachability: Arc<dyn Reachability>,
    ) -> TonResult<Self> {
        let TokenType::Jetton { address } = &wallet.token.token_type else {
            return Err(TonError::WrongTokenType);
        };

        let jetton_address =
            TonAddress::from_friendly(address).map_err(|_| TonError::WrongJettonAddress(address.clone()))?;

        let jetton_token = wallet.token.clone();
        let converter =
            JettonTransactionConverter::new(wallet.transaction_source(), base_token.clone(), jetton_token.clone());

        Ok(Self {
            kit,
            config,
            reachability,
            jetton_address,
            jetton_token,
            base_token,
            converter,
            adapter_started: AtomicBool::new(false),
            kit_started: AtomicBool::new(false),
        })
    }

    /// Jetton master address
    pub fn jetton_address(&self) -> &TonAddress {
        &self.jetton_address
    }

    /// Token this adapter serves
    pub fn token(&self) -> &Token {
        &self.jetton_token
    }

    /// Whether `start` was requested and not yet undone by `stop`
    pub fn is_started(&self) -> bool {
        self.adapter_started.load(Ordering::SeqCst)
    }

    fn start_kit(&self) {
        debug!(jetton = %self.jetton_address.to_raw(), "JettonAdapter, start kit");
        self.kit.start();
        self.kit_started.store(true, Ordering::SeqCst);
    }

    fn stop_kit(&self) {
        debug!(jetton = %self.jetton_address.to_raw(), "JettonAdapter, stop kit");
        self.kit.stop();
        self.kit_started.store(false, Ordering::SeqCst);
    }

    async fn jetton(&self) -> TonResult<Jetton> {
        self.kit
            .jettons()
            .await?
            .into_iter()
            .find(|jetton| jetton.address == self.jetton_address)
            .ok_or_else(|| TonError::CantCreateJetton(self.jetton_address.to_raw()))
    }
}

impl<K: TonKit> Adapter for JettonAdapter<K> {
    fn start(&self) {
        self.adapter_started.store(true, Ordering::SeqCst);

        if self.reachability.is_reachable() {
            self.start_kit();
        }
    }

    fn stop(&self) {
        self.adapter_started.store(false, Ordering::SeqCst);

        if self.kit_started.load(Ordering::SeqCst) {
            self.stop_kit();
        }
    }

    fn refresh(&self) {
        self.kit.refresh();
    }

    fn is_main_net(&self) -> bool {
        !self.config.network.is_testnet()
    }
}

#[async_trait]
impl<K: TonKit> BalanceAdapter for JettonAdapter<K> {
    async fn balance_state(&self) -> AdapterState {
        adapter_state(self.kit.sync_state())
    }

    async fn balance_data(&self) -> WalletResult<BalanceData> {
        let balance = self.kit.jetton_balance(&self.jetton_address).await?;
        Ok(BalanceData::new(to_decimal(&balance, self.jetton_token.decimals)))
    }
}

impl<K: TonKit> DepositAdapter for JettonAdapter<K> {
    fn receive_address(&self) -> String {
        self.kit
            .receive_address()
            .to_friendly(self.config.network, self.config.bounceable_default)
    }
}

#[async_trait]
impl<K: TonKit> SendAdapter for JettonAdapter<K> {
    async fn available_balance(&self) -> WalletResult<BigDecimal> {
        Ok(self.balance_data().await?.available)
    }

    fn validate(&self, address: &str) -> WalletResult<()> {
        TonAddress::from_friendly(address)?;
        Ok(())
    }

    async fn estimate_fee(&self, recipient: &str, amount: &BigDecimal, memo: Option<&str>) -> WalletResult<BigDecimal> {
        let raw_amount = to_raw(amount, self.jetton_token.decimals)?;
        let jetton = self.jetton().await?;

        let fee = self.kit.estimate_fee(recipient, &jetton, &raw_amount, memo).await?;
        Ok(to_decimal(&fee, self.base_token.decimals))
    }

    async fn send(&self, recipient: &str, amount: &BigDecimal, memo: Option<&str>) -> WalletResult<()> {
        let raw_amount = to_raw(amount, self.jetton_token.decimals)?;
        let jetton = self.jetton().await?;

        self.kit.send(recipient, &jetton, &raw_amount, memo).await?;
        info!(jetton = %self.jetton_address.to_raw(), %amount, "jetton transfer sent");
        Ok(())
    }
}

#[async_trait]
impl<K: TonKit> TransactionsAdapter for JettonAdapter<K> {
    type Record = TonTransactionRecord;

    async fn syncing(&self) -> bool {
        self.balance_state().await.is_syncing()
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
        _token: Option<&Token>,
        filter: TransactionTypeFilter,
        address: Option<&str>,
        limit: usize,
    ) -> WalletResult<Vec<TonTransactionRecord>> {
        let query = jetton_tag_query(&self.jetton_address, filter, address);
        let before_lt = from.map(TonTransactionRecord::lt);

        let events = self.kit.transactions(&[query], before_lt, limit).await?;
        debug!(count = events.len(), ?before_lt, "JettonAdapter loaded transactions");

        Ok(events
            .into_iter()
            .map(|event| self.converter.transaction_record(event))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_state_mapping() {
        assert_eq!(
            adapter_state(SyncState::Syncing),
            AdapterState::Syncing {
                progress: None,
                last_block_date: None
            }
        );
        assert_eq!(adapter_state(SyncState::Synced), AdapterState::Synced);
        assert_eq!(
            adapter_state(SyncState::NotSynced("no network".to_string())),
            AdapterState::NotSynced {
                error: "no network".to_string()
            }
        );
    }
}
