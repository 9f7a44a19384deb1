#![no_main]

use bigdecimal::BigDecimal;
use libfuzzer_sys::fuzz_target;
use walletd_traits::{BlockchainType, Coin, Token, TokenType, TransactionSource};
use walletd_ton::{classify, AccountEvent, TonRecordKind};

fuzz_target!(|data: &[u8]| {
    let Ok(event) = serde_json::from_slice::<AccountEvent>(data) else {
        return;
    };

    let ton = Token::new(Coin::new("the-open-network", "Toncoin", "TON"), BlockchainType::Ton, TokenType::Native, 9);
    let source = TransactionSource::new(BlockchainType::Ton);

    // Every event classifies, and outgoing jetton totals and legs are never positive
    let record = classify(event, &ton, &ton, &source);
    if let TonRecordKind::JettonOutgoing {
        transfers, total_value, ..
    } = record.kind()
    {
        let zero = BigDecimal::from(0);
        assert!(total_value.decimal_value() <= &zero);
        assert!(transfers.iter().all(|t| t.value.decimal_value() <= &zero));
        assert_eq!(record.main_value(), Some(total_value));
    }
});
