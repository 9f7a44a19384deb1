#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use walletd_ton::amount::{to_decimal, to_decimal_str, to_raw};

#[derive(Debug, Arbitrary)]
struct AmountInput {
    // Up to 256 bits of raw amount
    limbs: [u32; 8],
    decimals: u8,
    text: String,
}

fuzz_target!(|input: AmountInput| {
    let decimals = input.decimals % 39;
    let raw = BigUint::new(input.limbs.to_vec());

    // Normalizing then scaling back must be exact
    let value = to_decimal(&raw, decimals);
    let back = to_raw(&value, decimals).expect("normalized amount scales back");
    assert_eq!(back, raw, "raw round-trip failed");

    // Arbitrary text never panics and falls back to zero
    let parsed = to_decimal_str(&input.text, decimals);
    let digits_only = !input.text.is_empty() && input.text.chars().all(|c| c.is_ascii_digit());
    if digits_only && input.text.len() <= 100 {
        assert_eq!(to_raw(&parsed, decimals).ok(), BigUint::parse_bytes(input.text.as_bytes(), 10));
    }
});
