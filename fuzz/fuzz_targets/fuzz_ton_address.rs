#![no_main]

use libfuzzer_sys::fuzz_target;
use walletd_ton::TonAddress;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing must never panic, and anything accepted must re-encode to itself
    if let Ok(address) = s.parse::<TonAddress>() {
        let raw = address.to_raw();
        assert_eq!(TonAddress::from_raw(&raw).ok(), Some(address.clone()));

        let friendly = address.to_display_string(true);
        assert_eq!(TonAddress::from_friendly(&friendly).ok(), Some(address));
    }
});
