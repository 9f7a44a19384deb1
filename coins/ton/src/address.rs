//! TON account addresses in raw (`workchain:hex`) and user-friendly form

use crc::{Crc, CRC_16_XMODEM};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{TonError, TonNetwork};

const BOUNCEABLE_TAG: u8 = 0x11;
const NON_BOUNCEABLE_TAG: u8 = 0x51;
const TEST_FLAG: u8 = 0x80;

/// TON address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TonAddress {
    /// Workchain ID (0 for basechain, -1 for masterchain)
    pub workchain: i8,
    /// Account ID (32 bytes hash)
    pub hash: [u8; 32],
}

impl TonAddress {
    /// CRC16-XMODEM calculator
    const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

    /// Creates a new address
    pub fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Creates an address from raw format (workchain:hash)
    pub fn from_raw(raw: &str) -> Result<Self, TonError> {
        let (workchain, hash_hex) = raw
            .split_once(':')
            .ok_or_else(|| TonError::InvalidAddress(format!("{raw}: expected workchain:hash")))?;

        let workchain = workchain
            .parse::<i8>()
            .map_err(|_| TonError::InvalidAddress(format!("{raw}: invalid workchain")))?;

        if hash_hex.len() != 64 {
            return Err(TonError::InvalidAddress(format!("{raw}: hash must be 64 hex chars")));
        }

        let hash_bytes = hex::decode(hash_hex).map_err(|e| TonError::InvalidAddress(format!("{raw}: {e}")))?;

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hash_bytes);

        Ok(Self { workchain, hash })
    }

    /// Creates an address from user-friendly base64 format
    pub fn from_friendly(addr: &str) -> Result<Self, TonError> {
        // Accept both standard and URL-safe alphabets
        let normalized = addr.replace('-', "+").replace('_', "/");

        let bytes = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &normalized)
            .map_err(|e| TonError::InvalidAddress(format!("{addr}: {e}")))?;

        if bytes.len() != 36 {
            return Err(TonError::InvalidAddress(format!("{addr}: invalid address length")));
        }

        let data = &bytes[0..34];
        let checksum = &bytes[34..36];

        let calculated_crc = Self::CRC.checksum(data);
        let expected_crc = ((checksum[0] as u16) << 8) | (checksum[1] as u16);

        if calculated_crc != expected_crc {
            return Err(TonError::InvalidAddress(format!("{addr}: invalid checksum")));
        }

        let tag = bytes[0] & !TEST_FLAG;
        if tag != BOUNCEABLE_TAG && tag != NON_BOUNCEABLE_TAG {
            return Err(TonError::InvalidAddress(format!("{addr}: unknown address tag {:#04x}", bytes[0])));
        }

        let workchain = bytes[1] as i8;

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);

        Ok(Self { workchain, hash })
    }

    /// Returns the raw address format (workchain:hash)
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Returns the user-friendly base64 address
    pub fn to_friendly(&self, network: TonNetwork, bounceable: bool) -> String {
        self.to_friendly_custom(network.address_flag(bounceable))
    }

    /// Returns the user-friendly base64 address with custom flags
    pub fn to_friendly_custom(&self, flags: u8) -> String {
        let mut data = Vec::with_capacity(36);
        data.push(flags);
        data.push(self.workchain as u8);
        data.extend_from_slice(&self.hash);

        let crc = Self::CRC.checksum(&data);
        data.push((crc >> 8) as u8);
        data.push((crc & 0xFF) as u8);

        base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, &data)
    }

    /// Mainnet user-friendly form shown to the user
    pub fn to_display_string(&self, bounceable: bool) -> String {
        self.to_friendly(TonNetwork::Mainnet, bounceable)
    }
}

impl fmt::Display for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_friendly(TonNetwork::Mainnet, true))
    }
}

impl FromStr for TonAddress {
    type Err = TonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Try friendly format first, then raw
        Self::from_friendly(s).or_else(|_| Self::from_raw(s))
    }
}

impl TryFrom<String> for TonAddress {
    type Error = TonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TonAddress> for String {
    fn from(address: TonAddress) -> Self {
        address.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ton_address_raw_format() {
        let addr = TonAddress::new(0, [0x12; 32]);
        let raw = addr.to_raw();
        assert!(raw.starts_with("0:"));
        assert_eq!(raw.len(), 66);
    }

    #[test]
    fn test_ton_address_from_raw() {
        let raw = "0:1212121212121212121212121212121212121212121212121212121212121212";
        let addr = TonAddress::from_raw(raw).unwrap();
        assert_eq!(addr.workchain, 0);
        assert_eq!(addr.hash, [0x12; 32]);
    }

    #[test]
    fn test_ton_address_masterchain() {
        let raw = format!("-1:{}", "ab".repeat(32));
        let addr = TonAddress::from_raw(&raw).unwrap();
        assert_eq!(addr.workchain, -1);
        assert_eq!(addr.to_raw(), raw);
    }

    #[test]
    fn test_ton_address_from_raw_invalid() {
        assert!(TonAddress::from_raw("no-colon").is_err());
        assert!(TonAddress::from_raw("x:12").is_err());
        assert!(TonAddress::from_raw("0:1234").is_err());
        assert!(TonAddress::from_raw(&format!("0:{}", "zz".repeat(32))).is_err());
    }

    #[test]
    fn test_ton_address_friendly_roundtrip() {
        let addr = TonAddress::new(0, [0xAB; 32]);
        for bounceable in [true, false] {
            for network in [TonNetwork::Mainnet, TonNetwork::Testnet] {
                let friendly = addr.to_friendly(network, bounceable);
                assert_eq!(friendly.len(), 48);
                assert_eq!(TonAddress::from_friendly(&friendly).unwrap(), addr);
            }
        }
    }

    #[test]
    fn test_ton_address_bounceable_prefix() {
        let addr = TonAddress::new(0, [0x12; 32]);
        assert!(addr.to_display_string(true).starts_with("EQ"));
        assert!(addr.to_display_string(false).starts_with("UQ"));
    }

    #[test]
    fn test_ton_address_bad_checksum() {
        let addr = TonAddress::new(0, [0x12; 32]);
        let mut friendly = addr.to_display_string(true).into_bytes();
        let last = friendly.len() - 1;
        friendly[last] = if friendly[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(friendly).unwrap();
        assert!(TonAddress::from_friendly(&tampered).is_err());
    }

    #[test]
    fn test_ton_address_unknown_tag() {
        let addr = TonAddress::new(0, [0x12; 32]);
        let friendly = addr.to_friendly_custom(0x22);
        assert!(TonAddress::from_friendly(&friendly).is_err());
    }

    #[test]
    fn test_ton_address_from_str_accepts_both_forms() {
        let addr = TonAddress::new(0, [0x42; 32]);
        assert_eq!(addr.to_raw().parse::<TonAddress>().unwrap(), addr);
        assert_eq!(addr.to_display_string(false).parse::<TonAddress>().unwrap(), addr);
        assert!("garbage".parse::<TonAddress>().is_err());
    }

    #[test]
    fn test_ton_address_serde_as_raw_string() {
        let addr = TonAddress::new(0, [0x01; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.to_raw()));
        let parsed: TonAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, addr);
    }
}
