//! TON smart-contract addresses.
//!
//! Accepts both the raw `workchain:hex` form returned by tonapi and the
//! 48-character user-friendly form used by getgems and wallets. Two
//! addresses are equal when workchain and account hash match, regardless
//! of the textual form or the bounceable flag they were parsed from.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::CheckError;

const FLAG_BOUNCEABLE: u8 = 0x11;
const FLAG_NON_BOUNCEABLE: u8 = 0x51;
const FLAG_TESTNET: u8 = 0x80;
const FRIENDLY_LEN: usize = 36;

/// A standard (non-anycast) internal address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    workchain: i8,
    hash: [u8; 32],
}

impl Address {
    pub const fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    pub const fn workchain(&self) -> i8 {
        self.workchain
    }

    pub const fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Raw form, e.g. `0:b774d95e...`.
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Mainnet user-friendly form (url-safe base64).
    pub fn to_friendly(&self, bounceable: bool) -> String {
        let mut buf = [0u8; FRIENDLY_LEN];
        buf[0] = if bounceable {
            FLAG_BOUNCEABLE
        } else {
            FLAG_NON_BOUNCEABLE
        };
        buf[1] = self.workchain.to_be_bytes()[0];
        buf[2..34].copy_from_slice(&self.hash);
        let crc = crc16(&buf[..34]);
        buf[34..].copy_from_slice(&crc.to_be_bytes());
        URL_SAFE.encode(buf)
    }

    fn parse_raw(s: &str) -> Result<Self, CheckError> {
        let invalid = || CheckError::InvalidAddress(s.to_string());
        let (wc, hash_hex) = s.split_once(':').ok_or_else(invalid)?;
        let workchain: i8 = wc.parse().map_err(|_| invalid())?;
        let bytes = hex::decode(hash_hex).map_err(|_| invalid())?;
        let hash: [u8; 32] = bytes.try_into().map_err(|_| invalid())?;
        Ok(Self { workchain, hash })
    }

    fn parse_friendly(s: &str) -> Result<Self, CheckError> {
        let invalid = || CheckError::InvalidAddress(s.to_string());
        let normalized: String = s
            .chars()
            .map(|c| match c {
                '-' => '+',
                '_' => '/',
                other => other,
            })
            .collect();
        let bytes = STANDARD.decode(normalized).map_err(|_| invalid())?;
        if bytes.len() != FRIENDLY_LEN {
            return Err(invalid());
        }

        let flags = bytes[0] & !FLAG_TESTNET;
        if flags != FLAG_BOUNCEABLE && flags != FLAG_NON_BOUNCEABLE {
            return Err(invalid());
        }
        let expected = u16::from_be_bytes([bytes[34], bytes[35]]);
        if crc16(&bytes[..34]) != expected {
            return Err(invalid());
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);
        Ok(Self {
            workchain: i8::from_be_bytes([bytes[1]]),
            hash,
        })
    }
}

impl FromStr for Address {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(':') {
            Self::parse_raw(s)
        } else {
            Self::parse_friendly(s)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_friendly(true))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_raw())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_friendly(true))
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// CRC-16/XMODEM as used by the user-friendly address checksum.
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION_FRIENDLY: &str = "EQC3dNlesgVD8YbAazcauIrXBPfiVhMMr5YYk2in0Mtsz0Bz";
    const COLLECTION_RAW: &str =
        "0:b774d95eb20543f186c06b371ab88ad704f7e256130caf96189368a7d0cb6ccf";

    #[test]
    fn test_friendly_and_raw_forms_are_equal() {
        let friendly: Address = COLLECTION_FRIENDLY.parse().unwrap();
        let raw: Address = COLLECTION_RAW.parse().unwrap();
        assert_eq!(friendly, raw);
        assert_eq!(friendly.to_raw(), COLLECTION_RAW);
        assert_eq!(raw.to_friendly(true), COLLECTION_FRIENDLY);
    }

    #[test]
    fn test_non_bounceable_form() {
        let addr: Address = COLLECTION_RAW.parse().unwrap();
        let non_bounceable = addr.to_friendly(false);
        assert_eq!(non_bounceable, "UQC3dNlesgVD8YbAazcauIrXBPfiVhMMr5YYk2in0Mtszx22");
        assert_eq!(non_bounceable.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let tampered = COLLECTION_FRIENDLY.replace("z0Bz", "z0Ba");
        assert!(tampered.parse::<Address>().is_err());
    }

    #[test]
    fn test_masterchain_raw() {
        let raw = format!("-1:{}", "ab".repeat(32));
        let addr: Address = raw.parse().unwrap();
        assert_eq!(addr.workchain(), -1);
        assert_eq!(addr.to_raw(), raw);
        assert_eq!(addr.to_friendly(true).parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!("".parse::<Address>().is_err());
        assert!("0:zz".parse::<Address>().is_err());
        assert!("not-an-address".parse::<Address>().is_err());
    }
}
