//! Account addresses carried by governance and registry configs

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Address length in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// 20-byte account address, `0x`-prefixed hex on the wire
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Parse from hex, with or without the `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(s)?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// `0x`-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(|e| de::Error::custom(format!("invalid address {:?}: {}", s, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let addr = Address::from_hex("0x52d41ca72af615a1ac3301b0a93efa222ecc7541").unwrap();
        assert_eq!(addr.to_hex(), "0x52d41ca72af615a1ac3301b0a93efa222ecc7541");
        assert_eq!(Address::from_hex("52d41ca72af615a1ac3301b0a93efa222ecc7541").unwrap(), addr);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Address::from_hex("0x1234").is_err());
        assert!(Address::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::default().is_zero());
        let json = serde_json::to_string(&Address::ZERO).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000000\"");
    }
}
