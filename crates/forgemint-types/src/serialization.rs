//! Serde implementations for forgemint-types
//!
//! Fixed-width values travel as strings: addresses and hashes as `0x` hex,
//! `U256` as a decimal string. On input `U256` also takes `0x` hex strings
//! and plain unsigned integers.

use crate::{Address, Hash, U256};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(U256Visitor)
    }
}

struct U256Visitor;

impl<'de> Visitor<'de> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer, a decimal string or a 0x hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
        u64::try_from(v)
            .map(U256::from)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        U256::from_str(v).map_err(E::custom)
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_json() {
        let value = U256::from(1_000_000u64);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"1000000\"");
        let back: U256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_u256_json_hex_input() {
        let value: U256 = serde_json::from_str("\"0xff\"").unwrap();
        assert_eq!(value, U256::from(255u64));
    }

    #[test]
    fn test_u256_json_number_input() {
        let value: U256 = serde_json::from_str("1000").unwrap();
        assert_eq!(value, U256::from(1000u64));
        assert!(serde_json::from_str::<U256>("-1").is_err());
        assert!(serde_json::from_str::<U256>("1.5").is_err());
    }

    #[test]
    fn test_u256_toml_integer() {
        let config: crate::MintContractConfig = toml::from_str("mint_limit = 1000").unwrap();
        assert_eq!(config.mint_limit, Some(U256::from(1000u64)));

        let config: crate::MintContractConfig =
            toml::from_str("mint_limit = \"1000000000000000000000\"").unwrap();
        assert_eq!(config.mint_limit, Some(U256::from(1000u64) * U256::ETHER));

        assert!(toml::from_str::<crate::MintContractConfig>("mint_limit = -5").is_err());
    }

    #[test]
    fn test_address_json() {
        let addr = Address::from_bytes([0xab; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_address_json_rejects_garbage() {
        assert!(serde_json::from_str::<Address>("\"0x1234\"").is_err());
        assert!(serde_json::from_str::<Address>("42").is_err());
    }

    #[test]
    fn test_hash_json() {
        let hash = Hash::compute(b"forgemint");
        let json = serde_json::to_string(&hash).unwrap();
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
