//! Scalar normalization: heterogeneous explorer numbers → integers.
//!
//! Explorers return numbers as `0x`-prefixed hex, as decimal strings, or not
//! at all. Conversion never fails: a value that cannot be read falls back to
//! a default, and [`Scalar`] records that it did so.

use alloy_primitives::U256;
use std::fmt;

/// Why a scalar fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// The field was missing or null.
    Absent,
    /// The field was present but not a number we understand.
    Malformed(String),
}

impl fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultReason::Absent => write!(f, "absent"),
            DefaultReason::Malformed(raw) => write!(f, "malformed value {raw:?}"),
        }
    }
}

/// A normalized scalar that remembers whether it was parsed or defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar<T> {
    Parsed(T),
    Defaulted { value: T, reason: DefaultReason },
}

impl<T: Copy> Scalar<T> {
    /// The value, parsed or defaulted.
    pub fn value(&self) -> T {
        match self {
            Scalar::Parsed(v) => *v,
            Scalar::Defaulted { value, .. } => *value,
        }
    }

    /// `Some` only when the input was actually parsed.
    pub fn parsed(&self) -> Option<T> {
        match self {
            Scalar::Parsed(v) => Some(*v),
            Scalar::Defaulted { .. } => None,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Scalar::Defaulted { .. })
    }

    pub fn default_reason(&self) -> Option<&DefaultReason> {
        match self {
            Scalar::Parsed(_) => None,
            Scalar::Defaulted { reason, .. } => Some(reason),
        }
    }
}

/// `toInteger` with the standard default of zero.
pub fn to_integer(raw: Option<&str>) -> Scalar<U256> {
    to_integer_or(raw, U256::ZERO)
}

/// Parse `0x`-prefixed hex or a decimal string; fall back to `default`.
pub fn to_integer_or(raw: Option<&str>, default: U256) -> Scalar<U256> {
    let Some(raw) = raw else {
        return Scalar::Defaulted { value: default, reason: DefaultReason::Absent };
    };
    match parse_u256(raw.trim()) {
        Some(v) => Scalar::Parsed(v),
        None => Scalar::Defaulted {
            value: default,
            reason: DefaultReason::Malformed(raw.to_string()),
        },
    }
}

/// Like [`to_integer`] but narrowed to `u64`; values that overflow are malformed.
pub fn to_u64(raw: Option<&str>) -> Scalar<u64> {
    match to_integer(raw) {
        Scalar::Parsed(v) => match u64::try_from(v) {
            Ok(n) => Scalar::Parsed(n),
            Err(_) => Scalar::Defaulted {
                value: 0,
                reason: DefaultReason::Malformed(v.to_string()),
            },
        },
        Scalar::Defaulted { reason, .. } => Scalar::Defaulted { value: 0, reason },
    }
}

/// Read the first 32-byte big-endian word of an ABI `data` payload.
///
/// Shorter payloads are read as-is; empty or non-hex payloads default to zero.
pub fn first_word(data: &str) -> Scalar<U256> {
    let hex = data.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let word = hex.get(..hex.len().min(64)).unwrap_or("");
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_hexdigit()) {
        return Scalar::Defaulted {
            value: U256::ZERO,
            reason: DefaultReason::Malformed(data.to_string()),
        };
    }
    match U256::from_str_radix(word, 16) {
        Ok(v) => Scalar::Parsed(v),
        Err(_) => Scalar::Defaulted {
            value: U256::ZERO,
            reason: DefaultReason::Malformed(data.to_string()),
        },
    }
}

fn parse_u256(s: &str) -> Option<U256> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return U256::from_str_radix(hex, 16).ok();
    }
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(s, 10).ok()
}

/// `amount / 10^decimals` as an `f64`.
///
/// Goes through the float parser's exponent notation, so the result is the
/// correctly rounded `f64` even when `10^decimals` itself would overflow.
pub fn scale_down(amount: U256, decimals: u8) -> f64 {
    format!("{amount}e-{decimals}").parse().unwrap_or(0.0)
}

/// wei → ether (`/ 10^18`).
pub fn wei_to_ether(wei: U256) -> f64 {
    scale_down(wei, 18)
}

/// wei → gwei (`/ 10^9`).
pub fn wei_to_gwei(wei: U256) -> f64 {
    scale_down(wei, 9)
}

/// Serde helpers that write `U256` as a decimal string.
pub mod u256_decimal {
    use alloy_primitives::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_u256(s.trim()).ok_or_else(|| D::Error::custom(format!("invalid integer {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_decimal_agree() {
        assert_eq!(to_integer(Some("0x1a")).value(), U256::from(26u64));
        assert_eq!(to_integer(Some("26")).value(), U256::from(26u64));
        assert!(!to_integer(Some("0x1a")).is_defaulted());
    }

    #[test]
    fn absent_and_garbage_default_to_zero() {
        let absent = to_integer(None);
        assert_eq!(absent.value(), U256::ZERO);
        assert_eq!(absent.default_reason(), Some(&DefaultReason::Absent));

        let junk = to_integer(Some("not-a-number"));
        assert_eq!(junk.value(), U256::ZERO);
        assert!(matches!(junk.default_reason(), Some(DefaultReason::Malformed(_))));

        assert!(to_integer(Some("")).is_defaulted());
        assert!(to_integer(Some("0x")).is_defaulted());
        assert!(to_integer(Some("-5")).is_defaulted());
        assert!(to_integer(Some("1_000")).is_defaulted());
    }

    #[test]
    fn custom_default_is_used() {
        let v = to_integer_or(Some("nope"), U256::from(7u64));
        assert_eq!(v.value(), U256::from(7u64));
        assert_eq!(v.parsed(), None);
    }

    #[test]
    fn u64_overflow_is_malformed() {
        assert_eq!(to_u64(Some("0xff")).value(), 255);
        let big = to_u64(Some("0x10000000000000000"));
        assert!(big.is_defaulted());
        assert_eq!(big.value(), 0);
    }

    #[test]
    fn unit_conversions() {
        let one_ether = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(wei_to_ether(one_ether), 1.0);
        assert_eq!(wei_to_gwei(U256::from(1_000_000_000u64)), 1.0);
        assert_eq!(wei_to_ether(U256::ZERO), 0.0);
        assert_eq!(scale_down(U256::from(1_500_000u64), 6), 1.5);
    }

    #[test]
    fn first_word_reads_leading_32_bytes() {
        let data = format!("0x{:064x}{:064x}", 1000u64, 5u64);
        assert_eq!(first_word(&data).value(), U256::from(1000u64));
        assert_eq!(first_word("0x3e8").value(), U256::from(1000u64));
        assert!(first_word("0x").is_defaulted());
        assert!(first_word("0xzz").is_defaulted());
    }

    #[test]
    fn u256_decimal_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct W {
            #[serde(with = "u256_decimal")]
            v: U256,
        }
        let json = serde_json::to_string(&W { v: U256::from(1000u64) }).unwrap();
        assert_eq!(json, r#"{"v":"1000"}"#);
        let back: W = serde_json::from_str(&json).unwrap();
        assert_eq!(back.v, U256::from(1000u64));
    }
}
