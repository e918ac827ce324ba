use crate::error::TypesError;
use crate::hash::Hash;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// 256-bit unsigned integer for balances, mint amounts and mint limits.
///
/// Stored as 4 x u64 in little-endian limb order. Consensus code uses the
/// `checked_*` methods; the operator impls saturate and are meant for tests
/// and constants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct U256([u64; 4]); // [low, mid_low, mid_high, high]

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl U256 {
    pub const ZERO: Self = Self([0, 0, 0, 0]);
    pub const ONE: Self = Self([1, 0, 0, 0]);
    pub const MAX: Self = Self([u64::MAX, u64::MAX, u64::MAX, u64::MAX]);

    /// 10^9 wei
    pub const GWEI: Self = Self([1_000_000_000, 0, 0, 0]);
    /// 10^18 wei
    pub const ETHER: Self = Self([1_000_000_000_000_000_000, 0, 0, 0]);

    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self(limbs)
    }

    /// Create from a u64 value
    pub const fn from_u64(val: u64) -> Self {
        Self([val, 0, 0, 0])
    }

    /// Create from a u128 value
    pub const fn from_u128(val: u128) -> Self {
        Self([val as u64, (val >> 64) as u64, 0, 0])
    }

    /// Checked addition
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let mut result = [0u64; 4];
        let mut carry = false;

        for i in 0..4 {
            let (sum1, overflow1) = self.0[i].overflowing_add(rhs.0[i]);
            let (sum2, overflow2) = sum1.overflowing_add(carry as u64);
            result[i] = sum2;
            carry = overflow1 || overflow2;
        }

        if carry {
            None
        } else {
            Some(Self(result))
        }
    }

    /// Checked subtraction
    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        if self < rhs {
            return None;
        }

        let mut result = [0u64; 4];
        let mut borrow = false;

        for i in 0..4 {
            let (diff1, underflow1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (diff2, underflow2) = diff1.overflowing_sub(borrow as u64);
            result[i] = diff2;
            borrow = underflow1 || underflow2;
        }

        Some(Self(result))
    }

    /// Checked multiplication (schoolbook, limb by limb).
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let mut result = [0u64; 4];

        for i in 0..4 {
            if self.0[i] == 0 {
                continue;
            }
            let mut carry = 0u128;
            for j in 0..4 {
                let product = (self.0[i] as u128) * (rhs.0[j] as u128) + carry;
                if i + j < 4 {
                    let sum = result[i + j] as u128 + (product & u64::MAX as u128);
                    result[i + j] = sum as u64;
                    carry = (product >> 64) + (sum >> 64);
                } else if product != 0 {
                    return None;
                } else {
                    carry = 0;
                }
            }
            if carry != 0 {
                return None;
            }
        }

        Some(Self(result))
    }

    /// Divide by a small divisor, returning quotient and remainder.
    pub fn div_rem_u64(&self, divisor: u64) -> Option<(Self, u64)> {
        if divisor == 0 {
            return None;
        }

        let mut quotient = [0u64; 4];
        let mut rem = 0u128;
        for i in (0..4).rev() {
            let cur = (rem << 64) | self.0[i] as u128;
            quotient[i] = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }

        Some((Self(quotient), rem as u64))
    }

    /// Saturating addition
    pub fn saturating_add(&self, rhs: &Self) -> Self {
        self.checked_add(rhs).unwrap_or(Self::MAX)
    }

    /// Saturating subtraction
    pub fn saturating_sub(&self, rhs: &Self) -> Self {
        self.checked_sub(rhs).unwrap_or(Self::ZERO)
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&l| l == 0)
    }

    /// Convert to big-endian bytes
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&self.0[3 - i].to_be_bytes());
        }
        bytes
    }

    /// Convert from big-endian bytes
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let mut limb_bytes = [0u8; 8];
            limb_bytes.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            limbs[3 - i] = u64::from_be_bytes(limb_bytes);
        }
        Self(limbs)
    }

    /// Big-endian slice of at most 32 bytes, left-padded.
    pub fn from_be_slice(slice: &[u8]) -> Result<Self, TypesError> {
        if slice.len() > 32 {
            return Err(TypesError::U256Overflow);
        }
        let mut padded = [0u8; 32];
        padded[32 - slice.len()..].copy_from_slice(slice);
        Ok(Self::from_be_bytes(padded))
    }

    /// Read a 32-byte big-endian storage word.
    pub fn from_word(word: &Hash) -> Self {
        Self::from_be_bytes(*word.as_bytes())
    }

    /// Encode as a 32-byte big-endian storage word.
    pub fn to_word(&self) -> Hash {
        Hash::from_bytes(self.to_be_bytes())
    }

    /// Parse from decimal string
    pub fn from_decimal_str(s: &str) -> Result<Self, TypesError> {
        if s.is_empty() {
            return Err(TypesError::InvalidU256String(s.to_string()));
        }

        let ten = Self::from_u64(10);
        let mut result = Self::ZERO;

        for c in s.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| TypesError::InvalidU256String(s.to_string()))?;
            result = result.checked_mul(&ten).ok_or(TypesError::U256Overflow)?;
            result = result
                .checked_add(&Self::from_u64(digit as u64))
                .ok_or(TypesError::U256Overflow)?;
        }

        Ok(result)
    }
}

impl From<u64> for U256 {
    fn from(val: u64) -> Self {
        Self::from_u64(val)
    }
}

impl From<u128> for U256 {
    fn from(val: u128) -> Self {
        Self::from_u128(val)
    }
}

impl From<u8> for U256 {
    fn from(val: u8) -> Self {
        Self::from_u64(val as u64)
    }
}

impl TryFrom<U256> for u64 {
    type Error = TypesError;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        if value.0[1] != 0 || value.0[2] != 0 || value.0[3] != 0 {
            Err(TypesError::U256Overflow)
        } else {
            Ok(value.0[0])
        }
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut n = *self;
        let mut digits = Vec::with_capacity(78);

        while !n.is_zero() {
            let (quotient, rem) = n.div_rem_u64(10).ok_or(fmt::Error)?;
            digits.push(b'0' + rem as u8);
            n = quotient;
        }

        digits.reverse();
        f.write_str(std::str::from_utf8(&digits).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self)
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl FromStr for U256 {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(digits) => {
                // Odd-length hex quantities such as "0x1" are accepted.
                let digits = if digits.len() % 2 == 1 {
                    format!("0{}", digits)
                } else {
                    digits.to_string()
                };
                let bytes = hex::decode(digits)?;
                Self::from_be_slice(&bytes)
            }
            None => Self::from_decimal_str(s),
        }
    }
}

impl Add for U256 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(&rhs)
    }
}

impl Sub for U256 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(&rhs)
    }
}

impl Mul for U256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(&rhs).unwrap_or(Self::MAX)
    }
}
