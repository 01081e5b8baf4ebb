//! Zeroize-on-drop storage for secret coin material.
//!
//! `BigUint` does not wipe its heap buffer when dropped, so secrets are held as
//! big-endian bytes and only materialized as integers on demand. Integers handed out by
//! [`SecretScalar::expose`] are ordinary values; callers that keep them around are
//! responsible for discarding them.

use core::fmt;

use num_bigint::BigUint;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret non-negative integer that is wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretScalar(Vec<u8>);

impl SecretScalar {
    /// Stores a copy of `value`.
    pub fn new(value: &BigUint) -> Self {
        Self(value.to_bytes_be())
    }

    /// Returns the secret as an integer.
    pub fn expose(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

impl ConstantTimeEq for SecretScalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_slice().ct_eq(other.0.as_slice())
    }
}

impl fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretScalar(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expose_returns_stored_value() {
        let value = BigUint::from(0xdead_beef_u64);
        assert_eq!(SecretScalar::new(&value).expose(), value);
    }

    #[test]
    fn zero_round_trips() {
        let zero = BigUint::from(0u32);
        assert_eq!(SecretScalar::new(&zero).expose(), zero);
    }

    #[test]
    fn constant_time_equality() {
        let a = SecretScalar::new(&BigUint::from(42u32));
        let b = SecretScalar::new(&BigUint::from(42u32));
        let c = SecretScalar::new(&BigUint::from(43u32));
        assert!(bool::from(a.ct_eq(&b)));
        assert!(!bool::from(a.ct_eq(&c)));
    }

    #[test]
    fn debug_is_redacted() {
        let secret = SecretScalar::new(&BigUint::from(31337u32));
        let printed = format!("{secret:?}");
        assert!(!printed.contains("31337"));
        assert!(printed.contains("redacted"));
    }

    #[test]
    fn zeroize_clears_bytes() {
        let mut secret = SecretScalar::new(&BigUint::from(31337u32));
        secret.zeroize();
        assert!(secret.0.is_empty());
    }
}
