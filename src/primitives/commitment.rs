//! Pedersen-style commitments over an integer group.

use num_bigint::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::{CryptoRng, RngCore};

use crate::params::IntegerGroupParams;
use crate::{Error, Result};

/// Computes the coin commitment `g^serial * h^randomness mod modulus`.
///
/// The result is a pure function of its inputs; recomputing it from the same opening
/// always yields the same value.
///
/// # Errors
///
/// Returns an error if the group has a zero modulus, which only happens for
/// uninitialized parameters.
pub fn commit(
    group: &IntegerGroupParams,
    serial_number: &BigUint,
    randomness: &BigUint,
) -> Result<BigUint> {
    let modulus = group.modulus();
    if modulus.is_zero() {
        return Err(Error::InvalidParams("modulus cannot be zero".to_string()));
    }

    let gs = group.g().modpow(serial_number, modulus);
    let hr = group.h().modpow(randomness, modulus);
    Ok((gs * hr) % modulus)
}

/// Samples an exponent uniformly from `[0, group_order)`.
///
/// # Errors
///
/// Returns an error if the group order is zero.
pub fn random_exponent<R: RngCore + CryptoRng>(
    group: &IntegerGroupParams,
    rng: &mut R,
) -> Result<BigUint> {
    let order = group.group_order();
    if order.is_zero() {
        return Err(Error::InvalidParams("group order cannot be zero".to_string()));
    }

    Ok(rng.gen_biguint_below(order))
}

/// Checks that an exponent lies in `[0, group_order)`.
pub(crate) fn ensure_exponent(
    group: &IntegerGroupParams,
    exponent: &BigUint,
    name: &str,
) -> Result<()> {
    if exponent >= group.group_order() {
        return Err(Error::InvalidOpening(format!(
            "{name} must be less than the group order"
        )));
    }
    Ok(())
}
