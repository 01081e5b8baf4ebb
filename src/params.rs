//! Scheme parameters shared by every coin.
//!
//! Parameters are generated elsewhere and handed to this crate as immutable
//! configuration. A [`Params`] value is wrapped in an [`Arc`](std::sync::Arc) and shared
//! by reference across all coins created under it; two coins are only comparable when
//! they point at the same parameter set.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::{Error, Result};

/// Default number of Miller-Rabin rounds used to admit a commitment value.
pub const DEFAULT_ZKP_ITERATIONS: u32 = 80;

/// Group in which coin commitments are computed.
///
/// Commitments have the form `g^serial * h^randomness mod modulus`, where the exponents
/// are drawn below `group_order`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerGroupParams {
    g: BigUint,
    h: BigUint,
    modulus: BigUint,
    group_order: BigUint,
}

impl IntegerGroupParams {
    /// Creates a commitment group description.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The modulus is not an odd integer greater than 2
    /// - The group order is zero
    /// - Either generator lies outside `(1, modulus)`
    /// - The generators are equal to each other
    pub fn new(g: BigUint, h: BigUint, modulus: BigUint, group_order: BigUint) -> Result<Self> {
        if modulus <= BigUint::from(2u32) || !modulus.bit(0) {
            return Err(Error::InvalidParams(
                "Modulus must be an odd integer greater than 2".to_string(),
            ));
        }

        if group_order.is_zero() {
            return Err(Error::InvalidParams("Group order cannot be zero".to_string()));
        }

        for (name, generator) in [("g", &g), ("h", &h)] {
            if *generator <= BigUint::one() || *generator >= modulus {
                return Err(Error::InvalidParams(format!(
                    "Generator {name} must lie strictly between 1 and the modulus"
                )));
            }
        }

        if g == h {
            return Err(Error::InvalidParams("Generators g and h must be different".to_string()));
        }

        Ok(Self {
            g,
            h,
            modulus,
            group_order,
        })
    }

    /// Returns the serial number generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Returns the randomness generator `h`.
    pub fn h(&self) -> &BigUint {
        &self.h
    }

    /// Returns the group modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Returns the order of the subgroup generated by `g` and `h`.
    pub fn group_order(&self) -> &BigUint {
        &self.group_order
    }
}

/// Bounds a commitment value must satisfy to be admitted into the accumulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccumulatorParams {
    min_coin_value: BigUint,
    max_coin_value: BigUint,
}

impl AccumulatorParams {
    /// Creates accumulator bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_coin_value >= max_coin_value`.
    pub fn new(min_coin_value: BigUint, max_coin_value: BigUint) -> Result<Self> {
        if min_coin_value >= max_coin_value {
            return Err(Error::InvalidParams(
                "Minimum coin value must be below the maximum coin value".to_string(),
            ));
        }

        Ok(Self {
            min_coin_value,
            max_coin_value,
        })
    }

    /// Exclusive lower bound on commitment values.
    pub fn min_coin_value(&self) -> &BigUint {
        &self.min_coin_value
    }

    /// Inclusive upper bound on commitment values.
    pub fn max_coin_value(&self) -> &BigUint {
        &self.max_coin_value
    }
}

/// Complete parameter set for minting and validating coins.
///
/// # Security
///
/// - Parameters must be fixed for the lifetime of every coin that references them
/// - Share one instance through an `Arc`; coins compare params by identity
/// - Only [`Params::new`] yields initialized parameters
#[derive(Debug)]
pub struct Params {
    initialized: bool,
    coin_commitment_group: IntegerGroupParams,
    accumulator_params: AccumulatorParams,
    zkp_iterations: u32,
}

impl Params {
    /// Creates initialized parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `zkp_iterations` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use num_bigint::BigUint;
    /// use zerocoin::{AccumulatorParams, IntegerGroupParams, Params};
    ///
    /// let group = IntegerGroupParams::new(
    ///     BigUint::from(4u32),
    ///     BigUint::from(9u32),
    ///     BigUint::from(1019u32),
    ///     BigUint::from(509u32),
    /// )
    /// .unwrap();
    /// let bounds = AccumulatorParams::new(BigUint::from(100u32), BigUint::from(1000u32)).unwrap();
    ///
    /// let params = Params::new(group, bounds, 20).unwrap();
    /// assert!(params.is_initialized());
    /// ```
    pub fn new(
        coin_commitment_group: IntegerGroupParams,
        accumulator_params: AccumulatorParams,
        zkp_iterations: u32,
    ) -> Result<Self> {
        if zkp_iterations == 0 {
            return Err(Error::InvalidParams("zkp_iterations must be at least 1".to_string()));
        }

        Ok(Self {
            initialized: true,
            coin_commitment_group,
            accumulator_params,
            zkp_iterations,
        })
    }

    /// Returns parameters in the not-yet-initialized state.
    ///
    /// Every coin constructor rejects these with [`Error::UninitializedParams`].
    pub fn uninitialized() -> Self {
        Self {
            initialized: false,
            coin_commitment_group: IntegerGroupParams {
                g: BigUint::zero(),
                h: BigUint::zero(),
                modulus: BigUint::zero(),
                group_order: BigUint::zero(),
            },
            accumulator_params: AccumulatorParams {
                min_coin_value: BigUint::zero(),
                max_coin_value: BigUint::zero(),
            },
            zkp_iterations: 0,
        }
    }

    /// Whether these parameters may be used for coin operations.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the commitment group.
    pub fn coin_commitment_group(&self) -> &IntegerGroupParams {
        &self.coin_commitment_group
    }

    /// Returns the accumulator admission bounds.
    pub fn accumulator_params(&self) -> &AccumulatorParams {
        &self.accumulator_params
    }

    /// Number of Miller-Rabin rounds applied to commitment values.
    pub fn zkp_iterations(&self) -> u32 {
        self.zkp_iterations
    }

    pub(crate) fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::UninitializedParams)
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::uninitialized()
    }
}
