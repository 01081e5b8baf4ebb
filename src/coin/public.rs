use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use num_bigint::BigUint;

use super::Denomination;
use crate::primitives::is_probable_prime;
use crate::{Error, Params, Result};

/// Wire format version for public coins.
const COIN_FORMAT_VERSION: u8 = 1;

/// Upper bound on the encoded size of a commitment value.
const MAX_VALUE_SIZE: usize = 4096;

/// Published half of a coin: the commitment value and its denomination.
///
/// A public coin can be built before its value is known ([`PublicCoin::new`]) or from an
/// untrusted value+denomination pair ([`PublicCoin::from_value`]). Neither path checks
/// the value; call [`PublicCoin::validate`] before admitting the coin into the
/// accumulator or accepting it as a spend target.
///
/// # Equality
///
/// Two coins are equal when their values are numerically equal, their denominations
/// match, and they reference the *same* parameter set (`Arc` identity). Coins created
/// under structurally identical but separately allocated params are not equal.
#[derive(Clone)]
pub struct PublicCoin {
    params: Arc<Params>,
    value: Option<BigUint>,
    denomination: Denomination,
}

impl PublicCoin {
    /// Creates a coin whose commitment is not yet known.
    ///
    /// The coin has no value and [`Denomination::DenomError`]; it never validates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UninitializedParams`] if `params` is not initialized.
    pub fn new(params: Arc<Params>) -> Result<Self> {
        params.ensure_initialized()?;

        Ok(Self {
            params,
            value: None,
            denomination: Denomination::DenomError,
        })
    }

    /// Creates a coin from an existing commitment value and denomination.
    ///
    /// The value is stored verbatim; no range or primality check is performed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UninitializedParams`] if `params` is not initialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use num_bigint::BigUint;
    /// use zerocoin::{AccumulatorParams, Denomination, IntegerGroupParams, Params, PublicCoin};
    ///
    /// let group = IntegerGroupParams::new(
    ///     BigUint::from(4u32),
    ///     BigUint::from(9u32),
    ///     BigUint::from(1019u32),
    ///     BigUint::from(509u32),
    /// )
    /// .unwrap();
    /// let bounds = AccumulatorParams::new(BigUint::from(100u32), BigUint::from(1000u32)).unwrap();
    /// let params = Arc::new(Params::new(group, bounds, 20).unwrap());
    ///
    /// let value = BigUint::from(997u32);
    /// let coin = PublicCoin::from_value(params, value, Denomination::One).unwrap();
    /// assert!(coin.validate());
    /// ```
    pub fn from_value(
        params: Arc<Params>,
        value: BigUint,
        denomination: Denomination,
    ) -> Result<Self> {
        params.ensure_initialized()?;

        Ok(Self {
            params,
            value: Some(value),
            denomination,
        })
    }

    /// Returns the parameters this coin was created under.
    pub fn params(&self) -> &Arc<Params> {
        &self.params
    }

    /// Returns the commitment value, if one has been set.
    pub fn value(&self) -> Option<&BigUint> {
        self.value.as_ref()
    }

    /// Returns the denomination.
    pub fn denomination(&self) -> Denomination {
        self.denomination
    }

    /// Checks whether this coin may be accumulated or spent.
    ///
    /// In order, short-circuiting:
    /// 1. the value must be strictly greater than `min_coin_value`
    /// 2. the value must not exceed `max_coin_value`
    /// 3. the value must be a probable prime at `zkp_iterations` rounds
    ///
    /// A coin without a value is never valid. Validation failure is an expected outcome
    /// for untrusted input and is reported as `false`, not as an error.
    pub fn validate(&self) -> bool {
        let Some(value) = self.value.as_ref() else {
            tracing::trace!("rejecting coin without a commitment value");
            return false;
        };

        let bounds = self.params.accumulator_params();

        if bounds.min_coin_value() >= value {
            tracing::trace!("rejecting coin: value not above minimum");
            return false;
        }

        if bounds.max_coin_value() < value {
            tracing::trace!("rejecting coin: value above maximum");
            return false;
        }

        if !is_probable_prime(value, self.params.zkp_iterations()) {
            tracing::trace!("rejecting coin: value is not prime");
            return false;
        }

        true
    }

    /// Serializes the coin to bytes.
    ///
    /// Format: `[version (1 byte)][denomination code (4 bytes)][value_len (4 bytes)][value]`,
    /// with all integers big-endian.
    ///
    /// # Errors
    ///
    /// Returns an error if the coin has no value or the value exceeds the decodable size.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let value = self
            .value
            .as_ref()
            .ok_or_else(|| Error::Serialization("Coin has no commitment value".to_string()))?;
        let value_bytes = value.to_bytes_be();
        if value_bytes.len() > MAX_VALUE_SIZE {
            return Err(Error::Serialization(format!(
                "Value too large: {} bytes",
                value_bytes.len()
            )));
        }

        let mut result = Vec::with_capacity(1 + 4 + 4 + value_bytes.len());
        result.push(COIN_FORMAT_VERSION);
        result.extend_from_slice(&self.denomination.code().to_be_bytes());
        result.extend_from_slice(&(value_bytes.len() as u32).to_be_bytes());
        result.extend_from_slice(&value_bytes);

        Ok(result)
    }

    /// Deserializes a coin from bytes produced by [`PublicCoin::to_bytes`].
    ///
    /// The decoded coin is not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` is not initialized or the encoding is malformed.
    pub fn from_bytes(params: Arc<Params>, bytes: &[u8]) -> Result<Self> {
        const HEADER_SIZE: usize = 1 + 4 + 4;

        if bytes.len() < HEADER_SIZE + 1 {
            return Err(Error::Serialization(format!("Coin too small: {} bytes", bytes.len())));
        }

        let version = bytes[0];
        if version != COIN_FORMAT_VERSION {
            return Err(Error::Serialization(format!("Unsupported coin version: {version}")));
        }

        let code = u32::from_be_bytes(read_array(bytes, 1)?);
        let denomination = Denomination::try_from(code)?;

        let value_len = u32::from_be_bytes(read_array(bytes, 5)?) as usize;
        if value_len == 0 || value_len > MAX_VALUE_SIZE {
            return Err(Error::Serialization(format!("Invalid value length: {value_len}")));
        }

        let remaining = bytes.len() - HEADER_SIZE;
        if remaining != value_len {
            return Err(Error::Serialization(format!(
                "Expected {value_len} value bytes, found {remaining}"
            )));
        }

        // one encoding per value: no leading zero bytes
        if value_len > 1 && bytes[HEADER_SIZE] == 0 {
            return Err(Error::Serialization(
                "Value has a non-canonical leading zero byte".to_string(),
            ));
        }

        let value = BigUint::from_bytes_be(&bytes[HEADER_SIZE..]);
        Self::from_value(params, value, denomination)
    }
}

fn read_array(bytes: &[u8], pos: usize) -> Result<[u8; 4]> {
    bytes
        .get(pos..pos + 4)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| Error::Serialization("Truncated coin header".to_string()))
}

impl PartialEq for PublicCoin {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && Arc::ptr_eq(&self.params, &other.params)
            && self.denomination == other.denomination
    }
}

impl Eq for PublicCoin {}

impl Hash for PublicCoin {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.denomination.hash(state);
        Arc::as_ptr(&self.params).hash(state);
    }
}

impl Ord for PublicCoin {
    /// Orders by value (coins without a value first), then denomination, then
    /// parameter-set identity.
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.denomination.cmp(&other.denomination))
            .then_with(|| Arc::as_ptr(&self.params).cmp(&Arc::as_ptr(&other.params)))
    }
}

impl PartialOrd for PublicCoin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for PublicCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicCoin")
            .field("value", &self.value.as_ref().map(|v| hex::encode(v.to_bytes_be())))
            .field("denomination", &self.denomination)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PublicCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}:{}", self.denomination, hex::encode(value.to_bytes_be())),
            None => write!(f, "{}:<pending>", self.denomination),
        }
    }
}
