use core::fmt;
use std::sync::Arc;

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use super::{Denomination, PublicCoin};
use crate::primitives::commitment::{commit, ensure_exponent, random_exponent};
use crate::primitives::SecretScalar;
use crate::{Error, Params, Result};

/// Number of randomness samples tried before minting gives up.
///
/// Each attempt succeeds with probability roughly the density of primes in the
/// admissible range, so this bound is only reached when the parameters leave no
/// reachable prime commitments.
pub const MAX_COINMINT_ATTEMPTS: u32 = 10_000;

/// Length of the auxiliary private key generated by [`PrivateCoin::mint`].
pub const PRIV_KEY_LEN: usize = 32;

/// Secret half of a coin.
///
/// Holds the opening `(serial_number, randomness)` of its public commitment together
/// with an opaque private key. The public coin is always derived from the opening at
/// construction time and no field can be changed afterwards; a different opening means
/// a different `PrivateCoin`.
///
/// # Security
///
/// - Serial number, randomness and private key are wiped from memory on drop
/// - The secrets are never printed by `Debug` and the type has no serialization
/// - Only [`PrivateCoin::public_coin`] may be published
#[derive(Clone)]
pub struct PrivateCoin {
    params: Arc<Params>,
    public_coin: PublicCoin,
    randomness: SecretScalar,
    serial_number: SecretScalar,
    priv_key: Zeroizing<Vec<u8>>,
}

impl PrivateCoin {
    /// Mints a fresh coin with a random serial number and private key.
    ///
    /// Randomness is resampled until the commitment passes [`PublicCoin::validate`], up
    /// to [`MAX_COINMINT_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `params` is not initialized
    /// - `denomination` is [`Denomination::DenomError`]
    /// - No valid commitment was found within the retry bound
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use num_bigint::BigUint;
    /// use rand::rngs::OsRng;
    /// use zerocoin::{AccumulatorParams, Denomination, IntegerGroupParams, Params, PrivateCoin};
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
    /// let coin = PrivateCoin::mint(params, Denomination::One, &mut OsRng).unwrap();
    /// assert!(coin.public_coin().validate());
    /// ```
    pub fn mint<R: RngCore + CryptoRng>(
        params: Arc<Params>,
        denomination: Denomination,
        rng: &mut R,
    ) -> Result<Self> {
        params.ensure_initialized()?;

        ensure_assigned(denomination)?;

        let serial_number =
            SecretScalar::new(&random_exponent(params.coin_commitment_group(), rng)?);

        let mut priv_key = Zeroizing::new(vec![0u8; PRIV_KEY_LEN]);
        rng.fill_bytes(&mut priv_key);

        Self::derive(params, denomination, serial_number, priv_key, rng)
    }

    /// Mints a coin for a caller-chosen serial number and private key.
    ///
    /// Only the randomness is sampled; it is resampled until the commitment validates.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `params` is not initialized
    /// - `denomination` is [`Denomination::DenomError`]
    /// - `serial_number` is not below the group order
    /// - No valid commitment was found within the retry bound
    pub fn mint_with_serial<R: RngCore + CryptoRng>(
        params: Arc<Params>,
        denomination: Denomination,
        serial_number: &BigUint,
        priv_key: Vec<u8>,
        rng: &mut R,
    ) -> Result<Self> {
        let priv_key = Zeroizing::new(priv_key);
        params.ensure_initialized()?;
        ensure_assigned(denomination)?;
        ensure_exponent(params.coin_commitment_group(), serial_number, "serial number")?;

        Self::derive(params, denomination, SecretScalar::new(serial_number), priv_key, rng)
    }

    fn derive<R: RngCore + CryptoRng>(
        params: Arc<Params>,
        denomination: Denomination,
        serial_number: SecretScalar,
        priv_key: Zeroizing<Vec<u8>>,
        rng: &mut R,
    ) -> Result<Self> {
        let group = params.coin_commitment_group();

        // Every sampled randomness, kept or rejected, is moved into a `SecretScalar` and
        // wiped on drop. `BigUint` temporaries used for the exponentiation itself are
        // not wiped; num-bigint offers no zeroizing storage.
        for attempt in 1..=MAX_COINMINT_ATTEMPTS {
            let randomness = SecretScalar::new(&random_exponent(group, rng)?);
            let value = commit(group, &serial_number.expose(), &randomness.expose())?;
            let public_coin = PublicCoin::from_value(params.clone(), value, denomination)?;

            if public_coin.validate() {
                tracing::debug!(attempt, %denomination, "minted coin");
                return Ok(Self {
                    params,
                    public_coin,
                    randomness,
                    serial_number,
                    priv_key,
                });
            }
        }

        tracing::warn!(
            attempts = MAX_COINMINT_ATTEMPTS,
            "no valid coin commitment found; parameters may be too narrow"
        );
        Err(Error::CommitmentDerivationFailed {
            attempts: MAX_COINMINT_ATTEMPTS,
        })
    }

    /// Rebuilds a coin from a complete, caller-supplied opening.
    ///
    /// Derivation is a single deterministic step: the same opening under the same params
    /// always yields the same public coin.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `params` is not initialized
    /// - `denomination` is [`Denomination::DenomError`]
    /// - `serial_number` or `randomness` is not below the group order
    /// - The resulting commitment does not validate
    pub fn from_opening(
        params: Arc<Params>,
        denomination: Denomination,
        serial_number: &BigUint,
        randomness: &BigUint,
        priv_key: Vec<u8>,
    ) -> Result<Self> {
        let priv_key = Zeroizing::new(priv_key);
        params.ensure_initialized()?;
        ensure_assigned(denomination)?;

        let group = params.coin_commitment_group();
        ensure_exponent(group, serial_number, "serial number")?;
        ensure_exponent(group, randomness, "randomness")?;

        let value = commit(group, serial_number, randomness)?;
        let public_coin = PublicCoin::from_value(params.clone(), value, denomination)?;

        if !public_coin.validate() {
            return Err(Error::CommitmentDerivationFailed { attempts: 1 });
        }

        Ok(Self {
            params,
            public_coin,
            randomness: SecretScalar::new(randomness),
            serial_number: SecretScalar::new(serial_number),
            priv_key,
        })
    }

    /// Returns the parameters this coin was minted under.
    pub fn params(&self) -> &Arc<Params> {
        &self.params
    }

    /// Returns the publishable half of the coin.
    pub fn public_coin(&self) -> &PublicCoin {
        &self.public_coin
    }

    /// Returns the coin's denomination.
    pub fn denomination(&self) -> Denomination {
        self.public_coin.denomination()
    }

    /// Returns the serial number. Reveal it only when spending.
    pub fn serial_number(&self) -> BigUint {
        self.serial_number.expose()
    }

    /// Returns the commitment randomness.
    pub fn randomness(&self) -> BigUint {
        self.randomness.expose()
    }

    /// Returns the auxiliary private key.
    pub fn priv_key(&self) -> &[u8] {
        &self.priv_key
    }

    /// Checks in constant time whether `serial_number` is this coin's serial number.
    pub fn has_serial_number(&self, serial_number: &BigUint) -> bool {
        let candidate = SecretScalar::new(serial_number);
        bool::from(self.serial_number.ct_eq(&candidate))
    }

    /// Recomputes the commitment from the opening and compares it to the public value.
    pub fn verify_opening(&self) -> bool {
        match commit(
            self.params.coin_commitment_group(),
            &self.serial_number.expose(),
            &self.randomness.expose(),
        ) {
            Ok(value) => self.public_coin.value() == Some(&value),
            Err(_) => false,
        }
    }
}

// Every secret field wipes itself on drop.
impl ZeroizeOnDrop for PrivateCoin {}

impl fmt::Debug for PrivateCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateCoin")
            .field("public_coin", &self.public_coin)
            .field("randomness", &"<redacted>")
            .field("serial_number", &"<redacted>")
            .field("priv_key", &"<redacted>")
            .finish()
    }
}

fn ensure_assigned(denomination: Denomination) -> Result<()> {
    if !denomination.is_assigned() {
        return Err(Error::InvalidDenomination(
            "Cannot mint a coin without a denomination".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::OsRng;

    use super::*;
    use crate::primitives::is_probable_prime;
    use crate::{AccumulatorParams, IntegerGroupParams};

    fn params(min: u32, max: u32) -> Arc<Params> {
        let group = IntegerGroupParams::new(
            BigUint::from(4u32),
            BigUint::from(9u32),
            BigUint::from(1019u32),
            BigUint::from(509u32),
        )
        .unwrap();
        let bounds = AccumulatorParams::new(BigUint::from(min), BigUint::from(max)).unwrap();
        Arc::new(Params::new(group, bounds, 20).unwrap())
    }

    #[test]
    fn minted_coin_is_valid_and_consistent() {
        let params = params(100, 1000);
        let coin = PrivateCoin::mint(params.clone(), Denomination::Ten, &mut OsRng).unwrap();

        assert!(coin.public_coin().validate());
        assert!(coin.verify_opening());
        assert_eq!(coin.denomination(), Denomination::Ten);
        assert_eq!(coin.priv_key().len(), PRIV_KEY_LEN);
        assert!(Arc::ptr_eq(coin.params(), &params));
        assert!(Arc::ptr_eq(coin.public_coin().params(), &params));

        let value = coin.public_coin().value().unwrap();
        assert!(is_probable_prime(value, 20));
    }

    #[test]
    fn from_opening_with_known_values() {
        // 4^2 * 9^2 mod 1019 = 277, which is prime
        let coin = PrivateCoin::from_opening(
            params(100, 1000),
            Denomination::One,
            &BigUint::from(2u32),
            &BigUint::from(2u32),
            vec![7; 32],
        )
        .unwrap();

        assert_eq!(coin.public_coin().value(), Some(&BigUint::from(277u32)));
        assert_eq!(coin.serial_number(), BigUint::from(2u32));
        assert_eq!(coin.randomness(), BigUint::from(2u32));
        assert_eq!(coin.priv_key(), &[7; 32]);
    }

    #[test]
    fn from_opening_rejects_invalid_commitment() {
        // 4^3 * 9^5 mod 1019 = 684, which is composite
        let result = PrivateCoin::from_opening(
            params(100, 1000),
            Denomination::One,
            &BigUint::from(3u32),
            &BigUint::from(5u32),
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(Error::CommitmentDerivationFailed { attempts: 1 })
        ));
    }

    #[test]
    fn from_opening_rejects_out_of_range_exponents() {
        let result = PrivateCoin::from_opening(
            params(100, 1000),
            Denomination::One,
            &BigUint::from(509u32),
            &BigUint::from(2u32),
            Vec::new(),
        );
        assert!(matches!(result, Err(Error::InvalidOpening(_))));
    }

    #[test]
    fn mint_with_serial_keeps_serial() {
        let serial = BigUint::from(123u32);
        let coin = PrivateCoin::mint_with_serial(
            params(100, 1000),
            Denomination::Fifty,
            &serial,
            vec![1, 2, 3],
            &mut OsRng,
        )
        .unwrap();

        assert_eq!(coin.serial_number(), serial);
        assert!(coin.has_serial_number(&serial));
        assert!(!coin.has_serial_number(&BigUint::from(124u32)));
        assert!(coin.verify_opening());
    }

    #[test]
    fn mint_fails_when_no_prime_is_reachable() {
        // (1013, 1018] contains no primes
        let result = PrivateCoin::mint(params(1013, 1018), Denomination::One, &mut OsRng);
        assert!(matches!(
            result,
            Err(Error::CommitmentDerivationFailed {
                attempts: MAX_COINMINT_ATTEMPTS
            })
        ));
    }

    #[test]
    fn mint_stores_sampled_serial_as_secret() {
        let coin = PrivateCoin::mint(params(100, 1000), Denomination::One, &mut OsRng).unwrap();
        let serial = coin.serial_number();

        assert!(coin.has_serial_number(&serial));
        assert!(bool::from(coin.serial_number.ct_eq(&SecretScalar::new(&serial))));
        assert!(coin.verify_opening());
    }

    #[test]
    fn mint_with_serial_exhausts_retry_bound() {
        let result = PrivateCoin::mint_with_serial(
            params(1013, 1018),
            Denomination::One,
            &BigUint::from(3u32),
            vec![9; 4],
            &mut OsRng,
        );
        assert!(matches!(
            result,
            Err(Error::CommitmentDerivationFailed {
                attempts: MAX_COINMINT_ATTEMPTS
            })
        ));
    }

    #[test]
    fn mint_requires_denomination() {
        let result = PrivateCoin::mint(params(100, 1000), Denomination::DenomError, &mut OsRng);
        assert!(matches!(result, Err(Error::InvalidDenomination(_))));
    }

    #[test]
    fn mint_rejects_uninitialized_params() {
        let params = Arc::new(Params::uninitialized());
        assert!(matches!(
            PrivateCoin::mint(params, Denomination::One, &mut OsRng),
            Err(Error::UninitializedParams)
        ));
    }

    #[test]
    fn debug_hides_secrets() {
        let coin = PrivateCoin::from_opening(
            params(100, 1000),
            Denomination::One,
            &BigUint::from(2u32),
            &BigUint::from(2u32),
            vec![0xab; 32],
        )
        .unwrap();

        let printed = format!("{coin:?}");
        assert!(printed.contains("redacted"));
        assert!(!printed.contains("abab"));
    }
}
