//! Probabilistic primality testing for commitment values.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Primes used for trial division before running Miller-Rabin.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Tests whether `n` is a probable prime using `rounds` Miller-Rabin rounds.
///
/// A composite passes with probability at most `4^(-rounds)`. Witness bases are drawn
/// from a generator seeded by `n` itself, so the result is a pure function of
/// `(n, rounds)`.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigUint;
/// use zerocoin::primitives::is_probable_prime;
///
/// assert!(is_probable_prime(&BigUint::from(997u32), 20));
/// assert!(!is_probable_prime(&BigUint::from(999u32), 20));
/// ```
pub fn is_probable_prime(n: &BigUint, rounds: u32) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }

    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    let mut rng = StdRng::from_seed(seed_for(n));

    'witness: for _ in 0..rounds {
        // n > 97 here, so [2, n - 1) is never empty
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);

        if x == one || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x == one {
                return false;
            }
        }

        return false;
    }

    true
}

fn seed_for(n: &BigUint) -> [u8; 32] {
    let mut seed = [0u8; 32];
    for (i, byte) in n.to_bytes_le().iter().enumerate() {
        let slot = i % seed.len();
        seed[slot] = seed[slot].rotate_left(3) ^ byte;
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values() {
        assert!(!is_probable_prime(&BigUint::from(0u32), 20));
        assert!(!is_probable_prime(&BigUint::from(1u32), 20));
        assert!(is_probable_prime(&BigUint::from(2u32), 20));
        assert!(is_probable_prime(&BigUint::from(3u32), 20));
        assert!(!is_probable_prime(&BigUint::from(4u32), 20));
        assert!(is_probable_prime(&BigUint::from(97u32), 20));
        assert!(!is_probable_prime(&BigUint::from(100u32), 20));
        assert!(is_probable_prime(&BigUint::from(101u32), 20));
    }

    #[test]
    fn matches_trial_division_below_ten_thousand() {
        let is_prime = |n: u32| n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0);

        for n in 0u32..10_000 {
            assert_eq!(
                is_probable_prime(&BigUint::from(n), 20),
                is_prime(n),
                "disagreement at {n}"
            );
        }
    }

    #[test]
    fn rejects_carmichael_numbers() {
        for n in [561u32, 1105, 1729, 2465, 2821, 6601, 8911, 41041, 825_265] {
            assert!(!is_probable_prime(&BigUint::from(n), 20), "{n} is composite");
        }
    }

    #[test]
    fn rejects_base_two_strong_pseudoprimes() {
        for n in [2047u32, 3277, 4033, 4681, 8321] {
            assert!(!is_probable_prime(&BigUint::from(n), 20), "{n} is composite");
        }
    }

    #[test]
    fn large_mersenne_numbers() {
        let one = BigUint::one();
        let m61 = (&one << 61u32) - &one;
        let m67 = (&one << 67u32) - &one;
        let m127 = (&one << 127u32) - &one;

        assert!(is_probable_prime(&m61, 40));
        assert!(!is_probable_prime(&m67, 40));
        assert!(is_probable_prime(&m127, 40));
    }

    #[test]
    fn deterministic_for_same_input() {
        let n = BigUint::from(1_000_003u32);
        assert_eq!(is_probable_prime(&n, 5), is_probable_prime(&n, 5));
    }
}
