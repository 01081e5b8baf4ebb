//! Arithmetic building blocks for coins.
//!
//! - **primality**: Miller-Rabin test gating commitment values
//! - **commitment**: `g^serial * h^randomness mod p` and exponent sampling
//! - **secret**: zeroize-on-drop holder for opening material

/// Pedersen-style commitments over an integer group.
pub mod commitment;
/// Probabilistic primality testing.
pub mod primality;
/// Secret integer storage.
pub mod secret;

pub use commitment::{commit, random_exponent};
pub use primality::is_probable_prime;
pub use secret::SecretScalar;
