//! Coin primitives for the Zerocoin anonymous e-cash scheme.
//!
//! A coin is a commitment `g^serial * h^randomness mod p` to a secret serial number.
//! The [`PublicCoin`] (commitment value and denomination) is published and accumulated;
//! the [`PrivateCoin`] keeps the opening and is only used when spending.
//!
//! Parameters are produced elsewhere and shared as an immutable `Arc<Params>`; see
//! [`ParamsConfig`] for loading them from configuration.

/// Coin types.
pub mod coin;
/// Parameter loading from files and the environment.
pub mod config;
/// Error types.
pub mod error;
/// Scheme parameters.
pub mod params;
/// Arithmetic primitives.
pub mod primitives;

pub use coin::{Denomination, PrivateCoin, PublicCoin, MAX_COINMINT_ATTEMPTS};
pub use config::ParamsConfig;
pub use error::Error;
pub use params::{AccumulatorParams, IntegerGroupParams, Params, DEFAULT_ZKP_ITERATIONS};

/// Result type for coin operations.
pub type Result<T> = core::result::Result<T, Error>;
