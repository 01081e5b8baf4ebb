//! Public and private coins.

/// Coin face-value tiers.
pub mod denomination;
/// Secret half of a coin.
pub mod private;
/// Published half of a coin.
pub mod public;

pub use denomination::Denomination;
pub use private::{PrivateCoin, MAX_COINMINT_ATTEMPTS};
pub use public::PublicCoin;
