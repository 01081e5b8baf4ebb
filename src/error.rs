//! Error types for Zerocoin coins

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Coin operations were attempted with parameters that were never initialized.
    #[error("Params are not initialized")]
    UninitializedParams,

    /// No opening produced a valid commitment within the retry bound.
    #[error("Commitment derivation failed after {attempts} attempts")]
    CommitmentDerivationFailed {
        /// Number of commitments that were tried.
        attempts: u32,
    },

    /// Invalid scheme parameters were provided.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A denomination code is unknown or not usable here.
    #[error("Invalid denomination: {0}")]
    InvalidDenomination(String),

    /// A serial number or randomness is out of range for the commitment group.
    #[error("Invalid coin opening: {0}")]
    InvalidOpening(String),

    /// A coin could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A configuration value could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}
