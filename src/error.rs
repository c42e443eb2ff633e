use blsttc::error::FromBytesError;
use std::array::TryFromSliceError;
use thiserror::Error;

/// Specialisation of `std::Result`.
pub type Result<T, E = BatRaVotError> = std::result::Result<T, E>;
pub type Error = BatRaVotError;

#[derive(Error, Debug)]
/// error variants.
pub enum BatRaVotError {
    /// Any failed Schnorr or aggregate check. Deliberately carries no
    /// detail about which part of the check failed.
    #[error("Verification check did not pass")]
    VerificationFailed,

    #[error("The election must be in Pending state")]
    InvalidState,

    #[error("No election with id {0}")]
    UnknownElection(u64),

    #[error("The address is already registered in this election")]
    AlreadyRegistered,

    #[error("The public key is already registered in this election")]
    KeyAlreadyRegistered,

    #[error("The election threshold must be greater than zero")]
    InvalidThreshold,

    #[error("Batch of {size} voters exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Tally overflow")]
    TallyOverflow,

    #[error("Insufficient token balance")]
    InsufficientBalance,

    #[error("Token balance overflow")]
    BalanceOverflow,

    #[error("bytes are not a valid curve point")]
    InvalidPoint,

    #[error("bytes are not a valid scalar")]
    InvalidScalar,

    #[error("deserialization from bytes failed")]
    BlsttcFromBytes(#[from] FromBytesError),

    #[error("deserialization from bytes failed")]
    InvalidBytes(#[from] TryFromSliceError),

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
