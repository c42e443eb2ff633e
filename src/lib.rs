mod batch;
mod batravot;
mod census;
mod config;
mod curve;
mod election;
mod error;
mod multisig;
mod open;
mod schnorr;
mod specifiers;
mod tally;
mod token;
mod utils;
mod voter;

#[cfg(test)]
mod test_utils;

pub use crate::batch::{verify_batch, verify_for_batch};
pub use crate::batravot::BatRaVot;
pub use crate::census::{Address, Census, CensusEntry, IndexedCensus};
pub use crate::config::Config;
pub use crate::curve::{Bls12Curve, PairingCurve};
pub use crate::election::{Election, ElectionId, ElectionState, MultiSigState, ThresholdElection};
pub use crate::error::{BatRaVotError, Error, Result};
pub use crate::multisig::MultiSig;
pub use crate::open::{OpenElection, OpenElections};
pub use crate::schnorr::{verify_bytes, SchnorrProof, DEFAULT_SCHNORR_DST};
pub use crate::specifiers::{ElectionSpecifiers, Specifier};
pub use crate::tally::{CountResult, WeightedResult};
pub use crate::token::{BalanceSource, TokenLedger};
pub use crate::voter::{aggregate, Ballot, Vote, VoterKey};
