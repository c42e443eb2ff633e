use crate::curve::PairingCurve;
use crate::error::{Error, Result};
use crate::specifiers::{ElectionSpecifiers, Specifier};
use crate::tally::WeightedResult;
use serde::{Deserialize, Serialize};

/// Sequential, starting at 0, per registry.
pub type ElectionId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionState {
    Pending,
    Closed,
}

/// Terminal states of a threshold election tell whether it passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiSigState {
    Pending,
    Accepted,
    Rejected,
}

impl MultiSigState {
    pub fn is_closed(&self) -> bool {
        *self != MultiSigState::Pending
    }
}

/// A two-option election. `R` is the kind of result it keeps.
#[derive(Clone, Debug)]
pub struct Election<C: PairingCurve, R = WeightedResult> {
    pub id: ElectionId,
    pub topic: String,
    pub state: ElectionState,
    pub specifiers: ElectionSpecifiers<C>,
    pub result: R,
}

impl<C: PairingCurve, R: Default> Election<C, R> {
    pub(crate) fn new(id: ElectionId, topic: String, specifiers: ElectionSpecifiers<C>) -> Self {
        Self {
            id,
            topic,
            state: ElectionState::Pending,
            specifiers,
            result: R::default(),
        }
    }

    pub(crate) fn ensure_pending(&self) -> Result<()> {
        match self.state {
            ElectionState::Pending => Ok(()),
            ElectionState::Closed => Err(Error::InvalidState),
        }
    }
}

/// A single-option election that closes itself once `for_votes` reaches
/// `threshold`.
#[derive(Clone, Debug)]
pub struct ThresholdElection<C: PairingCurve> {
    pub id: ElectionId,
    pub topic: String,
    pub state: MultiSigState,
    pub yes: Specifier<C>,
    pub threshold: u64,
    pub for_votes: u64,
}

impl<C: PairingCurve> ThresholdElection<C> {
    pub(crate) fn ensure_pending(&self) -> Result<()> {
        if self.state.is_closed() {
            return Err(Error::InvalidState);
        }
        Ok(())
    }
}
