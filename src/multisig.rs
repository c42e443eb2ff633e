use crate::batch::verify_for_batch;
use crate::census::{Address, Census, CensusEntry};
use crate::config::Config;
use crate::curve::{Bls12Curve, PairingCurve};
use crate::election::{ElectionId, MultiSigState, ThresholdElection};
use crate::error::{Error, Result};
use crate::schnorr::SchnorrProof;
use crate::specifiers::Specifier;
use crate::tally::tally_for_votes;
use log::{info, warn};

/// Every registered voter counts as this many votes.
const VOTER_WEIGHT: u64 = 1;

#[derive(Clone, Debug)]
struct Record<C: PairingCurve> {
    election: ThresholdElection<C>,
    census: Census<C>,
}

/// Registry of threshold elections: a single option, one vote per
/// registered key. An election accepts itself the moment enough distinct
/// voters have been proven to vote for it.
#[derive(Clone, Debug, Default)]
pub struct MultiSig<C: PairingCurve = Bls12Curve> {
    config: Config,
    elections: Vec<Record<C>>,
}

impl<C: PairingCurve> MultiSig<C> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            elections: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `yes` is taken as given; check [`Specifier::is_consistent`] on
    /// specifiers received from elsewhere.
    pub fn create_election(
        &mut self,
        topic: impl Into<String>,
        yes: Specifier<C>,
        threshold: u64,
    ) -> Result<ElectionId> {
        debug_assert!(yes.is_consistent(), "inconsistent election specifier");
        if threshold == 0 {
            return Err(Error::InvalidThreshold);
        }
        let id = self.elections.len() as ElectionId;
        let topic = topic.into();
        info!("threshold election {} created: {} (needs {})", id, topic, threshold);
        self.elections.push(Record {
            election: ThresholdElection {
                id,
                topic,
                state: MultiSigState::Pending,
                yes,
                threshold,
                for_votes: 0,
            },
            census: Census::new(),
        });
        Ok(id)
    }

    pub fn register_voter(
        &mut self,
        id: ElectionId,
        caller: Address,
        public_key: C::G1,
        proof: &SchnorrProof<C>,
    ) -> Result<()> {
        let record = self.record(id)?;
        record.election.ensure_pending()?;
        if let Err(e) = record.census.check_vacant(&caller, &public_key) {
            warn!("threshold election {}: {} refused: {}", id, caller, e);
            return Err(e);
        }
        if !proof.verify(&public_key, &caller, self.config.schnorr_dst.as_bytes()) {
            warn!("threshold election {}: key proof from {} rejected", id, caller);
            return Err(Error::VerificationFailed);
        }

        self.record_mut(id)?
            .census
            .register(caller, public_key, VOTER_WEIGHT)?;
        info!("threshold election {}: registered {}", id, caller);
        Ok(())
    }

    /// Credits every voter in `for_voters` not credited before and returns
    /// the state afterwards, `Accepted` once the threshold is reached.
    pub fn submit_votes_with_proof(
        &mut self,
        id: ElectionId,
        for_voters: &[Address],
        proof: &C::G1,
    ) -> Result<MultiSigState> {
        self.config.check_batch_size(for_voters.len())?;

        let record = self.record_mut(id)?;
        record.election.ensure_pending()?;
        if for_voters.is_empty() {
            warn!("threshold election {}: empty submission", id);
            return Err(Error::VerificationFailed);
        }

        let (for_keys, _) = record.census.resolve(for_voters, &[])?;
        if !verify_for_batch(&record.election.yes, &for_keys, proof) {
            warn!(
                "threshold election {}: batch of {} rejected",
                id,
                for_voters.len()
            );
            return Err(Error::VerificationFailed);
        }

        let election = &mut record.election;
        election.for_votes = tally_for_votes(&mut record.census, election.for_votes, for_voters)?;
        if election.for_votes >= election.threshold {
            election.state = MultiSigState::Accepted;
            info!(
                "threshold election {} accepted with {} of {}",
                id, election.for_votes, election.threshold
            );
        } else {
            info!(
                "threshold election {}: {} of {}",
                id, election.for_votes, election.threshold
            );
        }
        Ok(election.state)
    }

    /// Closes an election that never reached its threshold.
    pub fn close_election(&mut self, id: ElectionId) -> Result<()> {
        let election = &mut self.record_mut(id)?.election;
        election.ensure_pending()?;
        election.state = MultiSigState::Rejected;
        info!(
            "threshold election {} rejected with {} of {}",
            id, election.for_votes, election.threshold
        );
        Ok(())
    }

    pub fn election(&self, id: ElectionId) -> Result<&ThresholdElection<C>> {
        Ok(&self.record(id)?.election)
    }

    pub fn census_entry(&self, id: ElectionId, address: &Address) -> Option<&CensusEntry<C>> {
        self.record(id).ok()?.census.get(address)
    }

    fn record(&self, id: ElectionId) -> Result<&Record<C>> {
        self.elections
            .get(id as usize)
            .ok_or(Error::UnknownElection(id))
    }

    fn record_mut(&mut self, id: ElectionId) -> Result<&mut Record<C>> {
        self.elections
            .get_mut(id as usize)
            .ok_or(Error::UnknownElection(id))
    }
}
