use crate::batch::verify_batch;
use crate::census::IndexedCensus;
use crate::config::Config;
use crate::curve::{Bls12Curve, PairingCurve};
use crate::election::{Election, ElectionId, ElectionState};
use crate::error::{Error, Result};
use crate::specifiers::ElectionSpecifiers;
use crate::tally::{tally_counts, CountResult};
use log::{info, warn};

pub type OpenElection<C> = Election<C, CountResult>;

#[derive(Clone, Debug)]
struct Record<C: PairingCurve> {
    election: OpenElection<C>,
    census: IndexedCensus<C>,
}

/// Registry of elections with an open census: anybody can add a key and
/// voters are referenced by the index their key got. Only heads are counted.
///
/// There is no proof of knowledge, so a rogue key can cancel other keys out
/// of a batch sum. Use [`crate::BatRaVot`] where that matters.
#[derive(Clone, Debug, Default)]
pub struct OpenElections<C: PairingCurve = Bls12Curve> {
    config: Config,
    elections: Vec<Record<C>>,
}

impl<C: PairingCurve> OpenElections<C> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            elections: Vec::new(),
        }
    }

    pub fn create_election(
        &mut self,
        topic: impl Into<String>,
        specifiers: ElectionSpecifiers<C>,
    ) -> ElectionId {
        debug_assert!(specifiers.is_consistent(), "inconsistent election specifiers");
        let id = self.elections.len() as ElectionId;
        let topic = topic.into();
        info!("open election {} created: {}", id, topic);
        self.elections.push(Record {
            election: Election::new(id, topic, specifiers),
            census: IndexedCensus::new(),
        });
        id
    }

    /// Adds `public_key` to the census and returns its index. A key can only
    /// be added once.
    pub fn register_in_census(&mut self, id: ElectionId, public_key: C::G1) -> Result<usize> {
        let record = self.record_mut(id)?;
        record.election.ensure_pending()?;
        if C::g1_is_identity(&public_key) {
            warn!("open election {}: identity key refused", id);
            return Err(Error::InvalidPoint);
        }
        let index = record.census.push(public_key)?;
        info!("open election {}: key registered at index {}", id, index);
        Ok(index)
    }

    pub fn submit_votes_with_proof(
        &mut self,
        id: ElectionId,
        yes: &[usize],
        no: &[usize],
        proof: &C::G1,
    ) -> Result<()> {
        let size = yes.len() + no.len();
        self.config.check_batch_size(size)?;

        let record = self.record_mut(id)?;
        record.election.ensure_pending()?;
        if size == 0 {
            return Err(Error::VerificationFailed);
        }

        let (yes_keys, no_keys) = record.census.resolve(yes, no)?;
        if !verify_batch(&record.election.specifiers, &yes_keys, &no_keys, proof) {
            warn!("open election {}: batch of {} rejected", id, size);
            return Err(Error::VerificationFailed);
        }

        record.election.result =
            tally_counts(&mut record.census, &record.election.result, yes, no)?;
        info!(
            "open election {}: batch of {} accepted, result now {:?}",
            id, size, record.election.result
        );
        Ok(())
    }

    pub fn close_election(&mut self, id: ElectionId) -> Result<()> {
        let election = &mut self.record_mut(id)?.election;
        election.ensure_pending()?;
        election.state = ElectionState::Closed;
        info!("open election {} closed: {:?}", id, election.result);
        Ok(())
    }

    pub fn election(&self, id: ElectionId) -> Result<&OpenElection<C>> {
        Ok(&self.record(id)?.election)
    }

    pub fn census(&self, id: ElectionId) -> Result<&IndexedCensus<C>> {
        Ok(&self.record(id)?.census)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockCurve;
    use crate::voter::{aggregate, Ballot, Vote, VoterKey};

    fn setup<C: PairingCurve>(count: usize) -> Result<(OpenElections<C>, ElectionId, Vec<VoterKey<C>>)> {
        let mut registry = OpenElections::new();
        let id = registry.create_election("Open", ElectionSpecifiers::generate());
        let keys: Vec<VoterKey<C>> = (0..count).map(|_| VoterKey::random()).collect();
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(registry.register_in_census(id, *key.public_key())?, i);
        }
        Ok((registry, id, keys))
    }

    fn proof<C: PairingCurve>(
        registry: &OpenElections<C>,
        id: ElectionId,
        keys: &[VoterKey<C>],
        yes: &[usize],
        no: &[usize],
    ) -> Result<C::G1> {
        let specifiers = registry.election(id)?.specifiers;
        let ballots: Vec<Ballot<C>> = yes
            .iter()
            .map(|i| keys[*i].ballot(&specifiers, Vote::For))
            .chain(no.iter().map(|i| keys[*i].ballot(&specifiers, Vote::Against)))
            .collect();
        Ok(aggregate(&ballots))
    }

    #[test]
    fn counts_voters_across_batches() -> Result<()> {
        let (mut registry, id, keys) = setup::<Bls12Curve>(4)?;

        let p = proof(&registry, id, &keys, &[0, 2], &[1])?;
        registry.submit_votes_with_proof(id, &[0, 2], &[1], &p)?;
        let p = proof(&registry, id, &keys, &[2], &[3])?;
        registry.submit_votes_with_proof(id, &[2], &[3], &p)?;

        registry.close_election(id)?;
        let election = registry.election(id)?;
        assert_eq!(election.state, ElectionState::Closed);
        assert_eq!(
            election.result,
            CountResult {
                total_voters: 4,
                yes_voters: 2,
            }
        );
        Ok(())
    }

    #[test]
    fn wrong_option_fails() -> Result<()> {
        let (mut registry, id, keys) = setup::<MockCurve>(2)?;
        let p = proof(&registry, id, &keys, &[0], &[])?;
        assert!(matches!(
            registry.submit_votes_with_proof(id, &[], &[0], &p),
            Err(Error::VerificationFailed)
        ));
        assert!(!registry.census(id)?.has_voted(0));
        Ok(())
    }

    #[test]
    fn unknown_index_fails() -> Result<()> {
        let (mut registry, id, keys) = setup::<MockCurve>(1)?;
        let p = proof(&registry, id, &keys, &[0], &[])?;
        assert!(matches!(
            registry.submit_votes_with_proof(id, &[0, 1], &[], &p),
            Err(Error::VerificationFailed)
        ));
        Ok(())
    }

    #[test]
    fn identity_key_is_refused() -> Result<()> {
        let (mut registry, id, _) = setup::<MockCurve>(0)?;
        assert!(matches!(
            registry.register_in_census(id, MockCurve::g1_identity()),
            Err(Error::InvalidPoint)
        ));
        assert!(registry.census(id)?.is_empty());
        Ok(())
    }

    #[test]
    fn duplicate_key_is_refused() -> Result<()> {
        let (mut registry, id, keys) = setup::<MockCurve>(2)?;
        assert!(matches!(
            registry.register_in_census(id, *keys[0].public_key()),
            Err(Error::KeyAlreadyRegistered)
        ));
        assert_eq!(registry.census(id)?.len(), 2);
        Ok(())
    }

    #[test]
    fn closed_election_is_frozen() -> Result<()> {
        let (mut registry, id, keys) = setup::<MockCurve>(1)?;
        let p = proof(&registry, id, &keys, &[0], &[])?;
        registry.close_election(id)?;
        assert!(matches!(
            registry.submit_votes_with_proof(id, &[0], &[], &p),
            Err(Error::InvalidState)
        ));
        assert!(matches!(
            registry.register_in_census(id, *keys[0].public_key()),
            Err(Error::InvalidState)
        ));
        assert!(matches!(registry.close_election(id), Err(Error::InvalidState)));
        Ok(())
    }
}
