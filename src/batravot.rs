use crate::batch::verify_batch;
use crate::census::{Address, Census, CensusEntry};
use crate::config::Config;
use crate::curve::{Bls12Curve, PairingCurve};
use crate::election::{Election, ElectionId, ElectionState};
use crate::error::{Error, Result};
use crate::schnorr::SchnorrProof;
use crate::specifiers::ElectionSpecifiers;
use crate::tally::tally_weighted;
use crate::token::BalanceSource;
use log::{info, warn};

#[derive(Clone, Debug)]
struct Record<C: PairingCurve> {
    election: Election<C>,
    census: Census<C>,
}

/// Registry of token weighted yes/no elections.
///
/// Voters register a key with a Schnorr proof of knowledge and get their
/// token balance snapshotted as voting weight. Batchers then submit one
/// aggregate proof for many voters at a time; each verified voter is
/// credited once. Closing carries no verdict.
///
/// Owns every election it created and their censuses. Mutation goes through
/// `&mut self`, so each operation runs to completion before the next one;
/// share it between threads behind a `Mutex`.
#[derive(Debug)]
pub struct BatRaVot<B: BalanceSource, C: PairingCurve = Bls12Curve> {
    tokens: B,
    config: Config,
    elections: Vec<Record<C>>,
}

impl<B: BalanceSource, C: PairingCurve> BatRaVot<B, C> {
    pub fn new(tokens: B) -> Self {
        Self::with_config(tokens, Config::default())
    }

    pub fn with_config(tokens: B, config: Config) -> Self {
        Self {
            tokens,
            config,
            elections: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self) -> &B {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut B {
        &mut self.tokens
    }

    /// Specifiers are taken as given. Whoever receives them from elsewhere
    /// should check [`ElectionSpecifiers::is_consistent`] first: with a
    /// degenerate G2 half an identity proof verifies for any voter set.
    pub fn create_election(
        &mut self,
        topic: impl Into<String>,
        specifiers: ElectionSpecifiers<C>,
    ) -> ElectionId {
        debug_assert!(specifiers.is_consistent(), "inconsistent election specifiers");
        let id = self.elections.len() as ElectionId;
        let topic = topic.into();
        info!("election {} created: {}", id, topic);
        self.elections.push(Record {
            election: Election::new(id, topic, specifiers),
            census: Census::new(),
        });
        id
    }

    /// Registers `caller` with `public_key`, weighted by the caller's token
    /// balance at this moment. The proof must have been made for `caller`,
    /// and neither the address nor the key may be registered already.
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
            warn!("election {}: {} refused: {}", id, caller, e);
            return Err(e);
        }
        if !proof.verify(&public_key, &caller, self.config.schnorr_dst.as_bytes()) {
            warn!("election {}: key proof from {} rejected", id, caller);
            return Err(Error::VerificationFailed);
        }

        let weight = self.tokens.balance_of(&caller);
        self.record_mut(id)?
            .census
            .register(caller, public_key, weight)?;
        info!("election {}: registered {} with weight {}", id, caller, weight);
        Ok(())
    }

    pub fn submit_votes_with_proof(
        &mut self,
        id: ElectionId,
        for_voters: &[Address],
        against_voters: &[Address],
        proof: &C::G1,
    ) -> Result<()> {
        let size = for_voters.len() + against_voters.len();
        self.config.check_batch_size(size)?;

        let record = self.record_mut(id)?;
        record.election.ensure_pending()?;
        if size == 0 {
            warn!("election {}: empty submission", id);
            return Err(Error::VerificationFailed);
        }

        let (for_keys, against_keys) = record.census.resolve(for_voters, against_voters)?;
        if !verify_batch(
            &record.election.specifiers,
            &for_keys,
            &against_keys,
            proof,
        ) {
            warn!("election {}: batch of {} rejected", id, size);
            return Err(Error::VerificationFailed);
        }

        record.election.result = tally_weighted(
            &mut record.census,
            &record.election.result,
            for_voters,
            against_voters,
        )?;
        info!(
            "election {}: batch of {} accepted, result now {:?}",
            id, size, record.election.result
        );
        Ok(())
    }

    pub fn close_election(&mut self, id: ElectionId) -> Result<()> {
        let record = self.record_mut(id)?;
        record.election.ensure_pending()?;
        record.election.state = ElectionState::Closed;
        info!("election {} closed: {:?}", id, record.election.result);
        Ok(())
    }

    pub fn election(&self, id: ElectionId) -> Result<&Election<C>> {
        Ok(&self.record(id)?.election)
    }

    pub fn census(&self, id: ElectionId) -> Result<&Census<C>> {
        Ok(&self.record(id)?.census)
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
