use crate::batch::verify_batch;
use crate::census::Address;
use crate::curve::{Bls12Curve, PairingCurve};
use crate::error::{Error, Result};
use crate::schnorr::SchnorrProof;
use crate::specifiers::{ElectionSpecifiers, Specifier};
use crate::utils::fr_from_be_bytes;
use blsttc::SecretKey;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    For,
    Against,
}

/// A voter's election key pair, `public = secret * G1`.
#[derive(Clone, Copy, Debug)]
pub struct VoterKey<C: PairingCurve> {
    secret: C::Scalar,
    public: C::G1,
}

impl<C: PairingCurve> VoterKey<C> {
    pub fn random() -> Self {
        Self::from_secret(C::random_scalar())
    }

    pub fn from_secret(secret: C::Scalar) -> Self {
        let public = C::g1_mul(&C::g1_generator(), &secret);
        Self { secret, public }
    }

    pub fn public_key(&self) -> &C::G1 {
        &self.public
    }

    /// Proof of knowledge for registering this key from `caller`.
    pub fn prove_knowledge(&self, caller: &Address, dst: &[u8]) -> SchnorrProof<C> {
        SchnorrProof::prove(&self.secret, &self.public, caller, dst)
    }

    /// `secret * specifier.g1`
    pub fn sign(&self, specifier: &Specifier<C>) -> C::G1 {
        C::g1_mul(&specifier.g1, &self.secret)
    }

    pub fn ballot(&self, specifiers: &ElectionSpecifiers<C>, vote: Vote) -> Ballot<C> {
        let specifier = match vote {
            Vote::For => &specifiers.yes,
            Vote::Against => &specifiers.no,
        };
        Ballot {
            vote,
            public_key: self.public,
            signature: self.sign(specifier),
        }
    }
}

impl VoterKey<Bls12Curve> {
    pub fn from_secret_bytes(b: [u8; 32]) -> Result<Self> {
        let sk = SecretKey::from_bytes(b)?;
        let secret = fr_from_be_bytes(sk.to_bytes()).ok_or(Error::InvalidScalar)?;
        Ok(Self::from_secret(secret))
    }
}

/// One voter's signed choice, as handed to a batcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ballot<C: PairingCurve> {
    pub vote: Vote,
    pub public_key: C::G1,
    pub signature: C::G1,
}

impl<C: PairingCurve> Ballot<C> {
    /// A single ballot is an election proof for a batch of one.
    pub fn verify(&self, specifiers: &ElectionSpecifiers<C>) -> bool {
        let key = [self.public_key];
        match self.vote {
            Vote::For => verify_batch(specifiers, &key, &[], &self.signature),
            Vote::Against => verify_batch(specifiers, &[], &key, &self.signature),
        }
    }
}

/// The batched election proof is the plain sum of the ballot signatures.
pub fn aggregate<'a, C, I>(ballots: I) -> C::G1
where
    C: PairingCurve + 'a,
    I: IntoIterator<Item = &'a Ballot<C>>,
{
    ballots
        .into_iter()
        .fold(C::g1_identity(), |acc, ballot| C::g1_add(&acc, &ballot.signature))
}
