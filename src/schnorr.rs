use crate::census::Address;
use crate::curve::PairingCurve;
use crate::error::{Error, Result};
use crate::utils::keccak256;
use log::debug;

/// Domain tag used unless a `Config` says otherwise.
pub const DEFAULT_SCHNORR_DST: &str = "BATRAVOT_SCHNORR_POK_V1";

/// Non-interactive proof of knowledge of the secret key behind `P = sk * G`,
/// made by and for one registering address.
///
/// The prover picks a nonce `k` and sends `T = k * G` and `s = k + e * sk`
/// with `e = H(dst || address || P || T)`. The verifier accepts iff
/// `s * G == T + e * P`. Registration requires one so that nobody can
/// register a key derived from other voters' keys, nor reuse somebody
/// else's proof from a different address.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchnorrProof<C: PairingCurve> {
    /// `T`
    pub commitment: C::G1,
    /// `s`
    pub response: C::Scalar,
}

impl<C: PairingCurve> SchnorrProof<C> {
    pub fn prove(secret: &C::Scalar, public: &C::G1, caller: &Address, dst: &[u8]) -> Self {
        let nonce = C::random_scalar();
        let commitment = C::g1_mul(&C::g1_generator(), &nonce);
        let e = challenge::<C>(dst, caller, public, &commitment);
        let response = C::scalar_add(&nonce, &C::scalar_mul(&e, secret));

        Self {
            commitment,
            response,
        }
    }

    pub fn verify(&self, public: &C::G1, caller: &Address, dst: &[u8]) -> bool {
        if C::g1_is_identity(public) {
            debug!("schnorr: identity public key");
            return false;
        }
        let e = challenge::<C>(dst, caller, public, &self.commitment);
        let lhs = C::g1_mul(&C::g1_generator(), &self.response);
        let rhs = C::g1_add(&self.commitment, &C::g1_mul(public, &e));
        lhs == rhs
    }

    /// `T || s`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = C::g1_to_bytes(&self.commitment);
        bytes.extend(C::scalar_to_bytes(&self.response));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point_len = C::g1_to_bytes(&C::g1_generator()).len();
        if bytes.len() <= point_len {
            return Err(Error::InvalidPoint);
        }
        let (t, s) = bytes.split_at(point_len);
        let commitment = C::g1_from_bytes(t).ok_or(Error::InvalidPoint)?;
        let response = C::scalar_from_bytes(s).ok_or(Error::InvalidScalar)?;
        Ok(Self {
            commitment,
            response,
        })
    }
}

/// Verifies a proof given as raw encodings. Malformed input of any kind is
/// simply an invalid proof.
pub fn verify_bytes<C: PairingCurve>(
    public: &[u8],
    caller: &Address,
    proof: &[u8],
    dst: &[u8],
) -> bool {
    let public = match C::g1_from_bytes(public) {
        Some(p) => p,
        None => return false,
    };
    match SchnorrProof::<C>::from_bytes(proof) {
        Ok(proof) => proof.verify(&public, caller, dst),
        Err(_) => false,
    }
}

fn challenge<C: PairingCurve>(
    dst: &[u8],
    caller: &Address,
    public: &C::G1,
    commitment: &C::G1,
) -> C::Scalar {
    let public = C::g1_to_bytes(public);
    let commitment = C::g1_to_bytes(commitment);
    let digest = keccak256(&[
        dst,
        caller.as_bytes(),
        public.as_slice(),
        commitment.as_slice(),
    ]);
    C::scalar_from_digest(&digest)
}
