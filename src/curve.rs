use crate::utils::*;
use blsttc::ff::Field;
use blsttc::group::CurveProjective;
use blsttc::pairing::bls12_381::{Bls12, Fr, G1, G2};
use blsttc::pairing::Engine;
use blsttc::SecretKey;
use std::convert::TryInto;
use std::fmt::Debug;

/// Everything the protocol needs from a curve: point arithmetic, codecs and
/// comparing products of pairings.
pub trait PairingCurve: Copy + Debug + Default + PartialEq {
    type Scalar: Copy + Debug + PartialEq;
    type G1: Copy + Debug + PartialEq;
    type G2: Copy + Debug + PartialEq;

    fn g1_generator() -> Self::G1;
    fn g2_generator() -> Self::G2;
    fn g1_identity() -> Self::G1;
    fn g1_is_identity(p: &Self::G1) -> bool;

    fn g1_mul(p: &Self::G1, s: &Self::Scalar) -> Self::G1;
    fn g2_mul(p: &Self::G2, s: &Self::Scalar) -> Self::G2;
    fn g1_add(a: &Self::G1, b: &Self::G1) -> Self::G1;

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
    /// A uniformly random non-zero scalar.
    fn random_scalar() -> Self::Scalar;
    /// Interprets a hash digest as a big-endian integer reduced mod the group order.
    fn scalar_from_digest(digest: &[u8; 32]) -> Self::Scalar;

    fn g1_to_bytes(p: &Self::G1) -> Vec<u8>;
    fn g2_to_bytes(p: &Self::G2) -> Vec<u8>;
    fn scalar_to_bytes(s: &Self::Scalar) -> Vec<u8>;
    /// None unless `bytes` is a canonical encoding of a subgroup point.
    fn g1_from_bytes(bytes: &[u8]) -> Option<Self::G1>;
    fn g2_from_bytes(bytes: &[u8]) -> Option<Self::G2>;
    fn scalar_from_bytes(bytes: &[u8]) -> Option<Self::Scalar>;

    /// `prod e(a_i, b_i) == prod e(c_j, d_j)`
    fn pairing_products_equal(lhs: &[(Self::G1, Self::G2)], rhs: &[(Self::G1, Self::G2)]) -> bool;

    fn g1_sum<'a, I>(points: I) -> Self::G1
    where
        I: IntoIterator<Item = &'a Self::G1>,
        Self::G1: 'a,
    {
        points
            .into_iter()
            .fold(Self::g1_identity(), |acc, p| Self::g1_add(&acc, p))
    }
}

/// BLS12-381 through blsttc. Public keys and ballots live in G1,
/// the pairing side of the specifiers in G2.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bls12Curve;

fn pairing_product(pairs: &[(G1, G2)]) -> <Bls12 as Engine>::Fqk {
    pairs.iter().fold(<Bls12 as Engine>::Fqk::one(), |mut acc, (p, q)| {
        acc.mul_assign(&Bls12::pairing(p.into_affine(), q.into_affine()));
        acc
    })
}

impl PairingCurve for Bls12Curve {
    type Scalar = Fr;
    type G1 = G1;
    type G2 = G2;

    fn g1_generator() -> G1 {
        G1::one()
    }

    fn g2_generator() -> G2 {
        G2::one()
    }

    fn g1_identity() -> G1 {
        G1::zero()
    }

    fn g1_is_identity(p: &G1) -> bool {
        p.is_zero()
    }

    fn g1_mul(p: &G1, s: &Fr) -> G1 {
        let mut product = *p;
        product.mul_assign(*s);
        product
    }

    fn g2_mul(p: &G2, s: &Fr) -> G2 {
        let mut product = *p;
        product.mul_assign(*s);
        product
    }

    fn g1_add(a: &G1, b: &G1) -> G1 {
        let mut sum = *a;
        sum.add_assign(b);
        sum
    }

    fn scalar_add(a: &Fr, b: &Fr) -> Fr {
        let mut sum = *a;
        sum.add_assign(b);
        sum
    }

    fn scalar_mul(a: &Fr, b: &Fr) -> Fr {
        let mut product = *a;
        product.mul_assign(b);
        product
    }

    fn random_scalar() -> Fr {
        // a fresh blsttc secret key is a uniformly random Fr
        loop {
            if let Some(fr) = fr_from_be_bytes(SecretKey::random().to_bytes()) {
                if !fr.is_zero() {
                    return fr;
                }
            }
        }
    }

    fn scalar_from_digest(digest: &[u8; 32]) -> Fr {
        fr_from_digest(digest)
    }

    fn g1_to_bytes(p: &G1) -> Vec<u8> {
        g1_to_be_bytes(*p).to_vec()
    }

    fn g2_to_bytes(p: &G2) -> Vec<u8> {
        g2_to_be_bytes(*p).to_vec()
    }

    fn scalar_to_bytes(s: &Fr) -> Vec<u8> {
        fr_to_be_bytes(*s).to_vec()
    }

    fn g1_from_bytes(bytes: &[u8]) -> Option<G1> {
        let bytes: [u8; G1_BYTES] = bytes.try_into().ok()?;
        be_bytes_to_g1(bytes)
    }

    fn g2_from_bytes(bytes: &[u8]) -> Option<G2> {
        let bytes: [u8; G2_BYTES] = bytes.try_into().ok()?;
        be_bytes_to_g2(bytes)
    }

    fn scalar_from_bytes(bytes: &[u8]) -> Option<Fr> {
        let bytes: [u8; FR_BYTES] = bytes.try_into().ok()?;
        fr_from_be_bytes(bytes)
    }

    fn pairing_products_equal(lhs: &[(G1, G2)], rhs: &[(G1, G2)]) -> bool {
        pairing_product(lhs) == pairing_product(rhs)
    }
}
