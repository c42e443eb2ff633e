use crate::curve::PairingCurve;
use crate::voter::VoterKey;
use crate::Address;
use rand::Rng;
use std::convert::TryInto;

const P: u64 = (1 << 61) - 1;

fn reduce(x: u128) -> u64 {
    (x % P as u128) as u64
}

/// Integers modulo the Mersenne prime 2^61 - 1 standing in for G1, G2 and
/// the scalar field at once, with `e(a, b) = a * b`. Bilinear, so every
/// protocol equation holds exactly as on a real curve, but discrete logs
/// are trivial.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct MockCurve;

impl PairingCurve for MockCurve {
    type Scalar = u64;
    type G1 = u64;
    type G2 = u64;

    fn g1_generator() -> u64 {
        1
    }

    fn g2_generator() -> u64 {
        1
    }

    fn g1_identity() -> u64 {
        0
    }

    fn g1_is_identity(p: &u64) -> bool {
        *p == 0
    }

    fn g1_mul(p: &u64, s: &u64) -> u64 {
        reduce(*p as u128 * *s as u128)
    }

    fn g2_mul(p: &u64, s: &u64) -> u64 {
        reduce(*p as u128 * *s as u128)
    }

    fn g1_add(a: &u64, b: &u64) -> u64 {
        reduce(*a as u128 + *b as u128)
    }

    fn scalar_add(a: &u64, b: &u64) -> u64 {
        reduce(*a as u128 + *b as u128)
    }

    fn scalar_mul(a: &u64, b: &u64) -> u64 {
        reduce(*a as u128 * *b as u128)
    }

    fn random_scalar() -> u64 {
        rand::thread_rng().gen_range(1, P)
    }

    fn scalar_from_digest(digest: &[u8; 32]) -> u64 {
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        reduce(u64::from_be_bytes(head) as u128)
    }

    fn g1_to_bytes(p: &u64) -> Vec<u8> {
        p.to_be_bytes().to_vec()
    }

    fn g2_to_bytes(p: &u64) -> Vec<u8> {
        p.to_be_bytes().to_vec()
    }

    fn scalar_to_bytes(s: &u64) -> Vec<u8> {
        s.to_be_bytes().to_vec()
    }

    fn g1_from_bytes(bytes: &[u8]) -> Option<u64> {
        decode(bytes)
    }

    fn g2_from_bytes(bytes: &[u8]) -> Option<u64> {
        decode(bytes)
    }

    fn scalar_from_bytes(bytes: &[u8]) -> Option<u64> {
        decode(bytes)
    }

    fn pairing_products_equal(lhs: &[(u64, u64)], rhs: &[(u64, u64)]) -> bool {
        // the target group is additive here: a product of pairings is a sum
        let fold = |pairs: &[(u64, u64)]| {
            pairs
                .iter()
                .fold(0u64, |acc, (a, b)| reduce(acc as u128 + *a as u128 * *b as u128))
        };
        fold(lhs) == fold(rhs)
    }
}

fn decode(bytes: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = bytes.try_into().ok()?;
    let value = u64::from_be_bytes(bytes);
    if value < P {
        Some(value)
    } else {
        None
    }
}

/// A deterministic, distinct address per index.
pub(crate) fn address(i: usize) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xaa;
    bytes[12..].copy_from_slice(&(i as u64).to_be_bytes());
    Address::from(bytes)
}

pub(crate) struct TestVoter<C: PairingCurve> {
    pub address: Address,
    pub key: VoterKey<C>,
    pub weight: u64,
}

pub(crate) fn voters<C: PairingCurve>(weights: &[u64]) -> Vec<TestVoter<C>> {
    weights
        .iter()
        .enumerate()
        .map(|(i, weight)| TestVoter {
            address: address(i),
            key: VoterKey::random(),
            weight: *weight,
        })
        .collect()
}
