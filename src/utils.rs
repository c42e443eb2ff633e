use blst::{blst_bendian_from_scalar, blst_scalar, blst_scalar_from_be_bytes};
use blsttc::ff::{Field, PrimeField}; // for Fr trait
use blsttc::group::{CurveAffine, CurveProjective, EncodedPoint};
use blsttc::pairing::bls12_381::{Fr, FrRepr, G1Affine, G2Affine, G1, G2};
use sha3::{Digest, Keccak256};

pub(crate) const G1_BYTES: usize = 48;
pub(crate) const G2_BYTES: usize = 96;
pub(crate) const FR_BYTES: usize = 32;

/// Keccak-256 over the concatenation of `parts`.
pub(crate) fn keccak256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

// see blsttc util.rs
// Returns None when the bytes encode a value >= the group order.
pub(crate) fn fr_from_be_bytes(bytes: [u8; FR_BYTES]) -> Option<Fr> {
    let mut le_bytes = bytes;
    le_bytes.reverse();
    let mut fr_u64s = [0u64; 4];
    for (i, limb) in fr_u64s.iter_mut().enumerate() {
        let mut next_u64_bytes = [0u8; 8];
        next_u64_bytes.copy_from_slice(&le_bytes[i * 8..(i + 1) * 8]);
        *limb = u64::from_le_bytes(next_u64_bytes);
    }
    Fr::from_repr(FrRepr(fr_u64s)).ok()
}

pub(crate) fn fr_to_be_bytes(fr: Fr) -> [u8; FR_BYTES] {
    let repr = fr.into_repr();
    let mut bytes = [0u8; FR_BYTES];
    // limbs are little-endian, most significant limb goes first
    for (i, limb) in repr.0.iter().enumerate() {
        let start = (3 - i) * 8;
        bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

// Arbitrary-length big-endian input reduced mod r, so a hash digest
// always lands on a field element.
pub(crate) fn fr_from_digest(digest: &[u8]) -> Fr {
    let mut scalar: blst_scalar = Default::default();
    let mut reduced = [0u8; FR_BYTES];
    unsafe {
        blst_scalar_from_be_bytes(&mut scalar, digest.as_ptr(), digest.len());
        blst_bendian_from_scalar(reduced.as_mut_ptr(), &scalar);
    }
    fr_from_be_bytes(reduced).unwrap_or_else(Fr::zero)
}

// see blsttc PublicKey from_bytes
// into_affine rejects points off the curve and outside the prime order subgroup.
pub(crate) fn be_bytes_to_g1(bytes: [u8; G1_BYTES]) -> Option<G1> {
    let mut compressed: <G1Affine as CurveAffine>::Compressed = EncodedPoint::empty();
    compressed.as_mut().copy_from_slice(&bytes);
    let opt_affine = compressed.into_affine().ok();
    opt_affine.map(|affine| affine.into_projective())
}

// see blsttc PublicKey to_bytes
pub(crate) fn g1_to_be_bytes(g1: G1) -> [u8; G1_BYTES] {
    let mut bytes = [0u8; G1_BYTES];
    bytes.copy_from_slice(g1.into_affine().into_compressed().as_ref());
    bytes
}

// see blsttc Signature from_bytes
pub(crate) fn be_bytes_to_g2(bytes: [u8; G2_BYTES]) -> Option<G2> {
    let mut compressed: <G2Affine as CurveAffine>::Compressed = EncodedPoint::empty();
    compressed.as_mut().copy_from_slice(&bytes);
    let opt_affine = compressed.into_affine().ok();
    opt_affine.map(|affine| affine.into_projective())
}

// see blsttc Signature to_bytes
pub(crate) fn g2_to_be_bytes(g2: G2) -> [u8; G2_BYTES] {
    let mut bytes = [0u8; G2_BYTES];
    bytes.copy_from_slice(g2.into_affine().into_compressed().as_ref());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fr_bytes_survive_a_trip() {
        let mut bytes = [0u8; FR_BYTES];
        bytes[31] = 7;
        bytes[0] = 0x12;
        let fr = fr_from_be_bytes(bytes).unwrap();
        assert_eq!(fr_to_be_bytes(fr), bytes);
    }

    #[test]
    fn fr_rejects_values_above_the_order() {
        assert!(fr_from_be_bytes([0xff; FR_BYTES]).is_none());
    }

    #[test]
    fn digest_is_reduced_into_the_field() {
        let digest = [0xff; 32];
        let fr = fr_from_digest(&digest);
        assert!(!fr.is_zero());
        assert_eq!(fr_from_be_bytes(fr_to_be_bytes(fr)), Some(fr));
    }

    #[test]
    fn garbage_is_not_a_g1_point() {
        assert!(be_bytes_to_g1([0x11; G1_BYTES]).is_none());
    }

    #[test]
    fn generator_compresses_and_decompresses() {
        let g1 = G1::one();
        assert_eq!(be_bytes_to_g1(g1_to_be_bytes(g1)), Some(g1));
        let g2 = G2::one();
        assert_eq!(be_bytes_to_g2(g2_to_be_bytes(g2)), Some(g2));
    }
}
