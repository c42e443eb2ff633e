use crate::curve::PairingCurve;
use crate::specifiers::{ElectionSpecifiers, Specifier};
use log::debug;

/// Checks an aggregate of ballots against the claimed voters:
///
/// ```text
/// e(proof, G2) == e(sum_for pk_i, yes_g2) * e(sum_against pk_j, no_g2)
/// ```
///
/// Holds for honest ballots because both halves of a specifier hide the
/// same scalar. The pairing count is fixed, only the key sums grow.
pub fn verify_batch<C: PairingCurve>(
    specifiers: &ElectionSpecifiers<C>,
    for_keys: &[C::G1],
    against_keys: &[C::G1],
    proof: &C::G1,
) -> bool {
    let for_sum = C::g1_sum(for_keys);
    let against_sum = C::g1_sum(against_keys);
    debug!(
        "verifying batch of {} for / {} against",
        for_keys.len(),
        against_keys.len()
    );

    C::pairing_products_equal(
        &[(*proof, C::g2_generator())],
        &[
            (for_sum, specifiers.yes.g2),
            (against_sum, specifiers.no.g2),
        ],
    )
}

/// Single option form: `e(proof, G2) == e(sum_for pk_i, yes_g2)`.
pub fn verify_for_batch<C: PairingCurve>(
    yes: &Specifier<C>,
    for_keys: &[C::G1],
    proof: &C::G1,
) -> bool {
    let for_sum = C::g1_sum(for_keys);
    debug!("verifying batch of {} for", for_keys.len());

    C::pairing_products_equal(&[(*proof, C::g2_generator())], &[(for_sum, yes.g2)])
}
