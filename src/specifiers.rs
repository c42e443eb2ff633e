use crate::curve::PairingCurve;

/// The same hidden scalar `h` in both groups: `(h * G1, h * G2)`.
///
/// Voters sign an option by multiplying its G1 side with their secret key;
/// the verifier pairs public keys against the G2 side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Specifier<C: PairingCurve> {
    pub g1: C::G1,
    pub g2: C::G2,
}

impl<C: PairingCurve> Specifier<C> {
    pub fn new(g1: C::G1, g2: C::G2) -> Self {
        Self { g1, g2 }
    }

    /// A fresh specifier whose scalar is dropped as soon as the points exist.
    /// Whoever knows `h` can turn any public key into a valid ballot.
    pub fn generate() -> Self {
        let h = C::random_scalar();
        Self {
            g1: C::g1_mul(&C::g1_generator(), &h),
            g2: C::g2_mul(&C::g2_generator(), &h),
        }
    }

    /// `e(g1, G2) == e(G1, g2)`, i.e. both halves hide the same scalar.
    pub fn is_consistent(&self) -> bool {
        !C::g1_is_identity(&self.g1)
            && C::pairing_products_equal(
                &[(self.g1, C::g2_generator())],
                &[(C::g1_generator(), self.g2)],
            )
    }
}

/// The verification context of a two-option election.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectionSpecifiers<C: PairingCurve> {
    pub yes: Specifier<C>,
    pub no: Specifier<C>,
}

impl<C: PairingCurve> ElectionSpecifiers<C> {
    pub fn new(yes: Specifier<C>, no: Specifier<C>) -> Self {
        Self { yes, no }
    }

    pub fn generate() -> Self {
        Self {
            yes: Specifier::generate(),
            no: Specifier::generate(),
        }
    }

    /// What a voter should check before signing anything against these points.
    pub fn is_consistent(&self) -> bool {
        self.yes != self.no && self.yes.is_consistent() && self.no.is_consistent()
    }
}
