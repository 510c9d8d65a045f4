//! Property-based tests for four-momentum algebra.

use hep_common::{Error, FourMomentum};
use proptest::prelude::*;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

fn four_momentum() -> impl Strategy<Value = FourMomentum> {
    (0.0..500.0f64, -200.0..200.0f64, -200.0..200.0f64, -200.0..200.0f64)
        .prop_map(|(e, px, py, pz)| FourMomentum::new(e, px, py, pz))
}

/// Velocities with β² < 0.81 so γ stays moderate.
fn velocity() -> impl Strategy<Value = (f64, f64, f64)> {
    (-0.5..0.5f64, -0.5..0.5f64, -0.5..0.5f64)
}

// ============================================================================
// Algebra
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn additive_inverse(v in four_momentum()) {
        let z = v + (-v);
        prop_assert_eq!(z, FourMomentum::zero());
    }

    #[test]
    fn scale_then_divide(v in four_momentum(), s in 0.1..10.0f64) {
        let back = (v * s).try_div(s).expect("nonzero divisor");
        prop_assert!(approx_eq(back.e, v.e, 1e-12));
        prop_assert!(approx_eq(back.pz, v.pz, 1e-12));
    }

    #[test]
    fn dot_is_symmetric(a in four_momentum(), b in four_momentum()) {
        prop_assert!(approx_eq(a.dot(&b), b.dot(&a), 1e-12));
    }

    #[test]
    fn signed_mass_squares_back(v in four_momentum()) {
        let m = v.mass();
        prop_assert!(approx_eq(m * m.abs(), v.mass_squared(), 1e-9));
    }

    #[test]
    fn phi_in_half_open_range(v in four_momentum()) {
        let phi = v.phi();
        prop_assert!(phi > -std::f64::consts::PI && phi <= std::f64::consts::PI);
    }
}

// ============================================================================
// Lorentz boosts
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn identity_boost_is_noop(v in four_momentum()) {
        prop_assert_eq!(v.boost(0.0, 0.0, 0.0).expect("valid"), v);
    }

    #[test]
    fn boost_inverse_roundtrip(v in four_momentum(), (bx, by, bz) in velocity()) {
        let back = v.boost(bx, by, bz).and_then(|b| b.boost(-bx, -by, -bz)).expect("valid");
        prop_assert!(approx_eq(back.e, v.e, 1e-9), "e {} vs {}", back.e, v.e);
        prop_assert!(approx_eq(back.px, v.px, 1e-9));
        prop_assert!(approx_eq(back.py, v.py, 1e-9));
        prop_assert!(approx_eq(back.pz, v.pz, 1e-9));
    }

    #[test]
    fn boost_preserves_invariant_mass(v in four_momentum(), (bx, by, bz) in velocity()) {
        let boosted = v.boost(bx, by, bz).expect("valid");
        let scale = v.e * v.e + v.p2();
        prop_assert!((boosted.mass_squared() - v.mass_squared()).abs() <= 1e-9 * scale.max(1.0));
    }

    #[test]
    fn superluminal_boost_rejected(v in four_momentum(), dir in 0.0..std::f64::consts::TAU, speed in 1.01..3.0f64) {
        let result = v.boost(speed * dir.cos(), speed * dir.sin(), 0.0);
        prop_assert!(matches!(result, Err(Error::InvalidBoost { .. })), "expected Err(InvalidBoost), got {:?}", result);
    }
}
