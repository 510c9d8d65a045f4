//! Standard normal distribution: CDF, survival, quantile and inverse survival.
//!
//! The complementary error function is evaluated through the regularized
//! upper incomplete gamma function, `erfc(x) = Q(1/2, x²)` for x >= 0, which
//! keeps relative precision deep in the tail. Quantiles start from Acklam's
//! rational approximation and take one Halley refinement step.

use super::gamma::gamma_q;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

const ACKLAM_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const ACKLAM_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const ACKLAM_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const ACKLAM_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const ACKLAM_P_LOW: f64 = 0.024_25;

/// Complementary error function erfc(x) = 1 - erf(x).
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        gamma_q(0.5, x * x)
    } else {
        2.0 - gamma_q(0.5, x * x)
    }
}

/// Standard normal CDF Φ(z).
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z * FRAC_1_SQRT_2)
}

/// Standard normal survival function 1 - Φ(z), accurate in the upper tail.
pub fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z * FRAC_1_SQRT_2)
}

/// Two-sided tail probability 2·(1 - Φ(|z|)).
pub fn normal_two_sided(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    (2.0 * normal_sf(z.abs())).min(1.0)
}

/// Standard normal quantile Φ⁻¹(p).
///
/// Returns -inf at p = 0, +inf at p = 1 and NaN outside [0, 1].
pub fn normal_ppf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let x = if p < ACKLAM_P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        tail_rational(q)
    } else if p <= 1.0 - ACKLAM_P_LOW {
        let q = p - 0.5;
        let r = q * q;
        let num = ((((ACKLAM_A[0] * r + ACKLAM_A[1]) * r + ACKLAM_A[2]) * r + ACKLAM_A[3]) * r
            + ACKLAM_A[4])
            * r
            + ACKLAM_A[5];
        let den = ((((ACKLAM_B[0] * r + ACKLAM_B[1]) * r + ACKLAM_B[2]) * r + ACKLAM_B[3]) * r
            + ACKLAM_B[4])
            * r
            + 1.0;
        num * q / den
    } else {
        let q = (-2.0 * (-p).ln_1p()).sqrt();
        -tail_rational(q)
    };

    halley_refine(x, p)
}

/// Inverse survival function: the z with 1 - Φ(z) = p.
///
/// Evaluated as -Φ⁻¹(p) so small p never passes through `1 - p`.
pub fn normal_isf(p: f64) -> f64 {
    -normal_ppf(p)
}

fn tail_rational(q: f64) -> f64 {
    let num = ((((ACKLAM_C[0] * q + ACKLAM_C[1]) * q + ACKLAM_C[2]) * q + ACKLAM_C[3]) * q
        + ACKLAM_C[4])
        * q
        + ACKLAM_C[5];
    let den = (((ACKLAM_D[0] * q + ACKLAM_D[1]) * q + ACKLAM_D[2]) * q + ACKLAM_D[3]) * q + 1.0;
    num / den
}

fn halley_refine(x: f64, p: f64) -> f64 {
    // Compare in whichever tail keeps p's precision.
    let e = if x <= 0.0 {
        normal_cdf(x) - p
    } else {
        (1.0 - p) - normal_sf(x)
    };
    let u = e * (2.0 * PI).sqrt() * (0.5 * x * x).exp();
    if !u.is_finite() {
        return x;
    }
    x - u / (1.0 + 0.5 * x * u)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn cdf_reference_points() {
        assert!(approx_eq(normal_cdf(0.0), 0.5, 1e-15));
        assert!(approx_eq(normal_cdf(1.0), 0.841_344_746_068_542_9, 1e-12));
        assert!(approx_eq(normal_cdf(-1.959_963_984_540_054), 0.025, 1e-12));
    }

    #[test]
    fn sf_keeps_precision_in_tail() {
        // 1 - Φ(5) = 2.866515718791939e-7
        let sf = normal_sf(5.0);
        assert!(((sf - 2.866_515_718_791_939e-7) / 2.866_515_718_791_939e-7).abs() < 1e-9);
        // 1 - Φ(10) ≈ 7.62e-24, far below double epsilon around 1.
        let deep = normal_sf(10.0);
        assert!(deep > 7.0e-24 && deep < 8.0e-24);
    }

    #[test]
    fn two_sided_matches_sf() {
        assert!(approx_eq(normal_two_sided(0.0), 1.0, 1e-15));
        assert!(approx_eq(normal_two_sided(-1.959_963_984_540_054), 0.05, 1e-12));
        assert!(approx_eq(normal_two_sided(3.0), 2.0 * normal_sf(3.0), 1e-15));
    }

    #[test]
    fn ppf_known_quantiles() {
        assert!(approx_eq(normal_ppf(0.5), 0.0, 1e-14));
        assert!(approx_eq(normal_ppf(0.975), 1.959_963_984_540_054, 1e-9));
        assert!(approx_eq(normal_ppf(0.001), -3.090_232_306_167_813_5, 1e-9));
    }

    #[test]
    fn isf_sigma_thresholds() {
        // Two-sided p-values of the 2σ, 3σ and 5σ conventions.
        assert!(approx_eq(normal_isf(0.045_500_263_896_358_4 / 2.0), 2.0, 1e-8));
        assert!(approx_eq(normal_isf(0.002_699_796_063_260_2 / 2.0), 3.0, 1e-8));
        assert!(approx_eq(normal_isf(5.733_031_437_583_9e-7 / 2.0), 5.0, 1e-7));
    }

    #[test]
    fn ppf_edges() {
        assert_eq!(normal_ppf(0.0), f64::NEG_INFINITY);
        assert_eq!(normal_ppf(1.0), f64::INFINITY);
        assert!(normal_ppf(1.5).is_nan());
        assert!(normal_ppf(f64::NAN).is_nan());
        assert_eq!(normal_isf(0.0), f64::INFINITY);
    }

    #[test]
    fn ppf_deep_tail_is_finite() {
        let z = normal_isf(1e-300);
        assert!(z.is_finite());
        assert!(z > 37.0 && z < 37.1);
    }
}
