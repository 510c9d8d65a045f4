//! Chi-square shape test of sampled cosθ values against an angular density.

use crate::process::ProcessModel;
use hep_common::{Error, Result};
use hep_math::chi_square_sf;
use serde::Serialize;

/// Simpson sub-intervals per histogram bin when integrating the density.
const SIMPSON_STEPS: usize = 16;

/// Outcome of a binned chi-square goodness-of-fit test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareTest {
    pub chi_square: f64,
    /// Populated bins minus one.
    pub dof: usize,
    pub p_value: f64,
    pub bins: usize,
    pub samples: usize,
}

impl ChiSquareTest {
    /// Whether the shape hypothesis survives at significance `alpha`.
    pub fn is_compatible(&self, alpha: f64) -> bool {
        self.p_value >= alpha
    }
}

/// Test `samples` on [−1, 1] against `density` (any positive normalization).
///
/// Expected counts come from integrating the density over each of `bins`
/// equal-width bins. Bins with zero expected count are skipped and do not
/// contribute degrees of freedom.
pub fn chi_square_shape_test<F>(samples: &[f64], density: F, bins: usize) -> Result<ChiSquareTest>
where
    F: Fn(f64) -> f64,
{
    if bins < 2 {
        return Err(Error::validation("bins", bins, "need at least 2 bins"));
    }
    if samples.is_empty() {
        return Err(Error::InsufficientData { needed: 1, got: 0 });
    }

    let width = 2.0 / bins as f64;
    let mut observed = vec![0u64; bins];
    for (i, &x) in samples.iter().enumerate() {
        if !(-1.0..=1.0).contains(&x) {
            return Err(Error::validation(
                format!("samples[{}]", i),
                x,
                "must lie in [-1, 1]",
            ));
        }
        let bin = (((x + 1.0) / width) as usize).min(bins - 1);
        observed[bin] += 1;
    }

    let weights: Vec<f64> = (0..bins)
        .map(|b| {
            let lo = -1.0 + b as f64 * width;
            simpson(&density, lo, lo + width)
        })
        .collect();
    let total_weight: f64 = weights.iter().sum();
    if !total_weight.is_finite() || total_weight <= 0.0 {
        return Err(Error::validation(
            "density",
            total_weight,
            "integral over [-1, 1] must be finite and positive",
        ));
    }

    let n = samples.len() as f64;
    let mut chi_square = 0.0;
    let mut populated = 0usize;
    for (&obs, &w) in observed.iter().zip(&weights) {
        let expected = n * w / total_weight;
        if expected <= 0.0 {
            if obs > 0 {
                chi_square = f64::INFINITY;
            }
            continue;
        }
        populated += 1;
        let diff = obs as f64 - expected;
        chi_square += diff * diff / expected;
    }

    let dof = populated.saturating_sub(1);
    let p_value = if chi_square.is_infinite() {
        0.0
    } else if dof == 0 {
        1.0
    } else {
        chi_square_sf(chi_square, dof as f64)
    };

    Ok(ChiSquareTest {
        chi_square,
        dof,
        p_value,
        bins,
        samples: samples.len(),
    })
}

/// Shape test against a process's own differential cross section.
pub fn process_shape_test<P: ProcessModel + ?Sized>(
    process: &P,
    cos_theta: &[f64],
    bins: usize,
) -> Result<ChiSquareTest> {
    chi_square_shape_test(cos_theta, |c| process.differential_cross_section(c), bins)
}

fn simpson<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> f64 {
    let h = (b - a) / SIMPSON_STEPS as f64;
    let mut sum = f(a) + f(b);
    for i in 1..SIMPSON_STEPS {
        let x = a + i as f64 * h;
        sum += if i % 2 == 1 { 4.0 * f(x) } else { 2.0 * f(x) };
    }
    sum * h / 3.0
}
