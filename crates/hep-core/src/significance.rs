//! Paired significance testing between two event samples.
//!
//! Two strategies share one set of degenerate-input rules:
//! - fewer than two pairs: [`Error::InsufficientData`]
//! - zero spread and zero mean difference: t = 0, p = 1
//! - zero spread and non-zero mean difference: t = ±∞, p = 0
//!
//! Otherwise t = d̄ / (s / √n) over the per-pair differences, and the
//! two-sided p-value comes from the Student-t distribution with n − 1
//! degrees of freedom or from the standard normal approximation.
//!
//! P-values map to a significance in σ (the one-sided z-score whose
//! two-sided tail equals p), bucketed with the particle-physics thresholds:
//! 5σ discovery, 3σ evidence, 2σ tension.

use crate::observable::{extract, Measured, Observable};
use hep_common::{Error, Result};
use hep_math::{normal_isf, normal_two_sided};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Paired observations of one scalar from two event sources.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSample {
    ours: Vec<f64>,
    reference: Vec<f64>,
}

impl ComparisonSample {
    /// Pair two samples by position. Fails with [`Error::LengthMismatch`]
    /// when the lengths differ.
    pub fn new(ours: Vec<f64>, reference: Vec<f64>) -> Result<Self> {
        if ours.len() != reference.len() {
            return Err(Error::LengthMismatch {
                left: ours.len(),
                right: reference.len(),
            });
        }
        Ok(Self { ours, reference })
    }

    /// Extract one observable per event from two event sources and pair them.
    pub fn from_events<'a, 'b, A, B, IA, IB>(
        ours: IA,
        reference: IB,
        observable: Observable,
        target_pdg: Option<i32>,
    ) -> Result<Self>
    where
        A: Measured + 'a,
        B: Measured + 'b,
        IA: IntoIterator<Item = &'a [A]>,
        IB: IntoIterator<Item = &'b [B]>,
    {
        let ours = extract(ours, observable, target_pdg)?;
        let reference = extract(reference, observable, target_pdg)?;
        Self::new(ours, reference)
    }

    pub fn len(&self) -> usize {
        self.ours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ours.is_empty()
    }

    pub fn ours(&self) -> &[f64] {
        &self.ours
    }

    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    /// Per-pair differences ours − reference.
    pub fn differences(&self) -> impl Iterator<Item = f64> + '_ {
        self.ours.iter().zip(&self.reference).map(|(a, b)| a - b)
    }
}

/// How the p-value of the paired statistic is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairedTest {
    /// Exact Student-t tail with n − 1 degrees of freedom.
    #[cfg(feature = "student-t")]
    StudentT,
    /// Standard normal tail; adequate for large n.
    NormalApproximation,
}

impl PairedTest {
    /// The most exact strategy compiled in.
    pub fn preferred() -> Self {
        #[cfg(feature = "student-t")]
        {
            PairedTest::StudentT
        }
        #[cfg(not(feature = "student-t"))]
        {
            PairedTest::NormalApproximation
        }
    }

    /// Run the paired test.
    pub fn run(&self, sample: &ComparisonSample) -> Result<TestResult> {
        let n = sample.len();
        if n < 2 {
            return Err(Error::InsufficientData { needed: 2, got: n });
        }

        let mean = sample.differences().sum::<f64>() / n as f64;
        let variance = sample
            .differences()
            .map(|d| (d - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        let std_dev = variance.sqrt();

        let (t_statistic, p_value) = if std_dev == 0.0 {
            if mean == 0.0 {
                (0.0, 1.0)
            } else {
                (f64::INFINITY.copysign(mean), 0.0)
            }
        } else {
            let t = mean / (std_dev / (n as f64).sqrt());
            (t, self.two_sided_p(t, (n - 1) as f64))
        };

        let sigma = pvalue_to_sigma(p_value);
        let level = SignificanceLevel::from_sigma(sigma);

        Ok(TestResult {
            test: *self,
            n,
            mean_difference: mean,
            std_difference: std_dev,
            t_statistic,
            p_value,
            sigma,
            level,
            significant: level.is_significant(),
        })
    }

    /// Two-sided tail probability of `t` with `dof` degrees of freedom.
    #[cfg_attr(not(feature = "student-t"), allow(unused_variables))]
    fn two_sided_p(&self, t: f64, dof: f64) -> f64 {
        match self {
            #[cfg(feature = "student-t")]
            PairedTest::StudentT => hep_math::student_t_two_sided(t, dof),
            PairedTest::NormalApproximation => normal_two_sided(t.abs()),
        }
    }
}

impl Default for PairedTest {
    fn default() -> Self {
        Self::preferred()
    }
}

impl std::str::FromStr for PairedTest {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            #[cfg(feature = "student-t")]
            "student-t" | "student_t" | "t" => Ok(PairedTest::StudentT),
            #[cfg(not(feature = "student-t"))]
            "student-t" | "student_t" | "t" => {
                Err("student-t strategy not compiled in (enable feature 'student-t')".to_string())
            }
            "normal" | "normal_approximation" | "z" => Ok(PairedTest::NormalApproximation),
            _ => Err(format!("unknown test strategy: {}", s)),
        }
    }
}

impl fmt::Display for PairedTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "student-t")]
            PairedTest::StudentT => write!(f, "paired t-test (Student-t)"),
            PairedTest::NormalApproximation => write!(f, "paired t-test (normal approximation)"),
        }
    }
}

/// Convert a two-sided p-value to a significance in σ.
///
/// p ≤ 0 maps to +∞; p ≥ 1 maps to 0.
pub fn pvalue_to_sigma(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::INFINITY;
    }
    normal_isf(p.min(1.0) / 2.0)
}

/// Significance bucket of a test result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignificanceLevel {
    /// Below 2σ.
    Compatible,
    /// 2σ to 3σ; noted but not significant.
    Tension,
    /// 3σ to 5σ.
    Evidence,
    /// 5σ and above.
    Discovery,
}

impl SignificanceLevel {
    pub fn from_sigma(sigma: f64) -> Self {
        if sigma >= 5.0 {
            SignificanceLevel::Discovery
        } else if sigma >= 3.0 {
            SignificanceLevel::Evidence
        } else if sigma >= 2.0 {
            SignificanceLevel::Tension
        } else {
            SignificanceLevel::Compatible
        }
    }

    /// Evidence and Discovery are significant; Tension is not.
    pub fn is_significant(&self) -> bool {
        matches!(
            self,
            SignificanceLevel::Evidence | SignificanceLevel::Discovery
        )
    }
}

impl fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignificanceLevel::Compatible => write!(f, "Compatible"),
            SignificanceLevel::Tension => write!(f, "Tension"),
            SignificanceLevel::Evidence => write!(f, "Evidence"),
            SignificanceLevel::Discovery => write!(f, "Discovery"),
        }
    }
}

/// Outcome of a paired test.
///
/// Non-finite statistics serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub test: PairedTest,
    pub n: usize,
    pub mean_difference: f64,
    pub std_difference: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub sigma: f64,
    pub level: SignificanceLevel,
    pub significant: bool,
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test:         {}", self.test)?;
        writeln!(f, "Pairs:        {}", self.n)?;
        writeln!(f, "Mean diff:    {:.6}", self.mean_difference)?;
        writeln!(f, "t statistic:  {:.4}", self.t_statistic)?;
        writeln!(f, "p-value:      {:.6e}", self.p_value)?;
        writeln!(f, "Significance: {:.2} sigma", self.sigma)?;
        write!(
            f,
            "Result:       {} ({})",
            self.level,
            if self.significant {
                "significant"
            } else {
                "not significant"
            }
        )
    }
}
