//! Scattering process models.
//!
//! The generator only sees a process through [`ProcessModel`]: particle
//! codes, √s, the angular density f(cosθ), its envelope M and the total
//! cross section. Any implementation can be substituted without touching
//! the generator.

pub mod lepton_pair;

pub use lepton_pair::LeptonPairProcess;

/// Fine-structure constant.
pub const ALPHA: f64 = 1.0 / 137.036;

/// Conversion from natural units (GeV⁻²) to nanobarns.
pub const GEV2_TO_NB: f64 = 389_379.366;

/// A two-body scattering process with a sampled polar angle.
pub trait ProcessModel {
    /// Human-readable process name.
    fn name(&self) -> &str;

    /// PDG codes of the two beam particles, in order.
    fn incoming(&self) -> [i32; 2];

    /// PDG codes of the two produced particles, in order.
    fn outgoing(&self) -> [i32; 2];

    /// Center-of-mass energy √s in GeV.
    fn sqrt_s(&self) -> f64;

    /// Differential cross section in cosθ, up to normalization.
    ///
    /// Must be non-negative on [−1, 1].
    fn differential_cross_section(&self, cos_theta: f64) -> f64;

    /// Upper bound M of [`ProcessModel::differential_cross_section`] on
    /// [−1, 1], used as the rejection-sampling envelope.
    fn max_weight(&self) -> f64;

    /// Total cross section in nanobarns.
    fn total_cross_section(&self) -> f64;

    /// Energy of each beam in the center-of-mass frame.
    fn beam_energy(&self) -> f64 {
        self.sqrt_s() / 2.0
    }
}
