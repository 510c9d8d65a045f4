//! hep-sim math utilities.

pub mod math;

pub use math::beta::*;
pub use math::gamma::*;
pub use math::normal::*;
pub use math::stable::*;
