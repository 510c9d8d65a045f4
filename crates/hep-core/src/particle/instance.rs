//! Per-event particle instances and their lineage.

use super::kind::ParticleKind;
use hep_common::{EventId, FourMomentum, ParticleId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a particle instance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "parent")]
pub enum Lineage {
    /// No recorded origin.
    NoParent,
    /// One of the colliding beam particles.
    InitialBeam,
    /// Produced directly in the hard collision.
    CollisionProduct,
    /// Produced by another particle instance.
    Parent(ParticleId),
}

impl Lineage {
    /// The parent handle, if the lineage points at another instance.
    pub fn parent(&self) -> Option<ParticleId> {
        match self {
            Lineage::Parent(id) => Some(*id),
            _ => None,
        }
    }
}

/// One appearance of a particle kind in one event.
#[derive(Debug, Clone)]
pub struct ParticleInstance {
    id: ParticleId,
    kind: Arc<ParticleKind>,
    momentum: FourMomentum,
    lineage: Lineage,
}

impl ParticleInstance {
    pub fn new(
        id: ParticleId,
        kind: Arc<ParticleKind>,
        momentum: FourMomentum,
        lineage: Lineage,
    ) -> Self {
        Self {
            id,
            kind,
            momentum,
            lineage,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn event_id(&self) -> EventId {
        self.id.event
    }

    pub fn kind(&self) -> &ParticleKind {
        &self.kind
    }

    pub fn pdg(&self) -> i32 {
        self.kind.pdg()
    }

    pub fn momentum(&self) -> &FourMomentum {
        &self.momentum
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.momentum.pt()
    }

    /// Pseudorapidity.
    pub fn eta(&self) -> f64 {
        self.momentum.eta()
    }

    /// Azimuthal angle in (−π, π].
    pub fn phi(&self) -> f64 {
        self.momentum.phi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hep_config::default_catalog;

    fn electron() -> Arc<ParticleKind> {
        let rec = default_catalog()
            .into_iter()
            .find(|r| r.pdg == 11)
            .expect("electron in default catalog");
        Arc::new(ParticleKind::from_record(&rec).expect("valid"))
    }

    #[test]
    fn test_derived_properties() {
        let p = ParticleInstance::new(
            ParticleId::new(EventId(4), 2),
            electron(),
            FourMomentum::new(5.0, 3.0, 4.0, 0.0),
            Lineage::CollisionProduct,
        );
        assert_eq!(p.event_id(), EventId(4));
        assert_eq!(p.pdg(), 11);
        assert!((p.pt() - 5.0).abs() < 1e-12);
        assert!(p.eta().abs() < 1e-12);
        assert!((p.phi() - 4.0f64.atan2(3.0)).abs() < 1e-12);
        assert_eq!(p.lineage().parent(), None);
    }

    #[test]
    fn test_lineage_parent() {
        let parent = ParticleId::new(EventId(1), 0);
        assert_eq!(Lineage::Parent(parent).parent(), Some(parent));
        assert_eq!(Lineage::InitialBeam.parent(), None);
        assert_eq!(Lineage::NoParent.parent(), None);
    }

    #[test]
    fn test_lineage_serialization() {
        let json = serde_json::to_string(&Lineage::CollisionProduct).unwrap();
        assert_eq!(json, r#"{"kind":"collision_product"}"#);
    }
}
