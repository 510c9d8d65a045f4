//! Property-based tests for lineage track building.

use hep_core::particle::{Lineage, ParticleInstance, ParticleRegistry};
use hep_core::{EventId, FourMomentum, ParticleId, TrackBuilder};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::HashMap;
use std::sync::Arc;

fn id(index: u32) -> ParticleId {
    ParticleId::new(EventId(1), index)
}

/// Particles 0..n; `parents[i]` names the parent index, if any.
fn forest(parents: &[Option<usize>]) -> Vec<ParticleInstance> {
    let registry = ParticleRegistry::builtin().expect("builtin catalog");
    let kind = Arc::clone(registry.get_by_pdg(22).expect("photon"));

    parents
        .iter()
        .enumerate()
        .map(|(i, parent)| {
            let lineage = match parent {
                Some(j) => Lineage::Parent(id(*j as u32)),
                _ if i % 2 == 0 => Lineage::CollisionProduct,
                _ => Lineage::NoParent,
            };
            let p4 = FourMomentum::new(10.0 + i as f64, i as f64, 1.0, -(i as f64));
            ParticleInstance::new(id(i as u32), Arc::clone(&kind), p4, lineage)
        })
        .collect()
}

/// Random forests: each particle optionally points at an earlier one.
fn links() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(prop::option::of(any::<Index>()), 1..60).prop_map(|picks| {
        picks
            .iter()
            .enumerate()
            .map(|(i, pick)| pick.as_ref().filter(|_| i > 0).map(|idx| idx.index(i)))
            .collect()
    })
}

/// 0 ← 1 ← 2 ← ... ← n-1
fn chain(n: usize) -> Vec<Option<usize>> {
    (0..n).map(|i| i.checked_sub(1)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn every_particle_lands_in_exactly_one_track(links in links()) {
        let particles = forest(&links);
        let tracks = TrackBuilder::build(&particles);

        let total: usize = tracks.iter().map(|t| t.len()).sum();
        prop_assert_eq!(total, particles.len());

        let mut seen = HashMap::new();
        for (t, track) in tracks.iter().enumerate() {
            prop_assert!(!track.is_empty());
            for p in track.particles() {
                prop_assert!(seen.insert(p.id(), t).is_none());
            }
        }
    }

    #[test]
    fn one_track_per_root(links in links()) {
        let particles = forest(&links);
        let roots = particles
            .iter()
            .filter(|p| p.lineage().parent().is_none())
            .count();
        prop_assert_eq!(TrackBuilder::build(&particles).len(), roots);
    }

    #[test]
    fn members_share_their_parents_track(links in links()) {
        let particles = forest(&links);
        let tracks = TrackBuilder::build(&particles);

        let track_of: HashMap<ParticleId, usize> = tracks
            .iter()
            .enumerate()
            .flat_map(|(t, track)| track.particles().iter().map(move |p| (p.id(), t)))
            .collect();

        for p in &particles {
            if let Some(parent) = p.lineage().parent() {
                prop_assert_eq!(track_of[&p.id()], track_of[&parent]);
            }
        }
    }

    #[test]
    fn tracks_ordered_by_first_particle(links in links()) {
        let particles = forest(&links);
        let firsts: Vec<u32> = TrackBuilder::build(&particles)
            .iter()
            .map(|t| t.particles()[0].id().index)
            .collect();
        prop_assert!(firsts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn straight_chain_is_one_track(n in 1usize..50) {
        let particles = forest(&chain(n));
        let tracks = TrackBuilder::build(&particles);

        prop_assert_eq!(tracks.len(), 1);
        prop_assert_eq!(tracks[0].len(), n);
        // Consecutive members differ by (1, 0, -1) in momentum space.
        let expected = (n - 1) as f64 * 2f64.sqrt();
        prop_assert!((tracks[0].length() - expected).abs() < 1e-9);
    }

    #[test]
    fn reversed_input_breaks_chains(n in 2usize..30) {
        let mut particles = forest(&chain(n));
        particles.reverse();

        // Every parent now follows its child.
        prop_assert_eq!(TrackBuilder::build(&particles).len(), n);
    }
}
