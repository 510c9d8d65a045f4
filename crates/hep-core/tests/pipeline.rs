//! Generate → serialize → parse → compare pipeline tests.

use hep_core::event_format::{events_to_string, parse_events, read_events};
use hep_core::goodness_of_fit::{chi_square_shape_test, process_shape_test};
use hep_core::observable::Observable;
use hep_core::{
    ComparisonSample, Event, EventGenerator, LeptonPairProcess, PairedTest, ParticleRegistry,
    ProcessModel, SignificanceLevel,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn generate(n: u32, seed: u64, sqrt_s: f64) -> (LeptonPairProcess, Vec<Event>) {
    let registry = ParticleRegistry::builtin().expect("builtin catalog");
    let process = LeptonPairProcess::new(sqrt_s, [13, -13], [11, -11]).expect("process");
    let events = {
        let mut generator = EventGenerator::new(&process, &registry, StdRng::seed_from_u64(seed))
            .expect("generator");
        generator.run(n).expect("run");
        generator.into_events()
    };
    (process, events)
}

// ============================================================================
// Physics checks on generated samples
// ============================================================================

#[test]
fn every_event_conserves_four_momentum() {
    let (_, events) = generate(500, 11, 91.1876);
    for event in &events {
        let diff = event.initial_momentum() - event.final_momentum();
        assert!(diff.e.abs() < 1e-9);
        assert!(diff.px.abs() < 1e-9);
        assert!(diff.py.abs() < 1e-9);
        assert!(diff.pz.abs() < 1e-9);
    }
}

#[test]
fn cos_theta_follows_one_plus_cos_squared() {
    let (process, events) = generate(20_000, 2024, 91.1876);
    let cos_theta: Vec<f64> = events
        .iter()
        .map(|e| e.outgoing()[0].momentum().cos_theta())
        .collect();

    let matched = process_shape_test(&process, &cos_theta, 20).unwrap();
    assert!(matched.p_value > 1e-4, "1 + cos²θ rejected: {:?}", matched);

    // A flat hypothesis must be strongly rejected at this sample size.
    let flat = chi_square_shape_test(&cos_theta, |_| 1.0, 20).unwrap();
    assert!(flat.p_value < 1e-6, "flat shape accepted: {:?}", flat);
}

#[test]
fn cross_section_scales_as_inverse_s() {
    let (low, _) = generate(1, 1, 10.0);
    let (high, _) = generate(1, 1, 20.0);
    let ratio = low.total_cross_section() / high.total_cross_section();
    assert!((ratio - 4.0).abs() < 1e-12);
}

// ============================================================================
// Text round trip and comparison
// ============================================================================

#[test]
fn serialized_sample_matches_its_source() {
    let (_, events) = generate(300, 77, 91.1876);
    let text = events_to_string(&events).unwrap();
    let parsed = parse_events(&text).unwrap();

    let sample = ComparisonSample::from_events(
        events.iter().map(|e| e.particles()),
        parsed.iter().map(|e| e.particles.as_slice()),
        Observable::CosTheta,
        Some(11),
    )
    .unwrap();
    assert_eq!(sample.len(), 300);

    // Only three-decimal rounding separates the two sides.
    assert!(sample.differences().all(|d| d.abs() < 1e-3));

    let result = PairedTest::preferred().run(&sample).unwrap();
    assert!(result.mean_difference.abs() < 1e-4);
}

#[test]
fn independent_seeds_give_a_well_formed_result() {
    let (_, ours) = generate(400, 1, 91.1876);
    let (_, reference) = generate(400, 2, 91.1876);
    let sample = ComparisonSample::from_events(
        ours.iter().map(|e| e.particles()),
        reference.iter().map(|e| e.particles()),
        Observable::CosTheta,
        None,
    )
    .unwrap();

    let result = PairedTest::NormalApproximation.run(&sample).unwrap();
    assert!(result.p_value >= 0.0 && result.p_value <= 1.0);
    assert!(result.level <= SignificanceLevel::Discovery);
    assert_eq!(result.n, 400);
}

#[test]
fn shifted_sample_is_significant() {
    let (_, ours) = generate(400, 3, 91.1876);
    let shifted: Vec<f64> = ours
        .iter()
        .map(|e| e.outgoing()[0].momentum().cos_theta() - 0.2)
        .collect();
    let values: Vec<f64> = ours
        .iter()
        .map(|e| e.outgoing()[0].momentum().cos_theta())
        .collect();
    let sample = ComparisonSample::new(values, shifted).unwrap();

    let result = PairedTest::preferred().run(&sample).unwrap();
    assert!(result.significant);
    assert_eq!(result.level, SignificanceLevel::Discovery);
}

#[test]
fn reference_fixture_parses_with_particle_name_labels() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reference_events.txt");
    let events = read_events(&path).unwrap();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.particles.len() == 4));
    assert_eq!(events[0].particles[2].label, "electron");
    assert_eq!(events[0].particles[2].lineage(), None);

    let values = hep_core::observable::extract(
        events.iter().map(|e| e.particles.as_slice()),
        Observable::CosTheta,
        None,
    )
    .unwrap();
    let expected = [0.866, 0.0, -0.5, 0.707];
    for (v, e) in values.iter().zip(expected) {
        assert!((v - e).abs() < 1e-3, "{v} vs {e}");
    }
}
