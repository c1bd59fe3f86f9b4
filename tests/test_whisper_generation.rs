//! Whisper Generation Integration Tests
//!
//! End-to-end checks of the public API:
//! - Geodesic properties (range, identity, symmetry)
//! - Heading-cone selection and its random fallback
//! - Fixed responses for empty and single-point input
//! - Streaming reconstruction and capitalization
//! - The lighthouse / quarry walkthrough

use drift::core::geo::{angular_delta, bearing, distance};
use drift::core::techniques::template::{fill_template, TemplateSlots};
use drift::core::techniques::{markov, TechniqueInput};
use drift::core::{CandidateSelector, Selection, VOID_WHISPER};
use drift::{generate, generate_streaming, Coordinate, PointOfInterest, Technique, WhisperGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// TEST HELPERS
// =============================================================================

const USER: Coordinate = Coordinate::new(44.0, -68.0);

fn lighthouse() -> PointOfInterest {
    PointOfInterest::new("Lighthouse Point")
        .with_extract("A lighthouse stood for a century.")
        .with_position(44.01, -68.0)
}

fn quarry() -> PointOfInterest {
    PointOfInterest::new("Old Quarry")
        .with_extract("The quarry was abandoned in silence.")
        .with_position(44.02, -68.001)
}

fn coordinate_grid() -> Vec<Coordinate> {
    let mut grid = Vec::new();
    for lat in [-80.0, -33.5, 0.0, 12.25, 44.0, 79.9] {
        for lng in [-179.5, -68.0, 0.0, 45.5, 179.9] {
            grid.push(Coordinate::new(lat, lng));
        }
    }
    grid
}

// =============================================================================
// GeoMath
// =============================================================================

#[test]
fn test_bearing_range_and_identity() {
    let grid = coordinate_grid();
    for &a in &grid {
        assert_eq!(bearing(a, a), 0.0);
        for &b in &grid {
            let brg = bearing(a, b);
            assert!((0.0..360.0).contains(&brg), "bearing({:?}, {:?}) = {}", a, b, brg);
        }
    }
}

#[test]
fn test_distance_identity_and_symmetry() {
    let grid = coordinate_grid();
    for &a in &grid {
        assert_eq!(distance(a, a), 0.0);
        for &b in &grid {
            let d1 = distance(a, b);
            let d2 = distance(b, a);
            assert!(d1 >= 0.0);
            assert!((d1 - d2).abs() < 1e-6 * d1.max(1.0));
        }
    }
}

#[test]
fn test_angular_delta_properties() {
    for a in (0..360).step_by(15) {
        for b in (0..360).step_by(20) {
            let (a, b) = (a as f64, b as f64);
            let d = angular_delta(a, b);
            assert_eq!(d, angular_delta(b, a));
            assert!((0.0..=180.0).contains(&d));
        }
    }
}

// =============================================================================
// CandidateSelector
// =============================================================================

#[test]
fn test_select_never_exceeds_two() {
    let selector = CandidateSelector::default();
    let mut rng = StdRng::seed_from_u64(17);
    for n in 0..25 {
        let points: Vec<PointOfInterest> = (0..n)
            .map(|i| {
                let angle = (i as f64 * 47.0).to_radians();
                PointOfInterest::new(format!("P{}", i))
                    .with_position(USER.lat + 0.01 * angle.cos(), USER.lng + 0.01 * angle.sin())
            })
            .collect();
        for heading in [None, Some(0.0), Some(137.0), Some(359.0)] {
            let picked = selector.select(&points, USER, heading, &mut rng);
            assert!(picked.len() <= 2);
        }
    }
}

#[test]
fn test_two_nearest_in_cone_selected_nearest_first() {
    // Heading east; two points within 60° of east are closer than everything else
    let points = vec![
        PointOfInterest::new("West far").with_position(USER.lat, USER.lng - 0.05),
        PointOfInterest::new("East second").with_position(USER.lat + 0.001, USER.lng + 0.004),
        PointOfInterest::new("North far").with_position(USER.lat + 0.05, USER.lng),
        PointOfInterest::new("East first").with_position(USER.lat, USER.lng + 0.002),
        PointOfInterest::new("East distant").with_position(USER.lat, USER.lng + 0.08),
    ];
    let selector = CandidateSelector::default();
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = selector.select(&points, USER, Some(90.0), &mut rng);
        assert_eq!(picked.titles(), vec!["East first", "East second"]);
    }
}

#[test]
fn test_example_scenario_selects_both_by_distance() {
    let points = vec![quarry(), lighthouse()];
    let mut rng = StdRng::seed_from_u64(0);
    let picked = CandidateSelector::default().select(&points, USER, Some(0.0), &mut rng);
    match picked {
        Selection::Pair(a, b) => {
            assert_eq!(a.title, "Lighthouse Point");
            assert_eq!(b.title, "Old Quarry");
        }
        other => panic!("expected a pair, got {:?}", other),
    }
}

// =============================================================================
// WhisperGenerator
// =============================================================================

#[test]
fn test_zero_points_yield_text() {
    let result = generate(&[], USER, Some(10.0));
    assert!(!result.text.is_empty());
    assert_eq!(result.text, VOID_WHISPER);
}

#[test]
fn test_single_point_mentions_title() {
    let points = vec![PointOfInterest::new("Ames Monument").with_position(41.1312, -105.3994)];
    let result = generate(&points, Coordinate::new(41.3, -105.6), None);
    assert!(result.text.contains("Ames Monument"), "{}", result.text);
}

#[test]
fn test_markov_prefers_shared_bridge() {
    let a = "The bridge spans a cold river near the mill.";
    let b = "Wagons crossed this bridge every autumn harvest.";
    let mut rng = StdRng::seed_from_u64(2024);
    let trials = 100;
    let from_bridge = (0..trials)
        .filter(|_| markov::blend(a, b, 8, &mut rng).unwrap().starts_with("bridge"))
        .count();
    assert!(from_bridge * 2 > trials, "{} / {}", from_bridge, trials);
}

#[test]
fn test_streaming_reconstructs_result() {
    let generator = WhisperGenerator::default();
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..20 {
        let mut seen = String::new();
        let mut calls = 0usize;
        let result = generator.generate_streaming_with_rng(
            &[lighthouse(), quarry()],
            USER,
            &mut |ch: char, so_far: &str| {
                seen.push(ch);
                calls += 1;
                assert_eq!(so_far, seen.as_str());
            },
            Some(0.0),
            &mut rng,
        );
        assert_eq!(seen, result.text);
        assert_eq!(calls, result.text.chars().count());
    }
}

#[test]
fn test_streaming_default_rng_entry_point() {
    let mut seen = String::new();
    let result = generate_streaming(&[], USER, &mut |ch: char, _: &str| seen.push(ch), None);
    assert_eq!(seen, result.text);
}

#[test]
fn test_capitalization_applied_once_to_first_char() {
    let generator = WhisperGenerator::default();
    let mut rng = StdRng::seed_from_u64(8);
    for technique in Technique::ALL {
        for _ in 0..10 {
            let result = generator.generate_with_technique(
                &[lighthouse(), quarry()],
                USER,
                Some(0.0),
                technique,
                &mut rng,
            );
            let mut chars = result.text.chars();
            let first = chars.next().unwrap();
            assert!(!first.is_lowercase(), "{}: {}", technique, result.text);
            // The rest keeps the technique's own casing: tokens are lowercase
            if matches!(technique, Technique::MarkovBlend | Technique::SkipGram) {
                let rest: String = chars.collect();
                assert_eq!(rest, rest.to_lowercase(), "{}: {}", technique, result.text);
            }
        }
    }
}

#[test]
fn test_lighthouse_quarry_template() {
    let input = TechniqueInput {
        fragment_a: "A lighthouse stood for a century.",
        fragment_b: "The quarry was abandoned in silence.",
        title_a: "Lighthouse Point",
        title_b: "Old Quarry",
    };
    let mut rng = StdRng::seed_from_u64(0);
    let slots = TemplateSlots::draw(&input, &mut rng).unwrap();
    assert_eq!(
        fill_template("The {nounA} remembers {nounB}.", &slots),
        "The lighthouse remembers quarry."
    );
}

#[test]
fn test_points_without_extract_or_position() {
    let points = vec![
        PointOfInterest::new("Vedauwoo").with_position(41.16, -105.37),
        PointOfInterest::new("Floating Title"),
        PointOfInterest::new("Happy Jack").with_position(41.2, -105.3),
    ];
    let generator = WhisperGenerator::default();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..30 {
        let result = generator.generate_with_rng(&points, Coordinate::new(41.1, -105.4), None, &mut rng);
        assert!(!result.text.is_empty());
        assert!(!result.source_titles.contains(&"Floating Title".to_string()));
    }
}

#[test]
fn test_concurrent_generation_is_independent() {
    let generator = std::sync::Arc::new(WhisperGenerator::default());
    let handles: Vec<_> = (0..4)
        .map(|seed| {
            let generator = std::sync::Arc::clone(&generator);
            std::thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                generator.generate_with_rng(&[lighthouse(), quarry()], USER, Some(0.0), &mut rng)
            })
        })
        .collect();
    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(result.source_titles.len(), 2);
    }
}
