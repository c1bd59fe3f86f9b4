//! Candidate selection
//!
//! Chooses which (at most two) points of interest feed a whisper.
//!
//! With a heading, points inside the forward cone are ranked by distance and
//! the nearest two win. Without a heading, or when fewer than two points lie
//! ahead, the pair is drawn at random from every positioned point. The random
//! fallback ignores the heading entirely rather than widening the cone.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::geo::{angular_delta, bearing, distance};
use super::models::{Coordinate, PointOfInterest, ScoredCandidate};

/// Default half-width of the forward cone, in degrees
pub const DEFAULT_CONE_HALF_ANGLE: f64 = 60.0;

/// Outcome of a selection: nothing, one subject, or a pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No usable point
    None,
    /// Exactly one usable point
    Single(PointOfInterest),
    /// Two points to combine, in selection order
    Pair(PointOfInterest, PointOfInterest),
}

impl Selection {
    /// Number of selected points (0, 1 or 2)
    pub fn len(&self) -> usize {
        match self {
            Selection::None => 0,
            Selection::Single(_) => 1,
            Selection::Pair(_, _) => 2,
        }
    }

    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Titles of the selected points, in order
    pub fn titles(&self) -> Vec<String> {
        self.points().into_iter().map(|p| p.title.clone()).collect()
    }

    /// Selected points, in order
    pub fn points(&self) -> Vec<&PointOfInterest> {
        match self {
            Selection::None => vec![],
            Selection::Single(a) => vec![a],
            Selection::Pair(a, b) => vec![a, b],
        }
    }

    fn from_vec(mut picked: Vec<PointOfInterest>) -> Self {
        picked.truncate(2);
        let mut iter = picked.into_iter();
        match (iter.next(), iter.next()) {
            (Some(a), Some(b)) => Selection::Pair(a, b),
            (Some(a), None) => Selection::Single(a),
            _ => Selection::None,
        }
    }
}

/// Score one point against the user. `None` when the point has no position.
pub fn score(poi: &PointOfInterest, user: Coordinate, heading: f64) -> Option<ScoredCandidate> {
    let position = poi.position?;
    let bearing_deg = bearing(user, position);
    Some(ScoredCandidate {
        poi: poi.clone(),
        distance_m: distance(user, position),
        bearing_deg,
        heading_delta_deg: angular_delta(bearing_deg, heading),
    })
}

/// Positioned points inside the cone, nearest first.
pub fn cone_candidates(
    points: &[PointOfInterest],
    user: Coordinate,
    heading: f64,
    half_angle: f64,
) -> Vec<ScoredCandidate> {
    let mut ahead: Vec<ScoredCandidate> = points
        .iter()
        .filter_map(|poi| score(poi, user, heading))
        .filter(|c| c.heading_delta_deg <= half_angle)
        .collect();
    // Stable sort keeps input order among equidistant points
    ahead.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ahead
}

/// Heading-aware candidate selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateSelector {
    /// Half-width of the forward cone in degrees
    pub cone_half_angle: f64,
}

impl Default for CandidateSelector {
    fn default() -> Self {
        Self::new(DEFAULT_CONE_HALF_ANGLE)
    }
}

impl CandidateSelector {
    /// Create a selector with the given cone half-width
    pub fn new(cone_half_angle: f64) -> Self {
        Self { cone_half_angle }
    }

    /// Select up to two points to combine.
    pub fn select<R: Rng + ?Sized>(
        &self,
        points: &[PointOfInterest],
        user: Coordinate,
        heading: Option<f64>,
        rng: &mut R,
    ) -> Selection {
        let positioned: Vec<&PointOfInterest> =
            points.iter().filter(|p| p.position.is_some()).collect();

        if let Some(heading) = heading {
            if positioned.len() >= 2 {
                let ahead = cone_candidates(points, user, heading, self.cone_half_angle);
                if ahead.len() >= 2 {
                    debug!(
                        heading,
                        ahead = ahead.len(),
                        "selected nearest pair inside heading cone"
                    );
                    return Selection::from_vec(ahead.into_iter().take(2).map(|c| c.poi).collect());
                }
                debug!(heading, ahead = ahead.len(), "heading cone too sparse, drawing at random");
            }
        }

        let mut shuffled = positioned;
        shuffled.shuffle(rng);
        Selection::from_vec(shuffled.into_iter().take(2).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const USER: Coordinate = Coordinate::new(41.0, -105.0);

    fn north(title: &str, dlat: f64) -> PointOfInterest {
        PointOfInterest::new(title).with_position(USER.lat + dlat, USER.lng)
    }

    fn south(title: &str, dlat: f64) -> PointOfInterest {
        PointOfInterest::new(title).with_position(USER.lat - dlat, USER.lng)
    }

    #[test]
    fn test_empty_and_single() {
        let selector = CandidateSelector::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(selector.select(&[], USER, Some(0.0), &mut rng), Selection::None);

        let one = vec![north("Ames Monument", 0.01)];
        let picked = selector.select(&one, USER, Some(0.0), &mut rng);
        assert_eq!(picked, Selection::Single(one[0].clone()));
    }

    #[test]
    fn test_unpositioned_points_are_ignored() {
        let selector = CandidateSelector::default();
        let mut rng = StdRng::seed_from_u64(1);
        let points = vec![PointOfInterest::new("Floating"), north("Anchored", 0.01)];
        let picked = selector.select(&points, USER, None, &mut rng);
        assert_eq!(picked.titles(), vec!["Anchored"]);
    }

    #[test]
    fn test_cone_picks_nearest_pair_ahead() {
        let selector = CandidateSelector::default();
        let mut rng = StdRng::seed_from_u64(1);
        let points = vec![
            north("Far ahead", 0.05),
            south("Behind", 0.001),
            north("Near ahead", 0.002),
            north("Mid ahead", 0.01),
        ];
        let picked = selector.select(&points, USER, Some(0.0), &mut rng);
        assert_eq!(picked.titles(), vec!["Near ahead", "Mid ahead"]);
    }

    #[test]
    fn test_cone_boundary_is_inclusive() {
        let ahead = cone_candidates(&[north("N", 0.01)], USER, 60.0, 60.0);
        assert_eq!(ahead.len(), 1);
        let outside = cone_candidates(&[north("N", 0.01)], USER, 61.0, 60.0);
        assert!(outside.is_empty());
    }

    #[test]
    fn test_sparse_cone_falls_back_to_random_pair() {
        let selector = CandidateSelector::default();
        let points = vec![north("Only ahead", 0.01), south("Behind A", 0.01), south("Behind B", 0.02)];
        let mut seen_behind = false;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = selector.select(&points, USER, Some(0.0), &mut rng);
            assert_eq!(picked.len(), 2);
            if picked.titles().iter().all(|t| t.starts_with("Behind")) {
                seen_behind = true;
            }
        }
        assert!(seen_behind, "fallback never ignored the heading");
    }

    #[test]
    fn test_never_more_than_two() {
        let selector = CandidateSelector::default();
        let mut rng = StdRng::seed_from_u64(5);
        for n in 0..12 {
            let points: Vec<_> = (0..n).map(|i| north(&format!("P{}", i), 0.001 * (i + 1) as f64)).collect();
            for heading in [None, Some(0.0), Some(180.0)] {
                let picked = selector.select(&points, USER, heading, &mut rng);
                assert!(picked.len() <= 2);
                assert_eq!(picked.len(), n.min(2));
            }
        }
    }

    #[test]
    fn test_score_fields_in_range() {
        let c = score(&north("N", 0.01), USER, 350.0).unwrap();
        assert!(c.distance_m > 0.0);
        assert!((0.0..360.0).contains(&c.bearing_deg));
        assert!((c.heading_delta_deg - 10.0).abs() < 1e-6);
        assert!(score(&PointOfInterest::new("x"), USER, 0.0).is_none());
    }
}
