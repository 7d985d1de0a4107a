//! Preference cluster estimation.
//!
//! The cluster is presentational only: it outlines where the influential
//! ratings sit and never feeds back into classification.

use std::collections::HashMap;

use crate::models::{
    Coordinate, EmbeddingPoint, InfluenceRecord, MovieId, PreferenceCluster, SkipReason,
};

/// Radius multiplier so the drawn boundary encloses the points instead of touching them
pub const CLUSTER_EXPANSION: f64 = 1.3;

/// Centroid and expanded mean radius of the influential points
///
/// The current movie is drawn as itself, not as an influential rating, so a
/// record naming it is left out. Returns `None` when no remaining record
/// resolves to a coordinate.
pub fn estimate_cluster(
    influence: &[InfluenceRecord],
    points: &[EmbeddingPoint],
    current_movie: Option<MovieId>,
) -> Option<PreferenceCluster> {
    let by_id: HashMap<MovieId, Coordinate> =
        points.iter().map(|p| (p.movie_id, p.coordinate())).collect();

    let resolved: Vec<Coordinate> = influence
        .iter()
        .filter(|r| Some(r.movie_id) != current_movie)
        .filter_map(|r| by_id.get(&r.movie_id).copied())
        .collect();

    if resolved.is_empty() {
        tracing::debug!(
            records = influence.len(),
            reason = %SkipReason::NoResolvableInfluence,
            "Skipping preference cluster"
        );
        return None;
    }

    let n = resolved.len() as f64;
    let center = Coordinate::new(
        resolved.iter().map(|c| c.x).sum::<f64>() / n,
        resolved.iter().map(|c| c.y).sum::<f64>() / n,
    );
    let mean_distance = resolved.iter().map(|c| c.distance_to(&center)).sum::<f64>() / n;

    Some(PreferenceCluster {
        center,
        radius: mean_distance * CLUSTER_EXPANSION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RatingValue;

    fn point(movie_id: MovieId, x: f64, y: f64) -> EmbeddingPoint {
        EmbeddingPoint {
            movie_id,
            title: String::new(),
            x,
            y,
            rating: RatingValue::Liked,
        }
    }

    fn record(movie_id: MovieId, influence: f64) -> InfluenceRecord {
        InfluenceRecord {
            movie_id,
            title: String::new(),
            influence,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_two_point_cluster() {
        let points = vec![point(1, 0.0, 0.0), point(2, 4.0, 2.0), point(3, 50.0, 50.0)];
        let influence = vec![record(1, 0.5), record(2, -0.2)];

        let cluster = estimate_cluster(&influence, &points, None).unwrap();

        assert!(approx(cluster.center.x, 2.0));
        assert!(approx(cluster.center.y, 1.0));
        // each point sits sqrt(5) from the midpoint
        assert!(approx(cluster.radius, 5f64.sqrt() * 1.3));
    }

    #[test]
    fn test_no_influence_means_no_cluster() {
        let points = vec![point(1, 0.0, 0.0)];
        assert!(estimate_cluster(&[], &points, None).is_none());
    }

    #[test]
    fn test_unresolvable_records_are_dropped() {
        let points = vec![point(1, 3.0, 3.0)];
        let influence = vec![record(1, 0.5), record(77, 0.9)];

        let cluster = estimate_cluster(&influence, &points, None).unwrap();
        assert_eq!(cluster.center, Coordinate::new(3.0, 3.0));
        assert_eq!(cluster.radius, 0.0);
    }

    #[test]
    fn test_nothing_resolves() {
        let points = vec![point(1, 3.0, 3.0)];
        assert!(estimate_cluster(&[record(2, 0.1)], &points, None).is_none());
    }

    #[test]
    fn test_current_movie_is_not_part_of_cluster() {
        let points = vec![point(1, 0.0, 0.0), point(2, 5.0, 5.0)];
        assert!(estimate_cluster(&[record(1, 0.4)], &points, Some(1)).is_none());

        let influence = vec![record(1, 0.4), record(2, 0.1)];
        let cluster = estimate_cluster(&influence, &points, Some(1)).unwrap();
        assert_eq!(cluster.center, Coordinate::new(5.0, 5.0));
        assert_eq!(cluster.radius, 0.0);
    }

    #[test]
    fn test_radius_never_negative() {
        let points: Vec<EmbeddingPoint> = (0..12)
            .map(|i| point(i, (i as f64).sin() * -7.0, (i as f64).cos() * 3.0))
            .collect();
        let influence: Vec<InfluenceRecord> =
            (0..12).map(|i| record(i, if i % 2 == 0 { 0.3 } else { -0.3 })).collect();

        let cluster = estimate_cluster(&influence, &points, None).unwrap();
        assert!(cluster.radius >= 0.0);
    }
}
