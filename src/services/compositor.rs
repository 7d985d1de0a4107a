//! Dataset compositor.
//!
//! Splits the embedding space into disjoint, render-ready categories for one
//! current movie. Classification priority is fixed: current movie, then
//! influential, then the point's own rating.

use std::collections::HashSet;

use crate::models::{
    CategoryKind, ColorHint, EmbeddingPoint, InfluenceRecord, MovieId, PlotPoint, PointCategory,
    RatingValue, UserPreferencePoint,
};

/// Output of one composition pass
///
/// Every input point lands in exactly one of the five point collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedDatasets {
    pub current: Vec<EmbeddingPoint>,
    /// Influential points keep their rating so the chart can color them
    pub influential: Vec<EmbeddingPoint>,
    pub liked: Vec<EmbeddingPoint>,
    pub disliked: Vec<EmbeddingPoint>,
    pub unseen: Vec<EmbeddingPoint>,
    pub user_preference: Option<UserPreferencePoint>,
}

impl CategorizedDatasets {
    /// True when there is nothing to plot; callers skip rendering entirely
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
            && self.influential.is_empty()
            && self.liked.is_empty()
            && self.disliked.is_empty()
            && self.unseen.is_empty()
    }

    /// Number of movie points across all five collections
    pub fn point_count(&self) -> usize {
        self.current.len()
            + self.influential.len()
            + self.liked.len()
            + self.disliked.len()
            + self.unseen.len()
    }

    /// Named categories in drawing order, user preference last when present
    pub fn to_categories(&self) -> Vec<PointCategory> {
        let mut categories = vec![
            category(CategoryKind::Unseen, &self.unseen, |_| ColorHint::Neutral),
            category(CategoryKind::Liked, &self.liked, |_| ColorHint::Positive),
            category(CategoryKind::Disliked, &self.disliked, |_| ColorHint::Negative),
            category(CategoryKind::Influential, &self.influential, |p| {
                ColorHint::from(p.rating)
            }),
            category(CategoryKind::CurrentMovie, &self.current, |_| {
                ColorHint::Highlight
            }),
        ];

        if let Some(user) = self.user_preference {
            categories.push(PointCategory {
                kind: CategoryKind::UserPreference,
                name: CategoryKind::UserPreference.label().to_string(),
                points: vec![PlotPoint {
                    movie_id: None,
                    x: user.x,
                    y: user.y,
                    label: Some(CategoryKind::UserPreference.label().to_string()),
                    color: Some(ColorHint::User),
                }],
            });
        }

        categories
    }
}

fn category(
    kind: CategoryKind,
    points: &[EmbeddingPoint],
    color: impl Fn(&EmbeddingPoint) -> ColorHint,
) -> PointCategory {
    PointCategory {
        kind,
        name: kind.label().to_string(),
        points: points
            .iter()
            .map(|p| PlotPoint {
                movie_id: Some(p.movie_id),
                x: p.x,
                y: p.y,
                label: Some(p.title.clone()),
                color: Some(color(p)),
            })
            .collect(),
    }
}

/// Classifies every embedding point relative to `current_movie`
///
/// Pure: identical inputs always give identical output, in input order.
/// Influence records without a matching point are ignored here; they are
/// still listed by the influence panel.
pub fn compose(
    points: &[EmbeddingPoint],
    influence: &[InfluenceRecord],
    current_movie: Option<MovieId>,
    user_point: Option<UserPreferencePoint>,
) -> CategorizedDatasets {
    let influential: HashSet<MovieId> = influence.iter().map(|r| r.movie_id).collect();

    let mut datasets = CategorizedDatasets {
        user_preference: user_point,
        ..Default::default()
    };

    for point in points {
        let bucket = if Some(point.movie_id) == current_movie {
            &mut datasets.current
        } else if influential.contains(&point.movie_id) {
            &mut datasets.influential
        } else {
            match point.rating {
                RatingValue::Liked => &mut datasets.liked,
                RatingValue::Disliked => &mut datasets.disliked,
                RatingValue::Unrated => &mut datasets.unseen,
            }
        };
        bucket.push(point.clone());
    }

    tracing::debug!(
        points = points.len(),
        influential = datasets.influential.len(),
        current_found = !datasets.current.is_empty(),
        "Composed embedding datasets"
    );

    datasets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn point(movie_id: MovieId, rating: Option<bool>, x: f64, y: f64) -> EmbeddingPoint {
        EmbeddingPoint {
            movie_id,
            title: format!("Movie {}", movie_id),
            x,
            y,
            rating: rating.into(),
        }
    }

    fn record(movie_id: MovieId, influence: f64) -> InfluenceRecord {
        InfluenceRecord {
            movie_id,
            title: format!("Movie {}", movie_id),
            influence,
        }
    }

    fn ids(points: &[EmbeddingPoint]) -> Vec<MovieId> {
        points.iter().map(|p| p.movie_id).collect()
    }

    #[test]
    fn test_current_movie_without_influence() {
        let points = vec![
            point(1, Some(true), 0.0, 0.0),
            point(2, Some(false), 1.0, 1.0),
            point(3, None, 2.0, 2.0),
        ];

        let datasets = compose(&points, &[], Some(3), None);

        assert_eq!(ids(&datasets.liked), vec![1]);
        assert_eq!(ids(&datasets.disliked), vec![2]);
        assert!(datasets.unseen.is_empty());
        assert_eq!(ids(&datasets.current), vec![3]);
        assert!(datasets.influential.is_empty());
    }

    #[test]
    fn test_influential_points_leave_rating_partitions() {
        let points = vec![
            point(1, Some(true), 0.0, 0.0),
            point(2, Some(false), 2.0, 0.0),
            point(3, None, 5.0, 5.0),
            point(4, Some(true), 9.0, 9.0),
        ];
        let influence = vec![record(1, 0.5), record(2, -0.2)];

        let datasets = compose(&points, &influence, Some(3), None);

        assert_eq!(ids(&datasets.influential), vec![1, 2]);
        assert_eq!(datasets.influential[0].rating, RatingValue::Liked);
        assert_eq!(datasets.influential[1].rating, RatingValue::Disliked);
        assert_eq!(ids(&datasets.liked), vec![4]);
        assert!(datasets.disliked.is_empty());
    }

    #[test]
    fn test_current_wins_over_influential() {
        let points = vec![point(1, Some(true), 0.0, 0.0)];
        let datasets = compose(&points, &[record(1, 0.9)], Some(1), None);

        assert_eq!(ids(&datasets.current), vec![1]);
        assert!(datasets.influential.is_empty());
    }

    #[test]
    fn test_partitions_are_disjoint_and_cover_input() {
        let points: Vec<EmbeddingPoint> = (1..=30)
            .map(|id| {
                let rating = match id % 3 {
                    0 => Some(true),
                    1 => Some(false),
                    _ => None,
                };
                point(id, rating, id as f64, -(id as f64))
            })
            .collect();
        let influence = vec![record(4, 0.3), record(9, -0.1), record(99, 0.7)];

        let datasets = compose(&points, &influence, Some(17), None);

        let mut seen: Vec<MovieId> = [
            &datasets.current,
            &datasets.influential,
            &datasets.liked,
            &datasets.disliked,
            &datasets.unseen,
        ]
        .iter()
        .flat_map(|c| ids(c))
        .collect();
        assert_eq!(seen.len(), points.len());
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), points.len());
        assert_eq!(datasets.point_count(), 30);
    }

    #[test]
    fn test_unknown_influential_id_is_dropped() {
        let points = vec![point(1, None, 0.0, 0.0)];
        let datasets = compose(&points, &[record(404, 1.0)], None, None);

        assert!(datasets.influential.is_empty());
        assert_eq!(ids(&datasets.unseen), vec![1]);
    }

    #[test]
    fn test_composition_is_deterministic() {
        let points = vec![
            point(1, Some(true), 0.0, 0.0),
            point(2, None, 1.0, 0.0),
            point(3, Some(false), 0.0, 1.0),
        ];
        let influence = vec![record(3, -0.4)];
        let user = Some(Coordinate::new(0.2, 0.3));

        let first = compose(&points, &influence, Some(2), user);
        let second = compose(&points, &influence, Some(2), user);
        assert_eq!(first, second);
        assert_eq!(first.to_categories(), second.to_categories());
    }

    #[test]
    fn test_empty_space() {
        let datasets = compose(&[], &[record(1, 0.5)], Some(1), None);
        assert!(datasets.is_empty());
        assert_eq!(datasets.point_count(), 0);
    }

    #[test]
    fn test_user_point_is_singleton_category() {
        let points = vec![point(1, Some(true), 0.0, 0.0)];
        let datasets = compose(&points, &[], None, Some(Coordinate::new(1.5, -0.5)));

        let categories = datasets.to_categories();
        assert_eq!(categories.len(), 6);
        let user = categories.last().unwrap();
        assert_eq!(user.kind, CategoryKind::UserPreference);
        assert_eq!(user.points.len(), 1);
        assert_eq!(user.points[0].x, 1.5);
        assert_eq!(user.points[0].movie_id, None);
    }

    #[test]
    fn test_influential_color_follows_rating() {
        let points = vec![point(1, Some(false), 0.0, 0.0), point(2, None, 1.0, 1.0)];
        let influence = vec![record(1, 0.1), record(2, 0.1)];
        let categories = compose(&points, &influence, None, None).to_categories();

        let influential = categories
            .iter()
            .find(|c| c.kind == CategoryKind::Influential)
            .unwrap();
        assert_eq!(influential.points[0].color, Some(ColorHint::Negative));
        assert_eq!(influential.points[1].color, Some(ColorHint::Neutral));
        assert_eq!(categories.len(), 5);
    }
}
