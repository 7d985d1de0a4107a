use crate::models::{InfluenceDirection, InfluenceEntry, InfluencePanel, InfluenceRecord};

/// Formats influence records for the side panel
///
/// Keeps the oracle's ordering as-is. Returns `None` for an empty list so the
/// panel is hidden rather than shown empty.
pub fn present_influence(records: &[InfluenceRecord]) -> Option<InfluencePanel> {
    if records.is_empty() {
        return None;
    }

    let entries = records
        .iter()
        .map(|record| {
            let direction = if record.is_positive() {
                InfluenceDirection::Toward
            } else {
                InfluenceDirection::Away
            };

            InfluenceEntry {
                movie_id: record.movie_id,
                title: record.title.clone(),
                direction,
                marker: direction.marker().to_string(),
                magnitude: format!("{:.3}", record.magnitude()),
            }
        })
        .collect();

    Some(InfluencePanel { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(movie_id: i64, title: &str, influence: f64) -> InfluenceRecord {
        InfluenceRecord {
            movie_id,
            title: title.to_string(),
            influence,
        }
    }

    #[test]
    fn test_empty_hides_panel() {
        assert!(present_influence(&[]).is_none());
    }

    #[test]
    fn test_direction_and_magnitude() {
        let panel = present_influence(&[
            record(1, "Alien", 0.5),
            record(2, "Cats", -0.23456),
        ])
        .unwrap();

        assert_eq!(panel.entries[0].direction, InfluenceDirection::Toward);
        assert_eq!(panel.entries[0].marker, "▲");
        assert_eq!(panel.entries[0].magnitude, "0.500");
        assert_eq!(panel.entries[1].direction, InfluenceDirection::Away);
        assert_eq!(panel.entries[1].marker, "▼");
        assert_eq!(panel.entries[1].magnitude, "0.235");
    }

    #[test]
    fn test_oracle_order_is_kept() {
        let panel = present_influence(&[
            record(3, "Small", 0.01),
            record(1, "Large", -0.9),
            record(2, "Medium", 0.4),
        ])
        .unwrap();

        let order: Vec<i64> = panel.entries.iter().map(|e| e.movie_id).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
