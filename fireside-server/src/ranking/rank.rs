//! Proximity ranking of stations around a reference point.

use tracing::debug;

use crate::domain::{GeoPoint, InvalidCoordinate, StationId, StationRecord, distance_km};

/// Default number of stations shown in the nearby panel.
pub const DEFAULT_LIMIT: usize = 5;

/// A station record augmented with its distance from the reference point.
///
/// Derived per query and never persisted; `distance_km` always equals the
/// great-circle distance between the reference point and the station.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: StationRecord,
    pub distance_km: f64,
}

/// A station excluded from a ranking because its stored coordinates are
/// invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedStation {
    pub id: StationId,
    pub error: InvalidCoordinate,
}

/// Result of a ranking pass: the ordered nearest stations plus any records
/// that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub stations: Vec<RankedStation>,
    pub skipped: Vec<SkippedStation>,
}

/// Rank `stations` by great-circle distance from `reference`.
///
/// The result is sorted ascending by distance, ties broken ascending by
/// station id so that unordered input yields deterministic output, then
/// truncated to `limit`. `limit = 0` and an empty input both yield an empty
/// ranking, not an error. A record whose stored coordinates do not form a
/// valid [`GeoPoint`] is skipped and reported; one bad record never blanks
/// the whole list.
pub fn rank(reference: &GeoPoint, stations: &[StationRecord], limit: usize) -> Ranking {
    let mut ranked = Vec::with_capacity(stations.len());
    let mut skipped = Vec::new();

    for station in stations {
        match station.location() {
            Ok(location) => ranked.push(RankedStation {
                distance_km: distance_km(reference, &location),
                station: station.clone(),
            }),
            Err(error) => {
                debug!(id = %station.id, %error, "skipping station with invalid coordinates");
                skipped.push(SkippedStation {
                    id: station.id.clone(),
                    error,
                });
            }
        }
    }

    ranked.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.station.id.cmp(&b.station.id))
    });
    ranked.truncate(limit);

    Ranking {
        stations: ranked,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SupplyLevels;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn station(id: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord {
            id: StationId::new(id).unwrap(),
            display_name: format!("Station {id}"),
            latitude: lat,
            longitude: lon,
            supplies: SupplyLevels::default(),
        }
    }

    fn ids(ranking: &Ranking) -> Vec<&str> {
        ranking
            .stations
            .iter()
            .map(|r| r.station.id.as_str())
            .collect()
    }

    #[test]
    fn sorts_by_distance() {
        let reference = point(34.0522, -118.2637);
        let stations = vec![
            station("far", 34.20, -118.2637),
            station("near", 34.06, -118.2637),
            station("mid", 34.10, -118.2637),
        ];

        let ranking = rank(&reference, &stations, 10);

        assert_eq!(ids(&ranking), vec!["near", "mid", "far"]);
        assert!(ranking.skipped.is_empty());
    }

    #[test]
    fn distances_match_the_formula() {
        let reference = point(34.0522, -118.2637);
        let stations = vec![station("east", 34.0522, -118.2437)];

        let ranking = rank(&reference, &stations, 5);

        let d = ranking.stations[0].distance_km;
        assert!((d - 1.85).abs() < 0.05, "expected ~1.85 km, got {d}");
    }

    #[test]
    fn truncates_to_limit_keeping_nearest() {
        let reference = point(0.0, 0.0);
        let stations: Vec<StationRecord> = (0..7)
            .map(|i| station(&format!("s{i}"), 0.1 * (7 - i) as f64, 0.0))
            .collect();

        let ranking = rank(&reference, &stations, 5);

        assert_eq!(ranking.stations.len(), 5);
        // s6 is nearest (0.1 deg), s0 and s1 are the two farthest and must be cut
        assert_eq!(ids(&ranking), vec!["s6", "s5", "s4", "s3", "s2"]);
    }

    #[test]
    fn zero_limit_yields_empty() {
        let reference = point(0.0, 0.0);
        let stations = vec![station("a", 1.0, 1.0)];

        let ranking = rank(&reference, &stations, 0);

        assert!(ranking.stations.is_empty());
        assert!(ranking.skipped.is_empty());
    }

    #[test]
    fn empty_input_yields_empty() {
        let ranking = rank(&point(0.0, 0.0), &[], 5);
        assert!(ranking.stations.is_empty());
        assert!(ranking.skipped.is_empty());
    }

    #[test]
    fn equal_distances_break_ties_by_id() {
        let reference = point(0.0, 0.0);
        // Same coordinates, deliberately inserted out of id order
        let stations = vec![
            station("b", 1.0, 1.0),
            station("c", 1.0, 1.0),
            station("a", 1.0, 1.0),
        ];

        let ranking = rank(&reference, &stations, 5);

        assert_eq!(ids(&ranking), vec!["a", "b", "c"]);
    }

    #[test]
    fn invalid_station_is_skipped_not_fatal() {
        let reference = point(0.0, 0.0);
        let stations = vec![
            station("good", 1.0, 1.0),
            station("broken", 123.0, 1.0),
            station("also-good", 2.0, 2.0),
        ];

        let ranking = rank(&reference, &stations, 5);

        assert_eq!(ids(&ranking), vec!["good", "also-good"]);
        assert_eq!(ranking.skipped.len(), 1);
        assert_eq!(ranking.skipped[0].id.as_str(), "broken");
    }
}
