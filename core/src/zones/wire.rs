use serde::{Deserialize, Serialize};

use crate::zones::geometry::Point;
use crate::zones::model::{default_visible, Zone};

/// Zone shape sent to the backend on save.
///
/// Coordinates are rounded to integers on the way out; `from_wire` is the
/// exact inverse, so a round trip is lossless up to that rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneWire {
    pub id: u32,
    pub name: String,
    pub points: Vec<[i32; 2]>,
}

/// Zone row shape returned by the backend's zone-list endpoint.
///
/// The list shape differs from the save shape: rows carry `zone_id` /
/// `zone_name` / `coordinates` keys plus the user-visibility flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub zone_id: u32,
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<[i32; 2]>,
    #[serde(default = "default_visible")]
    pub visible_to_users: bool,
}

pub fn to_wire(zones: &[Zone]) -> Vec<ZoneWire> {
    zones
        .iter()
        .map(|zone| ZoneWire {
            id: zone.id,
            name: zone.name.clone(),
            points: zone
                .points
                .iter()
                .map(|point| [point.x.round() as i32, point.y.round() as i32])
                .collect(),
        })
        .collect()
}

pub fn from_wire(wire: &[ZoneWire]) -> Vec<Zone> {
    wire.iter()
        .map(|zone| Zone {
            id: zone.id,
            name: zone.name.clone(),
            points: points_from_pairs(&zone.points),
            visible_to_users: true,
        })
        .collect()
}

fn points_from_pairs(pairs: &[[i32; 2]]) -> Vec<Point> {
    pairs
        .iter()
        .map(|pair| Point::new(pair[0] as f32, pair[1] as f32))
        .collect()
}

impl From<ZoneRecord> for Zone {
    fn from(record: ZoneRecord) -> Self {
        let name = record
            .zone_name
            .unwrap_or_else(|| format!("Zone_{}", record.zone_id));
        Zone {
            id: record.zone_id,
            name,
            points: points_from_pairs(&record.coordinates),
            visible_to_users: record.visible_to_users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_zones_round_trip_exactly() {
        let zones = vec![
            Zone::new(
                1,
                "Entrance Queue",
                vec![
                    Point::new(100.0, 50.0),
                    Point::new(400.0, 50.0),
                    Point::new(400.0, 300.0),
                    Point::new(100.0, 300.0),
                ],
            ),
            Zone::new(
                3,
                "Checkout",
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(1280.0, 0.0),
                    Point::new(640.0, 720.0),
                ],
            ),
        ];

        let restored = from_wire(&to_wire(&zones));
        assert_eq!(restored, zones);
    }

    #[test]
    fn fractional_coordinates_round_to_integers() {
        let zones = vec![Zone::new(
            2,
            "Zone 2",
            vec![
                Point::new(10.4, 20.6),
                Point::new(30.5, 40.4),
                Point::new(50.0, 60.9),
                Point::new(5.2, 44.8),
            ],
        )];

        let wire = to_wire(&zones);
        assert_eq!(wire[0].points, vec![[10, 21], [31, 40], [50, 61], [5, 45]]);
    }

    #[test]
    fn list_rows_convert_with_fallback_names() {
        let record = ZoneRecord {
            zone_id: 4,
            zone_name: None,
            coordinates: vec![[0, 0], [10, 0], [10, 10], [0, 10]],
            visible_to_users: false,
        };

        let zone = Zone::from(record);
        assert_eq!(zone.name, "Zone_4");
        assert!(!zone.visible_to_users);
        assert_eq!(zone.points.len(), 4);
    }

    #[test]
    fn list_rows_decode_with_missing_optional_fields() {
        let json = r#"{"zone_id": 9, "coordinates": [[1, 2], [3, 4], [5, 6]]}"#;
        let record: ZoneRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.zone_id, 9);
        assert!(record.visible_to_users);
        let zone = Zone::from(record);
        assert_eq!(zone.name, "Zone_9");
    }
}
