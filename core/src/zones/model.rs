use serde::{Deserialize, Serialize};

use crate::zones::geometry::{point_in_polygon, Point};

/// A user-drawn polygon over an area's camera frame.
///
/// The editor quick-draw path always commits four points, but loaded
/// zones may carry any vertex count; anything below three is tolerated in
/// the model and simply never renders or hit-tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    pub name: String,
    pub points: Vec<Point>,
    #[serde(default = "default_visible")]
    pub visible_to_users: bool,
}

pub(crate) fn default_visible() -> bool {
    true
}

impl Zone {
    pub fn new(id: u32, name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            id,
            name: name.into(),
            points,
            visible_to_users: true,
        }
    }

    /// Filled rendering and hit-testing need at least a triangle.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 3
    }

    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point, &self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_point_zone_is_not_renderable_or_hittable() {
        let zone = Zone::new(1, "Zone 1", vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        assert!(!zone.is_renderable());
        assert!(!zone.contains(Point::new(1.0, 1.0)));
    }
}
