use serde::{Deserialize, Serialize};

/// Width of the fixed reference frame all zone coordinates live in.
pub const REF_WIDTH: f32 = 1280.0;
/// Height of the fixed reference frame.
pub const REF_HEIGHT: f32 = 720.0;

/// A point in reference-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Ray-casting parity test, closing edge included.
///
/// Polygons with fewer than three vertices are never hit. The boundary
/// tie-break follows the strict parity rule: for an axis-aligned square
/// the bottom-left vertex tests inside and the top-right vertex outside.
/// Either answer is acceptable as long as it is deterministic; the tests
/// pin the one produced here.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        let crosses = (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Scale an on-screen click into the fixed 1280x720 reference frame.
///
/// Returns `None` for degenerate rendered sizes.
pub fn to_reference_frame(
    screen_x: f32,
    screen_y: f32,
    rendered_width: f32,
    rendered_height: f32,
) -> Option<Point> {
    if rendered_width <= 0.0 || rendered_height <= 0.0 {
        return None;
    }
    Some(Point::new(
        screen_x * REF_WIDTH / rendered_width,
        screen_y * REF_HEIGHT / rendered_height,
    ))
}
