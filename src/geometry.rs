//! Geometry kernel shared by filtering, synthesis and feature building.
//!
//! Segments are passed as endpoint pairs in image coordinates (x right, y
//! down). Slopes are bounded: a vertical segment reports the image height
//! instead of an infinite value, keeping slope comparisons finite.
use nalgebra::Vector2;

#[inline]
fn vec2(p: [f32; 2]) -> Vector2<f32> {
    Vector2::new(p[0], p[1])
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    (vec2(a) - vec2(b)).norm()
}

/// Length of the segment `p0 → p1`.
#[inline]
pub fn segment_length(p0: [f32; 2], p1: [f32; 2]) -> f32 {
    distance(p0, p1)
}

/// Slope `dy/dx` of a segment; vertical segments map to `image_height`.
#[inline]
pub fn slope(p0: [f32; 2], p1: [f32; 2], image_height: f32) -> f32 {
    let dx = p1[0] - p0[0];
    if dx == 0.0 {
        image_height
    } else {
        (p1[1] - p0[1]) / dx
    }
}

/// Whether two slopes are (close to) perpendicular.
///
/// Uses `|-1/s1 - s2| < 1` when `s1 != 0`, otherwise `|-1/s2 - s1| < 1`
/// when `s2 != 0`. The test is evaluated in both argument orders so the
/// result does not depend on which axis comes first.
pub fn is_perpendicular(s1: f32, s2: f32) -> bool {
    perpendicular_one_way(s1, s2) || perpendicular_one_way(s2, s1)
}

fn perpendicular_one_way(s1: f32, s2: f32) -> bool {
    if s1 != 0.0 {
        (-1.0 / s1 - s2).abs() < 1.0
    } else if s2 != 0.0 {
        (-1.0 / s2 - s1).abs() < 1.0
    } else {
        false
    }
}

/// Intersection point of segments `a` and `b`, if both interpolation
/// parameters fall in `[0, 1]`.
///
/// Parallel and colinear segments (zero determinant) report no intersection.
pub fn line_intersect(a: ([f32; 2], [f32; 2]), b: ([f32; 2], [f32; 2])) -> Option<[f32; 2]> {
    let (a0, a1) = (vec2(a.0), vec2(a.1));
    let (b0, b1) = (vec2(b.0), vec2(b.1));
    let da = a1 - a0;
    let db = b1 - b0;
    let d = db.y * da.x - db.x * da.y;
    if d == 0.0 {
        return None;
    }
    let offset = a0 - b0;
    let ua = (db.x * offset.y - db.y * offset.x) / d;
    let ub = (da.x * offset.y - da.y * offset.x) / d;
    if !(0.0..=1.0).contains(&ua) || !(0.0..=1.0).contains(&ub) {
        return None;
    }
    let p = a0 + da * ua;
    Some([p.x, p.y])
}

/// Distances from `point` to `a.p0, a.p1, b.p0, b.p1`, in that order.
pub fn endpoint_distances(
    point: [f32; 2],
    a: ([f32; 2], [f32; 2]),
    b: ([f32; 2], [f32; 2]),
) -> [f32; 4] {
    [
        distance(a.0, point),
        distance(a.1, point),
        distance(b.0, point),
        distance(b.1, point),
    ]
}

/// Minimum distance from `point` to any of the four endpoints.
pub fn min_distance(point: [f32; 2], a: ([f32; 2], [f32; 2]), b: ([f32; 2], [f32; 2])) -> f32 {
    endpoint_distances(point, a, b)
        .into_iter()
        .fold(f32::INFINITY, f32::min)
}
