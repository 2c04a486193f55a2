use super::tolerance::{approx_eq, EPS_POS};
use crate::model::Vec2;

/// Squared distance from (px,py) to segment (x1,y1)-(x2,y2) and the clamped
/// parameter t of the closest point. A zero-length segment projects to its
/// start with t = 0.
pub fn seg_distance_sq(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32) {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx * vx + vy * vy;
    let mut t = if vv > 0.0 { (wx * vx + wy * vy) / vv } else { 0.0 };
    if t < 0.0 { t = 0.0; } else if t > 1.0 { t = 1.0; }
    let projx = x1 + t * vx; let projy = y1 + t * vy;
    let dx = px - projx; let dy = py - projy;
    (dx * dx + dy * dy, t)
}

/// Closest point on segment a-b to p.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let (_, t) = seg_distance_sq(p.x, p.y, a.x, a.y, b.x, b.y);
    Vec2 { x: a.x + t * (b.x - a.x), y: a.y + t * (b.y - a.y) }
}

pub fn cubic_point(t: f32, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Vec2 {
    let u = 1.0 - t;
    let tt = t * t; let uu = u * u;
    let uuu = uu * u; let ttt = tt * t;
    Vec2 {
        x: uuu * p0.x + 3.0 * uu * t * p1.x + 3.0 * u * tt * p2.x + ttt * p3.x,
        y: uuu * p0.y + 3.0 * uu * t * p1.y + 3.0 * u * tt * p2.y + ttt * p3.y,
    }
}

/// Squared distance from p to a cubic and the parameter of the nearest
/// sample, using `samples` uniform steps.
pub fn cubic_distance_sq(p: Vec2, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, samples: u32) -> (f32, f32) {
    // Degenerate: all control points coincident
    if approx_eq(p0.x, p1.x, EPS_POS) && approx_eq(p1.x, p2.x, EPS_POS) && approx_eq(p2.x, p3.x, EPS_POS)
        && approx_eq(p0.y, p1.y, EPS_POS) && approx_eq(p1.y, p2.y, EPS_POS) && approx_eq(p2.y, p3.y, EPS_POS) {
        let dx = p.x - p0.x; let dy = p.y - p0.y;
        return (dx * dx + dy * dy, 0.0);
    }
    let mut best_d2 = f32::INFINITY;
    let mut best_t = 0.0;
    let n = samples.max(1);
    for i in 0..=n {
        let t = i as f32 / n as f32;
        let q = cubic_point(t, p0, p1, p2, p3);
        let dx = p.x - q.x; let dy = p.y - q.y;
        let d2 = dx * dx + dy * dy;
        if d2 < best_d2 { best_d2 = d2; best_t = t; }
    }
    (best_d2, best_t)
}

/// Closest sampled point on a cubic to p.
pub fn closest_point_on_cubic(p: Vec2, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, samples: u32) -> Vec2 {
    let (_, t) = cubic_distance_sq(p, p0, p1, p2, p3, samples);
    cubic_point(t, p0, p1, p2, p3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 { Vec2 { x, y } }

    #[test]
    fn segment_projection_clamps_to_endpoints() {
        let (d2, t) = seg_distance_sq(-5.0, 0.0, 0.0, 0.0, 10.0, 0.0);
        assert_eq!(t, 0.0);
        assert!((d2 - 25.0).abs() < 1e-6);
        let (_, t) = seg_distance_sq(20.0, 3.0, 0.0, 0.0, 10.0, 0.0);
        assert_eq!(t, 1.0);
    }

    #[test]
    fn zero_length_segment_returns_start() {
        let c = closest_point_on_segment(v(3.0, 4.0), v(1.0, 1.0), v(1.0, 1.0));
        assert_eq!((c.x, c.y), (1.0, 1.0));
    }

    #[test]
    fn cubic_sampling_finds_on_curve_point() {
        let (p0, p1, p2, p3) = (v(0.0, 0.0), v(10.0, 20.0), v(30.0, 20.0), v(40.0, 0.0));
        // A point exactly on the curve at t=0.37 must come back within one
        // sampling step of the true parameter.
        let t_true = 0.37;
        let on_curve = cubic_point(t_true, p0, p1, p2, p3);
        let (d2, t) = cubic_distance_sq(on_curve, p0, p1, p2, p3, 200);
        assert!(d2 < 0.1, "d2={}", d2);
        assert!((t - t_true).abs() <= 1.0 / 200.0 + 1e-6, "t={}", t);
    }

    #[test]
    fn degenerate_cubic_no_nan() {
        let p = v(5.0, 5.0);
        let q = v(1.0, 1.0);
        let (d2, t) = cubic_distance_sq(p, q, q, q, q, 200);
        assert!(d2.is_finite());
        assert_eq!(t, 0.0);
    }
}
