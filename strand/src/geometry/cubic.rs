//! Cubic Bézier curve utilities for subdivision and manipulation.
//!
//! These helpers split path segments at a hit parameter when the user
//! inserts a point mid-curve, preserving the visual curve shape.

use crate::model::Vec2;

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug)]
pub struct CubicBezier {
    pub p0: Vec2, // Start point
    pub p1: Vec2, // First control point
    pub p2: Vec2, // Second control point
    pub p3: Vec2, // End point
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f32) -> Vec2 {
        crate::geometry::math::cubic_point(t, self.p0, self.p1, self.p2, self.p3)
    }

    /// Split the curve at parameter t using de Casteljau subdivision.
    ///
    /// Returns two cubic curves: the first from 0..t, the second from t..1.
    pub fn split_at(&self, t: f32) -> (CubicBezier, CubicBezier) {
        let p01 = lerp_vec2(self.p0, self.p1, t);
        let p12 = lerp_vec2(self.p1, self.p2, t);
        let p23 = lerp_vec2(self.p2, self.p3, t);

        let p012 = lerp_vec2(p01, p12, t);
        let p123 = lerp_vec2(p12, p23, t);

        let p0123 = lerp_vec2(p012, p123, t); // The split point

        let first = CubicBezier::new(self.p0, p01, p012, p0123);
        let second = CubicBezier::new(p0123, p123, p23, self.p3);

        (first, second)
    }
}

/// Linear interpolation between two Vec2s.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2 {
        x: a.x + t * (b.x - a.x),
        y: a.y + t * (b.y - a.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec2(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    #[test]
    fn test_eval_endpoints() {
        let curve = CubicBezier::new(
            vec2(0.0, 0.0),
            vec2(1.0, 2.0),
            vec2(3.0, 2.0),
            vec2(4.0, 0.0),
        );

        let start = curve.eval(0.0);
        let end = curve.eval(1.0);

        assert!((start.x - 0.0).abs() < 1e-6);
        assert!((start.y - 0.0).abs() < 1e-6);
        assert!((end.x - 4.0).abs() < 1e-6);
        assert!((end.y - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_split_at_midpoint() {
        let curve = CubicBezier::new(
            vec2(0.0, 0.0),
            vec2(1.0, 2.0),
            vec2(3.0, 2.0),
            vec2(4.0, 0.0),
        );

        let (first, second) = curve.split_at(0.5);

        // First curve should start at original start
        assert!((first.p0.x - 0.0).abs() < 1e-6);

        // Second curve should end at original end
        assert!((second.p3.x - 4.0).abs() < 1e-6);

        // Split point should match
        let mid = curve.eval(0.5);
        assert!((first.p3.x - mid.x).abs() < 1e-6);
        assert!((first.p3.y - mid.y).abs() < 1e-6);
        assert!((second.p0.x - mid.x).abs() < 1e-6);
        assert!((second.p0.y - mid.y).abs() < 1e-6);
    }

    #[test]
    fn test_split_continuity() {
        let curve = CubicBezier::new(
            vec2(0.0, 0.0),
            vec2(0.0, 10.0),
            vec2(10.0, 10.0),
            vec2(10.0, 0.0),
        );

        let (first, _second) = curve.split_at(0.3);

        // Sample points on the left split curve should match the original
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let orig_point = curve.eval(t * 0.3);
            let split_point = first.eval(t);

            assert!(
                (orig_point.x - split_point.x).abs() < 1e-4,
                "x mismatch at t={}: {} vs {}",
                t,
                orig_point.x,
                split_point.x
            );
            assert!(
                (orig_point.y - split_point.y).abs() < 1e-4,
                "y mismatch at t={}: {} vs {}",
                t,
                orig_point.y,
                split_point.y
            );
        }
    }
}
