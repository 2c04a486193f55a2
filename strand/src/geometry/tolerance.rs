// Centralized tolerances and helpers for robust geometry

pub const EPS_POS: f32 = 1e-4;            // point coincidence threshold (pct)
pub const EPS_LEN: f32 = 1e-6;            // zero-length vector threshold
pub const EPS_DENOM: f32 = 1e-8;          // denominator guard for ratios
pub const EPS_COORD: f32 = 1e-3;          // coordinate compare slack for tests/invariants

// Uniform parameter steps used when sampling a cubic for hit-testing.
// On-screen tolerance is a few pixels, so plain sampling is enough; bump
// this rather than switching to root-finding if finer picking is needed.
pub const CURVE_SAMPLES: u32 = 200;

// Hit-testing tolerances, in image pixels.
pub const VERTEX_TOL_PX: f32 = 6.0;
pub const SEGMENT_TOL_PX: f32 = 10.0;

#[inline] pub fn clamp01(x: f32) -> f32 { x.max(0.0).min(1.0) }
#[inline] pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 { x.max(lo).min(hi) }
#[inline] pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }

#[inline]
pub fn safe_div(num: f32, den: f32, fallback: f32) -> f32 {
    if den.abs() <= EPS_DENOM { fallback } else { num / den }
}
