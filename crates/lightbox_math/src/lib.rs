//! Lightbox math - vector types and small geometric helpers shared by the
//! scene description and the renderer.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Lengths at or below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1e-8;

/// Normalize `v`, or return `fallback` when `v` is too short (or not finite)
/// to have a meaningful direction.
#[inline]
pub fn try_normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len = v.length();
    if len > NORMALIZE_EPSILON && len.is_finite() {
        v / len
    } else {
        fallback
    }
}

/// Mirror `v` about the unit normal `n`: `v - 2 (n . v) n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * n.dot(v) * n
}
