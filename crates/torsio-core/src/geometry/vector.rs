//! Minimal 3-vector arithmetic on `[f64; 3]`.

pub(crate) type Vec3 = [f64; 3];

/// Segments shorter than this are treated as duplicate coordinates.
pub(crate) const MIN_SEGMENT: f64 = 1e-9;

pub(crate) fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm(a: &Vec3) -> f64 {
    dot(a, a).sqrt()
}
