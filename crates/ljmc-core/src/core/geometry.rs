use nalgebra::{Point3, Vector3};

/// Shortest displacement from `b` to `a` under cubic periodic boundary
/// conditions, applied independently per axis.
#[inline]
pub fn minimum_image(a: &Point3<f64>, b: &Point3<f64>, box_length: f64) -> Vector3<f64> {
    let d = a - b;
    Vector3::new(
        d.x - box_length * (d.x / box_length).round(),
        d.y - box_length * (d.y / box_length).round(),
        d.z - box_length * (d.z / box_length).round(),
    )
}

#[inline]
pub fn minimum_image_distance_squared(a: &Point3<f64>, b: &Point3<f64>, box_length: f64) -> f64 {
    minimum_image(a, b, box_length).norm_squared()
}

/// Wraps a position back into the canonical cell centred on the origin.
#[inline]
pub fn wrap(position: &Point3<f64>, box_length: f64) -> Point3<f64> {
    Point3::new(
        position.x - box_length * (position.x / box_length).round(),
        position.y - box_length * (position.y / box_length).round(),
        position.z - box_length * (position.z / box_length).round(),
    )
}
