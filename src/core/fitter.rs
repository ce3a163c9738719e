use crate::domain::model::{Point3D, Sphere};
use crate::utils::error::FitError;

/// Two-point sphere fit: `center` is the sphere center, `surface_point` lies
/// on the sphere. Not symmetric in its arguments.
pub fn fit(center: Point3D, surface_point: Point3D) -> Result<Sphere, FitError> {
    let radius = center.distance(&surface_point);

    // NaN fails `radius > 0.0` too
    Sphere::new_checked(center, radius).ok_or(FitError::DegenerateInput)
}

/// Same as [`fit`], but takes the raw list of placed points and re-checks
/// that there are exactly two of them.
pub fn fit_points(points: &[Point3D]) -> Result<Sphere, FitError> {
    match points {
        [center, surface] => fit(*center, *surface),
        other => Err(FitError::WrongPointCount(other.len())),
    }
}
