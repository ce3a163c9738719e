use crate::core::fitter;
use crate::domain::model::{Point3D, Sphere};
use crate::utils::error::FitError;
use chrono::{DateTime, Utc};

/// Holds the latest successfully fitted sphere.
///
/// The slot is overwritten by every successful fit and never cleared: a failed
/// fit or a failed publish leaves the previous sphere in place.
#[derive(Debug, Clone, Default)]
pub struct Session {
    latest: Option<Sphere>,
    fitted_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session from a previously stored slot.
    pub fn restore(latest: Option<Sphere>, fitted_at: Option<DateTime<Utc>>) -> Self {
        Self { latest, fitted_at }
    }

    pub fn fit(&mut self, center: Point3D, surface_point: Point3D) -> Result<Sphere, FitError> {
        self.store(fitter::fit(center, surface_point))
    }

    pub fn fit_points(&mut self, points: &[Point3D]) -> Result<Sphere, FitError> {
        self.store(fitter::fit_points(points))
    }

    fn store(&mut self, result: Result<Sphere, FitError>) -> Result<Sphere, FitError> {
        match result {
            Ok(sphere) => {
                tracing::info!(
                    "✅ Sphere fitted: center {}, radius {:.3}",
                    sphere.center(),
                    sphere.radius()
                );
                self.latest = Some(sphere);
                self.fitted_at = Some(Utc::now());
                Ok(sphere)
            }
            Err(e) => {
                tracing::warn!("Sphere fit rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn latest(&self) -> Option<&Sphere> {
        self.latest.as_ref()
    }

    pub fn fitted_at(&self) -> Option<DateTime<Utc>> {
        self.fitted_at
    }

    pub fn has_sphere(&self) -> bool {
        self.latest.is_some()
    }
}
