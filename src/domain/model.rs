use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point in the host application's world frame (e.g. millimeters, RAS or LPS).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Point3D) -> f64 {
        // hypot avoids overflow in the squares for far-apart finite points
        (other.x - self.x)
            .hypot(other.y - self.y)
            .hypot(other.z - self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Parses `"x,y,z"`, whitespace around components allowed.
impl FromStr for Point3D {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!(
                "expected 3 comma-separated coordinates, got {}",
                parts.len()
            ));
        }

        let mut coords = [0.0; 3];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate '{}': {}", part, e))?;
        }

        Ok(Point3D::new(coords[0], coords[1], coords[2]))
    }
}

/// Sphere with a strictly positive, finite radius.
///
/// Fields are private so the only way to obtain one is a successful fit
/// (or a session load, which re-checks the radius).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sphere {
    center: Point3D,
    radius: f64,
}

impl Sphere {
    pub(crate) fn new_checked(center: Point3D, radius: f64) -> Option<Self> {
        if radius.is_finite() && radius > 0.0 && center.is_finite() {
            Some(Self { center, radius })
        } else {
            None
        }
    }

    pub fn center(&self) -> Point3D {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl<'de> Deserialize<'de> for Sphere {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawSphere {
            center: Point3D,
            radius: f64,
        }

        let raw = RawSphere::deserialize(deserializer)?;
        Sphere::new_checked(raw.center, raw.radius).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid sphere radius {}", raw.radius))
        })
    }
}

/// The JSON body sent to the coordinates endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PublishPayload {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
}

/// Whatever the server answered with on success, passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerAck(pub serde_json::Value);

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}
