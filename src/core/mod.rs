pub mod fitter;
pub mod publisher;
pub mod session;

pub use crate::domain::model::{Point3D, PublishPayload, ServerAck, Sphere};
pub use crate::domain::ports::{Segmenter, Transport};
pub use crate::utils::error::Result;
