pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{http::HttpTransport, segmentation::CommandSegmenter, session_store::SessionStore};
pub use app::FemoralHeadApp;
pub use config::AppConfig;
pub use crate::core::{
    fitter::{fit, fit_points},
    publisher::{to_payload, CoordinatePublisher, DEFAULT_ENDPOINT},
    session::Session,
};
pub use domain::model::{Point3D, PublishPayload, ServerAck, Sphere, TransportResponse};
pub use domain::ports::{Segmenter, Transport};
pub use utils::error::{AppError, FitError, PublishError, Result, SegmentationError};
