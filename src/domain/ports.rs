use crate::domain::model::TransportResponse;
use crate::utils::error::{PublishError, SegmentationError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Outbound HTTP seam used by the coordinate publisher.
///
/// Implementations report network-level problems as
/// `PublishError::TransportFailure`; status handling is the caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> std::result::Result<TransportResponse, PublishError>;
}

/// External bone segmentation: volume in, segmented file out.
#[async_trait]
pub trait Segmenter: Send + Sync {
    async fn segment(&self, input: &Path) -> std::result::Result<PathBuf, SegmentationError>;
}
