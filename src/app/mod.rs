use crate::adapters::http::HttpTransport;
use crate::adapters::segmentation::CommandSegmenter;
use crate::adapters::session_store::SessionStore;
use crate::config::AppConfig;
use crate::core::publisher::{to_payload, CoordinatePublisher};
use crate::core::session::Session;
use crate::domain::model::{Point3D, PublishPayload, ServerAck, Sphere};
use crate::domain::ports::{Segmenter, Transport};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// The three user actions, wired to a persisted session.
pub struct FemoralHeadApp<T: Transport, S: Segmenter> {
    store: SessionStore,
    publisher: CoordinatePublisher<T>,
    segmenter: S,
}

impl FemoralHeadApp<HttpTransport, CommandSegmenter> {
    pub fn from_config(config: &AppConfig, session_override: Option<PathBuf>) -> Result<Self> {
        let transport = HttpTransport::new(config.publish_timeout())?;
        let store = SessionStore::new(
            session_override.unwrap_or_else(|| PathBuf::from(&config.session.path)),
        );

        Ok(Self::new(
            store,
            CoordinatePublisher::with_endpoint(transport, config.publish.endpoint.clone()),
            config.build_segmenter(),
        ))
    }
}

impl<T: Transport, S: Segmenter> FemoralHeadApp<T, S> {
    pub fn new(store: SessionStore, publisher: CoordinatePublisher<T>, segmenter: S) -> Self {
        Self {
            store,
            publisher,
            segmenter,
        }
    }

    pub async fn segment(&self, input: &Path) -> Result<PathBuf> {
        Ok(self.segmenter.segment(input).await?)
    }

    /// Fits and persists. A rejected fit leaves the stored sphere alone.
    pub fn fit(&self, center: Point3D, surface_point: Point3D) -> Result<Sphere> {
        let mut session = self.store.load()?;
        let sphere = session.fit(center, surface_point)?;
        self.store.save(&session)?;
        Ok(sphere)
    }

    pub async fn publish(&self) -> Result<ServerAck> {
        let session = self.store.load()?;
        tracing::info!("📡 Sending coordinates to {}", self.publisher.endpoint());
        Ok(self.publisher.publish_latest(&session).await?)
    }

    pub fn current(&self) -> Result<Option<(Sphere, PublishPayload)>> {
        let session: Session = self.store.load()?;
        Ok(session.latest().map(|sphere| (*sphere, to_payload(sphere))))
    }
}
