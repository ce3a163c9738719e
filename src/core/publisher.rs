use crate::core::session::Session;
use crate::domain::model::{PublishPayload, ServerAck, Sphere};
use crate::domain::ports::Transport;
use crate::utils::error::PublishError;

pub const DEFAULT_ENDPOINT: &str = "https://cobridge.vercel.app/api/coordinates";

/// Host frame -> AR consumer frame: Y is flipped, everything else passes through.
pub fn to_payload(sphere: &Sphere) -> PublishPayload {
    let center = sphere.center();
    PublishPayload {
        x: center.x,
        // subtraction instead of negation: a zero Y must not go out as -0.0
        y: 0.0 - center.y,
        z: center.z,
        radius: sphere.radius(),
    }
}

pub struct CoordinatePublisher<T: Transport> {
    transport: T,
    endpoint: String,
}

impl<T: Transport> CoordinatePublisher<T> {
    pub fn new(transport: T) -> Self {
        Self::with_endpoint(transport, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One POST per call; no retry.
    pub async fn publish(&self, sphere: &Sphere) -> Result<ServerAck, PublishError> {
        let payload = to_payload(sphere);
        let body = serde_json::to_value(payload)
            .map_err(|e| PublishError::TransportFailure(format!("payload encoding: {}", e)))?;

        tracing::debug!("Posting {} to {}", body, self.endpoint);
        let response = self.transport.post_json(&self.endpoint, &body).await?;
        tracing::debug!("Coordinates endpoint answered HTTP {}", response.status);

        if response.status != 200 {
            tracing::warn!("❌ Coordinates rejected: HTTP {}", response.status);
            return Err(PublishError::ServerRejected(response.status));
        }

        let ack = serde_json::from_str(&response.body)
            .unwrap_or(serde_json::Value::String(response.body));

        tracing::info!("✅ Coordinates sent: {}", ack);
        Ok(ServerAck(ack))
    }

    pub async fn publish_latest(&self, session: &Session) -> Result<ServerAck, PublishError> {
        let sphere = session.latest().ok_or(PublishError::NoSphereAvailable)?;
        self.publish(sphere).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fitter::fit;
    use crate::domain::model::{Point3D, TransportResponse};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct MockTransport {
        reply: std::result::Result<TransportResponse, PublishError>,
        sent: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(TransportResponse {
                    status,
                    body: body.to_string(),
                }),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(PublishError::TransportFailure(message.to_string())),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn sent(&self) -> Vec<(String, serde_json::Value)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn post_json(
            &self,
            url: &str,
            body: &serde_json::Value,
        ) -> std::result::Result<TransportResponse, PublishError> {
            self.sent
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));
            self.reply.clone()
        }
    }

    fn sample_sphere() -> Sphere {
        // radius 7 along +z
        fit(Point3D::new(10.0, 20.0, -5.0), Point3D::new(10.0, 20.0, 2.0)).unwrap()
    }

    #[test]
    fn test_payload_negates_y_only() {
        let payload = to_payload(&sample_sphere());
        assert_eq!(
            payload,
            PublishPayload {
                x: 10.0,
                y: -20.0,
                z: -5.0,
                radius: 7.0
            }
        );
    }

    #[test]
    fn test_payload_zero_y_is_not_negative_zero() {
        let sphere = fit(Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 0.0, 0.0)).unwrap();
        let json = serde_json::to_string(&to_payload(&sphere)).unwrap();
        assert_eq!(json, r#"{"x":0.0,"y":0.0,"z":0.0,"radius":1.0}"#);
    }

    #[tokio::test]
    async fn test_publish_success_surfaces_body() {
        let transport = MockTransport::replying(200, r#"{"status":"ok"}"#);
        let publisher = CoordinatePublisher::new(transport.clone());

        let ack = publisher.publish(&sample_sphere()).await.unwrap();

        assert_eq!(ack, ServerAck(serde_json::json!({"status": "ok"})));
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, DEFAULT_ENDPOINT);
        assert_eq!(
            sent[0].1,
            serde_json::json!({"x": 10.0, "y": -20.0, "z": -5.0, "radius": 7.0})
        );
    }

    #[tokio::test]
    async fn test_publish_non_json_body_is_passed_through() {
        let transport = MockTransport::replying(200, "received");
        let publisher = CoordinatePublisher::new(transport);

        let ack = publisher.publish(&sample_sphere()).await.unwrap();
        assert_eq!(ack.0, serde_json::Value::String("received".to_string()));
    }

    #[tokio::test]
    async fn test_publish_server_error_is_rejected() {
        let publisher = CoordinatePublisher::new(MockTransport::replying(500, "boom"));
        let result = publisher.publish(&sample_sphere()).await;
        assert_eq!(result, Err(PublishError::ServerRejected(500)));
    }

    #[tokio::test]
    async fn test_publish_only_200_counts_as_success() {
        let publisher = CoordinatePublisher::new(MockTransport::replying(201, "{}"));
        let result = publisher.publish(&sample_sphere()).await;
        assert_eq!(result, Err(PublishError::ServerRejected(201)));
    }

    #[tokio::test]
    async fn test_publish_transport_failure() {
        let publisher = CoordinatePublisher::new(MockTransport::failing("connection refused"));
        let result = publisher.publish(&sample_sphere()).await;
        assert!(matches!(
            result,
            Err(PublishError::TransportFailure(ref msg)) if msg.contains("connection refused")
        ));
    }

    #[tokio::test]
    async fn test_publish_latest_without_fit() {
        let transport = MockTransport::replying(200, "{}");
        let publisher = CoordinatePublisher::new(transport.clone());

        let result = publisher.publish_latest(&Session::new()).await;

        assert_eq!(result, Err(PublishError::NoSphereAvailable));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_failed_publish_keeps_sphere() {
        let mut session = Session::new();
        session
            .fit(Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 0.0, 0.0))
            .unwrap();

        let publisher = CoordinatePublisher::new(MockTransport::replying(503, ""));
        assert!(publisher.publish_latest(&session).await.is_err());
        assert!(session.has_sphere());
    }

    #[tokio::test]
    async fn test_fit_then_publish_end_to_end() {
        let mut session = Session::new();
        let sphere = session
            .fit(Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(sphere.center(), Point3D::new(0.0, 0.0, 0.0));
        assert_eq!(sphere.radius(), 1.0);

        let transport = MockTransport::replying(200, r#"{"status":"ok"}"#);
        let publisher = CoordinatePublisher::with_endpoint(transport.clone(), "http://unity.local/api");
        publisher.publish_latest(&session).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].0, "http://unity.local/api");
        let payload: PublishPayload = serde_json::from_value(sent[0].1.clone()).unwrap();
        assert_eq!(payload.x, 0.0);
        assert_eq!(payload.y, 0.0);
        assert_eq!(payload.z, 0.0);
        assert_eq!(payload.radius, 1.0);
    }
}
