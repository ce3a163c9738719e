use anyhow::Result;
use femoral_head::utils::validation::Validate;
use femoral_head::{AppConfig, AppError, FemoralHeadApp, Point3D, PublishError};
use httpmock::prelude::*;
use tempfile::TempDir;

fn write_config(dir: &TempDir, endpoint: &str) -> Result<std::path::PathBuf> {
    let session_path = dir.path().join("session.json");
    let config_content = format!(
        r#"
[publish]
endpoint = "{}"
timeout_seconds = 5

[segmentation]
output_dir = "{}"

[session]
path = "{}"
"#,
        endpoint,
        dir.path().join("seg").to_string_lossy().replace('\\', "/"),
        session_path.to_string_lossy().replace('\\', "/"),
    );

    let config_path = dir.path().join("femoral-head.toml");
    std::fs::write(&config_path, config_content)?;
    Ok(config_path)
}

/// 完整流程：fit -> (新 process) publish
#[tokio::test]
async fn test_fit_and_publish_across_app_instances() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/coordinates")
            .json_body(serde_json::json!({"x": 12.5, "y": 40.0, "z": 101.0, "radius": 24.0}));
        then.status(200)
            .json_body(serde_json::json!({"status": "ok", "id": 17}));
    });

    let config_path = write_config(&temp_dir, &server.url("/api/coordinates"))?;
    let config = AppConfig::from_file(&config_path)?;
    config.validate()?;

    let fit_app = FemoralHeadApp::from_config(&config, None)?;
    let sphere = fit_app.fit(
        Point3D::new(12.5, -40.0, 101.0),
        Point3D::new(12.5, -40.0, 125.0),
    )?;
    assert_eq!(sphere.radius(), 24.0);
    assert!(temp_dir.path().join("session.json").exists());

    let publish_app = FemoralHeadApp::from_config(&config, None)?;
    let ack = publish_app.publish().await?;

    api_mock.assert();
    assert_eq!(ack.0["status"], "ok");
    assert_eq!(ack.0["id"], 17);
    Ok(())
}

#[tokio::test]
async fn test_publish_with_empty_session_reports_no_sphere() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let config = AppConfig::from_file(write_config(&temp_dir, &server.url("/api/coordinates"))?)?;
    let app = FemoralHeadApp::from_config(&config, None)?;

    let result = app.publish().await;

    assert!(matches!(
        result,
        Err(AppError::Publish(PublishError::NoSphereAvailable))
    ));
    assert_eq!(
        result.unwrap_err().user_friendly_message(),
        "No sphere data available."
    );
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_rejected_publish_keeps_session_for_retry() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let mut failing = server.mock(|when, then| {
        when.method(POST).path("/api/coordinates");
        then.status(502);
    });

    let config = AppConfig::from_file(write_config(&temp_dir, &server.url("/api/coordinates"))?)?;
    let app = FemoralHeadApp::from_config(&config, None)?;
    app.fit(Point3D::new(1.0, 1.0, 1.0), Point3D::new(4.0, 5.0, 1.0))?;

    let first = app.publish().await;
    assert!(matches!(
        first,
        Err(AppError::Publish(PublishError::ServerRejected(502)))
    ));
    failing.delete();

    let ok = server.mock(|when, then| {
        when.method(POST)
            .path("/api/coordinates")
            .json_body(serde_json::json!({"x": 1.0, "y": -1.0, "z": 1.0, "radius": 5.0}));
        then.status(200).body("stored");
    });

    let ack = app.publish().await?;
    ok.assert();
    assert_eq!(ack.0, serde_json::Value::String("stored".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_session_override_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = AppConfig::from_file(write_config(&temp_dir, "http://127.0.0.1:9/api")?)?;

    let override_path = temp_dir.path().join("other/session.json");
    let app = FemoralHeadApp::from_config(&config, Some(override_path.clone()))?;
    app.fit(Point3D::new(0.0, 0.0, 0.0), Point3D::new(0.0, 3.0, 4.0))?;

    assert!(override_path.exists());
    assert!(!temp_dir.path().join("session.json").exists());

    let (sphere, payload) = app.current()?.expect("sphere stored");
    assert_eq!(sphere.radius(), 5.0);
    assert_eq!(payload.radius, 5.0);
    Ok(())
}
