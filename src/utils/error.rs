use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Degenerate input: the two points coincide or give a non-positive radius")]
    DegenerateInput,

    #[error("Expected exactly 2 points (center, surface), got {0}")]
    WrongPointCount(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PublishError {
    #[error("No sphere data available")]
    NoSphereAvailable,

    #[error("Server rejected coordinates: HTTP {0}")]
    ServerRejected(u16),

    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

impl From<reqwest::Error> for PublishError {
    /// Keeps the whole cause chain ("...: tcp connect error: Connection refused").
    fn from(err: reqwest::Error) -> Self {
        PublishError::TransportFailure(format!("{:#}", anyhow::Error::new(err)))
    }
}

#[derive(Error, Debug)]
pub enum SegmentationError {
    #[error("Input volume not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to launch segmentation tool '{executable}': {source}")]
    Launch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Segmentation tool exited with {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("Segmentation finished but no output at {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("Output directory error: {0}")]
    OutputDir(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Sphere fit failed: {0}")]
    Fit(#[from] FitError),

    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),

    #[error("Segmentation failed: {0}")]
    Segmentation(#[from] SegmentationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Corrupt session file {}: {reason}", .path.display())]
    SessionError { path: PathBuf, reason: String },
}

impl AppError {
    /// 配置或使用方式錯誤（重試無效，需要修正輸入）
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AppError::ConfigError { .. }
                | AppError::InvalidConfigValueError { .. }
                | AppError::HttpClientError(_)
        )
    }

    /// 1: fix the configuration or input; 2: the operation failed and can be retried.
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            1
        } else {
            2
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Fit(FitError::DegenerateInput) => {
                "Invalid sphere parameters. Check the selected points.".to_string()
            }
            AppError::Fit(FitError::WrongPointCount(_)) => {
                "Please place exactly 2 points: one for the center and one on the surface."
                    .to_string()
            }
            AppError::Publish(PublishError::NoSphereAvailable) => {
                "No sphere data available.".to_string()
            }
            AppError::Publish(PublishError::ServerRejected(code)) => {
                format!("Error sending data: Failed: {}", code)
            }
            AppError::Publish(PublishError::TransportFailure(detail)) => {
                format!("Error sending data: {}", detail)
            }
            AppError::Segmentation(e) => format!("Error during segmentation: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Fit(_) => "Pick two distinct points: the head center first, then a surface point",
            AppError::Publish(PublishError::NoSphereAvailable) => "Run `fit` before `publish`",
            AppError::Publish(PublishError::ServerRejected(_)) => {
                "Check the endpoint URL and the server logs"
            }
            AppError::Publish(PublishError::TransportFailure(_)) => {
                "Check network connectivity and retry"
            }
            AppError::Segmentation(SegmentationError::Launch { .. }) => {
                "Install TotalSegmentator or set segmentation.executable in the config"
            }
            AppError::Segmentation(_) => "Check the input volume and the segmentation tool output",
            AppError::SessionError { .. } => "Delete the session file and fit again",
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again"
            }
            _ => "Retry the operation",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
