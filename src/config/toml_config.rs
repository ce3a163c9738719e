use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::adapters::segmentation::{
    default_roi_subset, CommandSegmenter, DEFAULT_EXECUTABLE, DEFAULT_OUTPUT_FILENAME, DEFAULT_TASK,
};
use crate::adapters::session_store::DEFAULT_SESSION_PATH;
use crate::core::publisher::DEFAULT_ENDPOINT;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub publish: PublishConfig,
    pub segmentation: SegmentationConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    pub executable: String,
    pub task: String,
    pub roi_subset: Vec<String>,
    pub output_dir: Option<String>,
    pub output_filename: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            task: DEFAULT_TASK.to_string(),
            roi_subset: default_roi_subset(),
            output_dir: None,
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_SESSION_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COBRIDGE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(self.publish.timeout_seconds)
    }

    /// Segmentation output goes to the configured directory, or the system temp dir.
    pub fn segmentation_output_dir(&self) -> PathBuf {
        self.segmentation
            .output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }

    pub fn build_segmenter(&self) -> CommandSegmenter {
        CommandSegmenter::new(self.segmentation_output_dir())
            .executable(self.segmentation.executable.clone())
            .task(self.segmentation.task.clone())
            .roi_subset(self.segmentation.roi_subset.clone())
            .output_filename(self.segmentation.output_filename.clone())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("publish.endpoint", &self.publish.endpoint)?;
        validation::validate_range("publish.timeout_seconds", self.publish.timeout_seconds, 1, 300)?;

        validation::validate_non_empty_string("segmentation.executable", &self.segmentation.executable)?;
        validation::validate_non_empty_string("segmentation.task", &self.segmentation.task)?;
        validation::validate_file_name(
            "segmentation.output_filename",
            &self.segmentation.output_filename,
        )?;
        if let Some(dir) = &self.segmentation.output_dir {
            validation::validate_path("segmentation.output_dir", dir)?;
        }

        validation::validate_path("session.path", &self.session.path)?;

        if let Some(level) = &self.logging.level {
            validation::validate_log_level("logging.level", level)?;
        }

        Ok(())
    }
}
