use crate::domain::ports::Segmenter;
use crate::utils::error::SegmentationError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub const DEFAULT_EXECUTABLE: &str = "TotalSegmentator";
pub const DEFAULT_TASK: &str = "total";
pub const DEFAULT_OUTPUT_FILENAME: &str = "segmented_femur.nii.gz";

pub fn default_roi_subset() -> Vec<String> {
    vec!["femur_left".to_string(), "femur_right".to_string()]
}

/// Runs TotalSegmentator (or a compatible CLI) as a child process.
#[derive(Debug, Clone)]
pub struct CommandSegmenter {
    executable: String,
    task: String,
    roi_subset: Vec<String>,
    output_dir: PathBuf,
    output_filename: String,
}

impl CommandSegmenter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            task: DEFAULT_TASK.to_string(),
            roi_subset: default_roi_subset(),
            output_dir: output_dir.into(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }

    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    pub fn roi_subset(mut self, roi_subset: Vec<String>) -> Self {
        self.roi_subset = roi_subset;
        self
    }

    pub fn output_filename(mut self, name: impl Into<String>) -> Self {
        self.output_filename = name.into();
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-i".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
            "--ml".to_string(),
            "--task".to_string(),
            self.task.clone(),
        ];
        if !self.roi_subset.is_empty() {
            args.push("--roi_subset".to_string());
            args.extend(self.roi_subset.iter().cloned());
        }
        args
    }
}

#[async_trait]
impl Segmenter for CommandSegmenter {
    async fn segment(&self, input: &Path) -> Result<PathBuf, SegmentationError> {
        if !input.is_file() {
            return Err(SegmentationError::InputNotFound(input.to_path_buf()));
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;

        let output = self.output_path();
        // a file from an earlier run must not pass for this run's result
        if tokio::fs::try_exists(&output).await? {
            tracing::debug!("Removing stale output {}", output.display());
            tokio::fs::remove_file(&output).await?;
        }

        let args = self.build_args(input, &output);
        tracing::info!("🦴 Running {} on {}", self.executable, input.display());
        tracing::debug!("Segmentation args: {:?}", args);

        let result = Command::new(&self.executable)
            .args(&args)
            .output()
            .await
            .map_err(|source| SegmentationError::Launch {
                executable: self.executable.clone(),
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(SegmentationError::Failed {
                code: result.status.code(),
                stderr,
            });
        }

        if !output.exists() {
            return Err(SegmentationError::OutputMissing(output));
        }

        tracing::info!("✅ Segmentation completed. Output saved at {}", output.display());
        Ok(output)
    }
}
