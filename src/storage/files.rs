//! JSON file output
//!
//! Writes task results to the configured output directory.

use crate::utils::error::{Result, SweepError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Writes pretty-printed JSON documents into one directory
#[derive(Debug, Clone)]
pub struct JsonWriter {
    directory: PathBuf,
}

impl JsonWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Serialize `value` to `<directory>/<filename>`, creating the directory if needed
    pub async fn save<T: Serialize + ?Sized>(&self, value: &T, filename: &str) -> Result<PathBuf> {
        if filename.is_empty() || Path::new(filename).components().count() != 1 {
            return Err(SweepError::internal(format!(
                "Invalid output filename: {:?}",
                filename
            )));
        }

        fs::create_dir_all(&self.directory).await?;

        let path = self.directory.join(filename);
        let content = serde_json::to_vec_pretty(value)?;
        fs::write(&path, &content).await?;

        info!(
            path = %path.display(),
            bytes = content.len(),
            "JSON file saved"
        );
        Ok(path)
    }
}
