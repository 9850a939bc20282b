//! Tasks built on the batch engine
//!
//! A task walks the stored repos through [`TaskContext::process_repos`] and
//! persists whatever it derives from the report.

mod build_static_api;
mod registry;


pub use build_static_api::{
    BuildStaticApiTask, FULL_LIST_FILE, MAIN_LIST_FILE, MainList, ProjectItem, RepoItem, RepoList,
    RepoStatus, TagItem, format_date, project_repo,
};
pub use registry::TaskRegistry;

use crate::core::batch::{AggregatedReport, BatchRunner, CancelToken, ExecutionOptions, Outcome, Summary};
use crate::storage::{Database, JsonWriter, RepoRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// A named job over the repo catalog
#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    async fn run(&self, ctx: &TaskContext) -> Result<TaskReport>;
}

/// Everything a task needs: the repo source, run options and output location
#[derive(Debug, Clone)]
pub struct TaskContext {
    database: Arc<Database>,
    options: ExecutionOptions,
    output: JsonWriter,
    cancel: CancelToken,
}

impl TaskContext {
    pub fn new(database: Arc<Database>, options: ExecutionOptions, output: JsonWriter) -> Self {
        Self {
            database,
            options,
            output,
            cancel: CancelToken::new(),
        }
    }

    /// Share a cancellation signal with every batch the task starts
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    pub fn output(&self) -> &JsonWriter {
        &self.output
    }

    /// Run `work` over the selected repos
    pub async fn process_repos<T, F, Fut>(&self, work: F) -> Result<AggregatedReport<T>>
    where
        F: Fn(RepoRecord, usize) -> Fut,
        Fut: Future<Output = anyhow::Result<Outcome<T>>>,
    {
        BatchRunner::new(self.database.as_ref(), self.options.clone())
            .with_cancel(self.cancel.clone())
            .run(work)
            .await
    }

    /// Write `value` as JSON into the output directory
    pub async fn save_json<T: Serialize + ?Sized>(&self, value: &T, filename: &str) -> Result<PathBuf> {
        self.output.save(value, filename).await
    }
}

/// What a task run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub task: String,
    pub summary: Summary,
    pub files: Vec<PathBuf>,
}
