//! Task lookup by name

use super::{BuildStaticApiTask, Task, TaskContext, TaskReport};
use crate::utils::error::{Result, SweepError};
use crate::utils::format_duration;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Named tasks available to the CLI
#[derive(Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<&'static str, Arc<dyn Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in task
    pub fn with_builtin_tasks() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BuildStaticApiTask));
        registry
    }

    /// Add a task, replacing any task registered under the same name
    pub fn register(&mut self, task: Arc<dyn Task>) {
        self.tasks.insert(task.name(), task);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Task>> {
        self.tasks
            .get(name)
            .cloned()
            .ok_or_else(|| SweepError::TaskNotFound(name.to_string()))
    }

    /// `(name, description)` pairs sorted by name
    pub fn list(&self) -> Vec<(&'static str, &'static str)> {
        self.tasks
            .values()
            .map(|task| (task.name(), task.description()))
            .collect()
    }

    /// Look up and run a task
    pub async fn run(&self, name: &str, ctx: &TaskContext) -> Result<TaskReport> {
        let task = self.get(name)?;

        info!(task = name, "Starting task");
        let start = Instant::now();
        let report = task.run(ctx).await?;

        info!(
            task = name,
            elapsed = %format_duration(start.elapsed().as_millis() as u64),
            success = report.summary.success_count,
            failure = report.summary.failure_count,
            "Task completed"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .finish()
    }
}
