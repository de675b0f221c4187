//! # Host Task Service
//!
//! Runs the four host tasks against a [`TaskRequest`] and collects a [`TaskReport`].
//!
//! The service only knows the [`TaskPlatform`] abstraction. How a file is
//! written, a host pinged or a batch executed is decided by the platform.

use std::time::Instant;

use tracing::{error, info};

use vmtask_common::{
    error::TaskError,
    platform::TaskPlatform,
    task::{TaskKind, TaskOutcome, TaskReport, TaskRequest},
};

pub struct TaskService {
    platform: Box<dyn TaskPlatform>,
}

impl TaskService {
    pub fn new(platform: Box<dyn TaskPlatform>) -> Self {
        Self { platform }
    }

    pub fn platform_name(&self) -> &'static str {
        self.platform.name()
    }

    /// Runs every task in [`TaskKind::ALL`] order.
    ///
    /// A failing task never stops the following ones. `on_task` is called
    /// right before each task starts.
    pub async fn run_tasks<F>(&self, request: &TaskRequest, mut on_task: F) -> TaskReport
    where
        F: FnMut(TaskKind),
    {
        let start_time: Instant = Instant::now();
        let mut outcomes: Vec<TaskOutcome> = Vec::with_capacity(TaskKind::ALL.len());

        for kind in TaskKind::ALL {
            on_task(kind);
            let task_start: Instant = Instant::now();
            let result: Result<String, TaskError> = self.run_one(kind, request).await;

            match &result {
                Ok(_) => info!("{}", kind.success_message()),
                Err(e) => error!("{}: {e}", kind.failure_message()),
            }

            outcomes.push(TaskOutcome {
                kind,
                result,
                elapsed: task_start.elapsed(),
            });
        }

        TaskReport {
            outcomes,
            total_time: start_time.elapsed(),
        }
    }

    async fn run_one(&self, kind: TaskKind, request: &TaskRequest) -> Result<String, TaskError> {
        match kind {
            TaskKind::CreateTextFile => {
                let written = self.platform.create_text_file(&request.target_path).await?;
                Ok(format!("wrote {}", written.display()))
            }
            TaskKind::Ping => {
                self.platform.ping(request.ip).await?;
                Ok(format!("{} is reachable", request.ip))
            }
            TaskKind::RequestAndGet => {
                let answer = self.platform.request_and_get(request.ip).await?;
                Ok(answer.to_string())
            }
            TaskKind::RunTestBatch => {
                let run = self.platform.run_test_batch(&request.batch_file).await?;
                Ok(run.to_string())
            }
        }
    }
}
