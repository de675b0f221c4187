//! # Task Model
//!
//! The four host tasks, their inputs and the report produced after running them.

use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::TaskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    CreateTextFile,
    Ping,
    RequestAndGet,
    RunTestBatch,
}

impl TaskKind {
    /// Execution order.
    pub const ALL: [TaskKind; 4] = [
        TaskKind::CreateTextFile,
        TaskKind::Ping,
        TaskKind::RequestAndGet,
        TaskKind::RunTestBatch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::CreateTextFile => "create text file",
            TaskKind::Ping => "ping",
            TaskKind::RequestAndGet => "request and get",
            TaskKind::RunTestBatch => "run test batch",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            TaskKind::CreateTextFile => "Success creating text file",
            TaskKind::Ping => "Success pinging",
            TaskKind::RequestAndGet => "Success requesting and getting",
            TaskKind::RunTestBatch => "Success running test batch",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            TaskKind::CreateTextFile => "Error creating text file",
            TaskKind::Ping => "Ping failed",
            TaskKind::RequestAndGet => "Request get failed",
            TaskKind::RunTestBatch => "Running test batch failed",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The user supplied inputs shared by all tasks.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub target_path: PathBuf,
    pub ip: IpAddr,
    pub batch_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAnswer {
    pub hostname: String,
    pub status: u16,
}

impl fmt::Display for HttpAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{} answered {}", self.hostname, self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRun {
    pub path: PathBuf,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl fmt::Display for BatchRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "{} exited with {code}", self.path.display()),
            None => write!(f, "{} was terminated by a signal", self.path.display()),
        }
    }
}

#[derive(Debug)]
pub struct TaskOutcome {
    pub kind: TaskKind,
    /// Human readable detail on success.
    pub result: Result<String, TaskError>,
    pub elapsed: Duration,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct TaskReport {
    pub outcomes: Vec<TaskOutcome>,
    pub total_time: Duration,
}

impl TaskReport {
    /// True when every task succeeded.
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(TaskOutcome::is_success)
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn outcome(&self, kind: TaskKind) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}
