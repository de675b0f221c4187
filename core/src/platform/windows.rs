use std::net::IpAddr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use vmtask_common::{
    error::TaskError,
    platform::TaskPlatform,
    task::{BatchRun, HttpAnswer},
};

use super::Toolkit;
use crate::{batch::Interpreter, fs, network::ping::PingCommand};

/// Windows, where `ping` counts with `-n` and batches run under `cmd /C`.
pub struct WindowsPlatform {
    toolkit: Toolkit,
}

impl WindowsPlatform {
    pub fn new(toolkit: Toolkit) -> Self {
        Self { toolkit }
    }
}

#[async_trait]
impl TaskPlatform for WindowsPlatform {
    fn name(&self) -> &'static str {
        "windows"
    }

    /// The directory must exist and must not carry the read-only attribute.
    fn validate_path(&self, path: &Path) -> Result<PathBuf, TaskError> {
        let dir: PathBuf = fs::target_directory(path)?;
        let read_only: bool = std::fs::metadata(&dir)
            .map(|meta| meta.permissions().readonly())
            .unwrap_or(true);
        if read_only {
            return Err(TaskError::NotWritable(dir));
        }
        Ok(dir)
    }

    async fn create_text_file(&self, path: &Path) -> Result<PathBuf, TaskError> {
        let dir: PathBuf = self.validate_path(path)?;
        fs::write_greeting(&dir).await
    }

    async fn ping(&self, ip: IpAddr) -> Result<(), TaskError> {
        PingCommand::WINDOWS
            .run(ip, self.toolkit.ping_count, self.toolkit.ping_timeout)
            .await
    }

    async fn request_and_get(&self, ip: IpAddr) -> Result<HttpAnswer, TaskError> {
        self.toolkit.request_and_get(ip).await
    }

    async fn run_test_batch(&self, file: &Path) -> Result<BatchRun, TaskError> {
        Interpreter::CMD.run(file, self.toolkit.strict_batch).await
    }
}
