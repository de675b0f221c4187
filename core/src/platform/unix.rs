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

/// Linux and macOS.
pub struct UnixPlatform {
    toolkit: Toolkit,
}

impl UnixPlatform {
    pub fn new(toolkit: Toolkit) -> Self {
        Self { toolkit }
    }
}

#[async_trait]
impl TaskPlatform for UnixPlatform {
    fn name(&self) -> &'static str {
        "unix"
    }

    fn validate_path(&self, path: &Path) -> Result<PathBuf, TaskError> {
        fs::target_directory(path)
    }

    async fn create_text_file(&self, path: &Path) -> Result<PathBuf, TaskError> {
        let dir: PathBuf = self.validate_path(path)?;
        fs::write_greeting(&dir).await
    }

    async fn ping(&self, ip: IpAddr) -> Result<(), TaskError> {
        PingCommand::UNIX
            .run(ip, self.toolkit.ping_count, self.toolkit.ping_timeout)
            .await
    }

    async fn request_and_get(&self, ip: IpAddr) -> Result<HttpAnswer, TaskError> {
        self.toolkit.request_and_get(ip).await
    }

    async fn run_test_batch(&self, file: &Path) -> Result<BatchRun, TaskError> {
        Interpreter::SH.run(file, self.toolkit.strict_batch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmtask_common::config::Config;

    fn platform() -> UnixPlatform {
        UnixPlatform::new(Toolkit::from_config(&Config::default()).unwrap())
    }

    #[tokio::test]
    async fn creates_hello_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();

        let written = platform().create_text_file(dir.path()).await.unwrap();

        assert_eq!(written, dir.path().join("Hello.txt"));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "Hello");
    }

    #[tokio::test]
    async fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("home2");

        let err = platform().create_text_file(&missing).await.unwrap_err();
        assert!(matches!(err, TaskError::PathNotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_batch_through_sh() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.sh");
        std::fs::write(&file, "exit 0\n").unwrap();

        let run = platform().run_test_batch(&file).await.unwrap();
        assert_eq!(run.exit_code, Some(0));
    }
}
