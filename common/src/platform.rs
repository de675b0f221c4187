//! # Platform Port
//!
//! The host tasks behave differently per operating system (ping flags, script
//! interpreters, permission checks). [`TaskPlatform`] is the seam between the
//! task orchestration and those OS-specific implementations.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::TaskError;
use crate::task::{BatchRun, HttpAnswer};

#[async_trait]
pub trait TaskPlatform: Send + Sync {
    /// Short name of the implementation, e.g. `"unix"`.
    fn name(&self) -> &'static str;

    /// Resolves the directory a text file would be created in.
    fn validate_path(&self, path: &Path) -> Result<PathBuf, TaskError>;

    /// Writes the greeting file and returns its location.
    async fn create_text_file(&self, path: &Path) -> Result<PathBuf, TaskError>;

    async fn ping(&self, ip: IpAddr) -> Result<(), TaskError>;

    /// Reverse-resolves `ip` and issues an HTTP GET against the hostname.
    async fn request_and_get(&self, ip: IpAddr) -> Result<HttpAnswer, TaskError>;

    async fn run_test_batch(&self, file: &Path) -> Result<BatchRun, TaskError>;
}
