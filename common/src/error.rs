use std::io;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Everything that can make a single host task fail.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("path {} does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("no permission to write into {}", .0.display())]
    NotWritable(PathBuf),

    #[error("error writing {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{ip} did not answer within {}s", .timeout.as_secs_f64())]
    PingTimeout { ip: IpAddr, timeout: Duration },

    #[error("{ip} is unreachable (ping exited with {status})")]
    Unreachable { ip: IpAddr, status: String },

    #[error("{0} does not have a valid dns ptr record")]
    NoPtrRecord(IpAddr),

    #[error("reverse lookup of {ip} failed: {reason}")]
    Resolve { ip: IpAddr, reason: String },

    #[error("error getting {url}: {reason}")]
    Http { url: String, reason: String },

    #[error("file {} does not exist", .0.display())]
    BatchNotFound(PathBuf),

    #[error("{} exited with {status}", .path.display())]
    BatchFailed { path: PathBuf, status: String },
}

impl TaskError {
    pub fn resolve(ip: IpAddr, reason: impl ToString) -> Self {
        Self::Resolve {
            ip,
            reason: reason.to_string(),
        }
    }
}
