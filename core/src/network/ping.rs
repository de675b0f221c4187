use std::net::IpAddr;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use vmtask_common::error::TaskError;

/// The system `ping` binary and the flag it takes for the echo count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingCommand {
    pub program: &'static str,
    pub count_flag: &'static str,
}

impl PingCommand {
    pub const UNIX: PingCommand = PingCommand {
        program: "ping",
        count_flag: "-c",
    };

    pub const WINDOWS: PingCommand = PingCommand {
        program: "ping",
        count_flag: "-n",
    };

    pub fn args(&self, ip: IpAddr, count: u8) -> Vec<String> {
        vec![
            self.count_flag.to_string(),
            count.max(1).to_string(),
            ip.to_string(),
        ]
    }

    /// Time allowed for `count` echoes.
    ///
    /// `ping` waits a second between echoes, so every echo past the first
    /// extends `timeout` by one second.
    pub fn deadline(timeout: Duration, count: u8) -> Duration {
        timeout + Duration::from_secs(u64::from(count.max(1) - 1))
    }

    /// Succeeds when `ping` exits with status 0 before the [`deadline`]
    /// runs out. The child is killed otherwise.
    ///
    /// [`deadline`]: PingCommand::deadline
    pub async fn run(&self, ip: IpAddr, count: u8, ping_timeout: Duration) -> Result<(), TaskError> {
        let args: Vec<String> = self.args(ip, count);
        let limit: Duration = Self::deadline(ping_timeout, count);
        debug!("{} {}", self.program, args.join(" "));

        let child = Command::new(self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        let status: ExitStatus = match timeout(limit, child).await {
            Ok(Ok(status)) => status,
            Ok(Err(source)) => {
                return Err(TaskError::Spawn {
                    program: self.program.to_string(),
                    source,
                });
            }
            Err(_elapsed) => return Err(TaskError::PingTimeout { ip, timeout: limit }),
        };

        if status.success() {
            Ok(())
        } else {
            Err(TaskError::Unreachable {
                ip,
                status: status.to_string(),
            })
        }
    }
}
