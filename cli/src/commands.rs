pub mod run;

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use vmtask_common::{config::Config, task::TaskRequest};

#[derive(Parser, Debug)]
#[command(name = "vmtask", version)]
#[command(about = "Runs a fixed set of host checks: file creation, ping, reverse lookup with HTTP GET and a test batch.")]
pub struct CommandLine {
    /// Directory to create Hello.txt in (a file path means its parent directory)
    #[arg(short = 'p', long = "path")]
    pub path: PathBuf,

    /// IPv4 or IPv6 address to ping and reverse-resolve
    #[arg(short = 'i', long = "ip")]
    pub ip: IpAddr,

    /// Batch or shell script to execute
    #[arg(short = 'f', long = "file")]
    pub file: PathBuf,

    /// Nameserver for the reverse lookup [default: system resolver]
    #[arg(long, value_name = "IP")]
    pub dns_server: Option<IpAddr>,

    /// Seconds to wait for the reverse lookup
    #[arg(long, value_name = "SECS", default_value_t = 3)]
    pub dns_timeout: u64,

    /// Seconds to wait for the HTTP response
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub http_timeout: u64,

    /// Port the HTTP GET is sent to
    #[arg(long, value_name = "PORT", default_value_t = 80)]
    pub http_port: u16,

    /// Ignore HTTP proxies from the environment
    #[arg(long)]
    pub no_proxy: bool,

    /// Seconds to wait for ping, plus one per extra echo
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub ping_timeout: u64,

    /// Echo requests to send
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..))]
    pub ping_count: u8,

    /// Fail the batch task when the script exits with a non-zero status
    #[arg(long)]
    pub strict_batch: bool,

    /// Less output (-q hides banner and headers, -qq prints only the summary)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            dns_server: self.dns_server,
            dns_timeout: Duration::from_secs(self.dns_timeout),
            http_timeout: Duration::from_secs(self.http_timeout),
            http_port: self.http_port,
            use_proxy: !self.no_proxy,
            ping_timeout: Duration::from_secs(self.ping_timeout),
            ping_count: self.ping_count,
            strict_batch: self.strict_batch,
            quiet: self.quiet,
            no_banner: self.no_banner,
        }
    }

    pub fn to_request(&self) -> TaskRequest {
        TaskRequest {
            target_path: self.path.clone(),
            ip: self.ip,
            batch_file: self.file.clone(),
        }
    }
}
