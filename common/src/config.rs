use std::net::IpAddr;
use std::time::Duration;

pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    /// Resolver used for the reverse lookup.
    ///
    /// `None` goes through the OS resolver.
    pub dns_server: Option<IpAddr>,
    pub dns_timeout: Duration,
    pub http_timeout: Duration,
    pub http_port: u16,
    /// Routes the HTTP request through proxies from the environment.
    pub use_proxy: bool,
    pub ping_timeout: Duration,
    /// Echo requests sent per ping.
    pub ping_count: u8,
    /// Treats a non-zero exit status of the test batch as a failure.
    pub strict_batch: bool,
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dns_server: None,
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            http_port: 80,
            use_proxy: true,
            ping_timeout: DEFAULT_PING_TIMEOUT,
            ping_count: 1,
            strict_batch: false,
            quiet: 0,
            no_banner: false,
        }
    }
}
