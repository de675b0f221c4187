//! OS-specific implementations of [`TaskPlatform`].
//!
//! Both flavours are always compiled; [`native`] picks the one matching the
//! target the binary was built for.

use std::net::IpAddr;
use std::time::Duration;

use vmtask_common::{
    config::Config,
    error::TaskError,
    platform::TaskPlatform,
    task::HttpAnswer,
};

use crate::network::{http::HttpClient, resolver::ReverseLookup};

mod unix;
mod windows;

pub use unix::UnixPlatform;
pub use windows::WindowsPlatform;

/// Resources shared by every platform flavour.
#[derive(Debug, Clone)]
pub struct Toolkit {
    pub resolver: ReverseLookup,
    pub http: HttpClient,
    pub ping_count: u8,
    pub ping_timeout: Duration,
    pub strict_batch: bool,
}

impl Toolkit {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            resolver: ReverseLookup::new(cfg.dns_server, cfg.dns_timeout),
            http: HttpClient::new(cfg.http_timeout, cfg.use_proxy, cfg.http_port)?,
            ping_count: cfg.ping_count,
            ping_timeout: cfg.ping_timeout,
            strict_batch: cfg.strict_batch,
        })
    }

    /// Reverse lookup followed by a GET against the resolved name.
    pub async fn request_and_get(&self, ip: IpAddr) -> Result<HttpAnswer, TaskError> {
        let hostname: String = self.resolver.lookup(ip).await?;
        let status: u16 = self.http.get(&hostname).await?;
        Ok(HttpAnswer { hostname, status })
    }
}

/// Builds the implementation for the operating system we run on.
pub fn native(cfg: &Config) -> anyhow::Result<Box<dyn TaskPlatform>> {
    let toolkit: Toolkit = Toolkit::from_config(cfg)?;
    if cfg!(windows) {
        Ok(Box::new(WindowsPlatform::new(toolkit)))
    } else {
        Ok(Box::new(UnixPlatform::new(toolkit)))
    }
}
