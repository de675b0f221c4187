use std::time::Duration;

use reqwest::Client;
use tracing::info;

use vmtask_common::error::TaskError;

/// Plain HTTP GET client.
///
/// Any status code counts as an answer; only transport errors fail.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    port: u16,
}

pub const HTTP_PORT: u16 = 80;

impl HttpClient {
    /// Builds the client. Proxies from the environment are honoured when
    /// `use_proxy` is set.
    pub fn new(timeout: Duration, use_proxy: bool, port: u16) -> anyhow::Result<Self> {
        let mut builder = Client::builder().timeout(timeout);
        if !use_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
            port,
        })
    }

    pub fn url(&self, hostname: &str) -> String {
        match self.port {
            HTTP_PORT => format!("http://{hostname}"),
            port => format!("http://{hostname}:{port}"),
        }
    }

    pub async fn get(&self, hostname: &str) -> Result<u16, TaskError> {
        let url: String = self.url(hostname);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TaskError::Http {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status: u16 = response.status().as_u16();
        info!("Status code {status}");
        Ok(status)
    }
}
