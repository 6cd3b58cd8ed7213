//! RabbitMQ management API client
//!
//! Only `GET /api/nodes/{node}` is used. The JSON field names are fixed by the
//! broker and mirrored here as-is.

use crate::credentials::Credentials;
use crate::error::ProbeError;
use reqwest::{Client, Url};
use rmqcheck_core::{FileDescriptorUsage, MetricsSnapshot};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

/// Subset of the node object returned by the management API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeStats {
    pub mem_used: f64,
    pub mem_limit: f64,
    pub sockets_used: f64,
    pub sockets_total: f64,
    #[serde(default)]
    pub fd_used: FdReading,
    #[serde(default)]
    pub fd_total: FdReading,
    #[serde(default)]
    pub mem_alarm: bool,
    #[serde(default)]
    pub disk_free_alarm: bool,
}

/// `fd_used`/`fd_total` are numbers, or a marker such as `"unknown"` on
/// platforms that cannot count descriptors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FdReading {
    Count(f64),
    Marker(serde_json::Value),
}

impl Default for FdReading {
    fn default() -> Self {
        FdReading::Marker(serde_json::Value::Null)
    }
}

impl From<NodeStats> for MetricsSnapshot {
    fn from(stats: NodeStats) -> Self {
        let file_descriptors = match (stats.fd_used, stats.fd_total) {
            (FdReading::Count(used), FdReading::Count(total)) => {
                FileDescriptorUsage::Numeric { used, total }
            }
            _ => FileDescriptorUsage::Unsupported,
        };
        MetricsSnapshot {
            memory_used: stats.mem_used,
            memory_limit: stats.mem_limit,
            sockets_used: stats.sockets_used,
            sockets_total: stats.sockets_total,
            file_descriptors,
            memory_alarm_active: stats.mem_alarm,
            disk_alarm_active: stats.disk_free_alarm,
        }
    }
}

pub struct ManagementClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl ManagementClient {
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, ProbeError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProbeError::Config(format!("bad management URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProbeError::Config(format!("bad management URL {base_url}")));
        }

        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .user_agent(concat!("check_rabbitmq_server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// URL of the node resource; the node name is percent-encoded as one segment.
    pub fn node_url(&self, node: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "nodes", node]);
        }
        url
    }

    pub async fn node_stats(&self, node: &str) -> Result<NodeStats, ProbeError> {
        let url = self.node_url(node);
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        trace!("node stats body: {} bytes", body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}
