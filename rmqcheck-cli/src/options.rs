//! Command-line options, resolved once into immutable values.

use clap::{ArgAction, Parser};
use rmqcheck_core::{Bounds, ThresholdConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Check the health of a RabbitMQ node through its management API
#[derive(Clone, Debug, Parser)]
#[command(name = "check_rabbitmq_server", version, about, long_about = None)]
pub struct Options {
    /// Management API host
    #[arg(short = 'H', long, default_value = "localhost", env = "RMQCHECK_HOST")]
    pub host: String,

    /// Management API port
    #[arg(short = 'P', long, default_value_t = 15672, env = "RMQCHECK_PORT")]
    pub port: u16,

    /// Management API user
    #[arg(short = 'u', long, default_value = "guest", env = "RMQCHECK_USER")]
    pub user: String,

    /// Management API password
    #[arg(
        short = 'p',
        long,
        default_value = "guest",
        env = "RMQCHECK_PASSWORD",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Talk to the management API over https
    #[arg(long)]
    pub ssl: bool,

    /// Accept any TLS certificate presented by the management API
    #[arg(long)]
    pub no_verify: bool,

    /// Node name, defaults to rabbit@<short hostname>
    #[arg(short = 'n', long, env = "RMQCHECK_NODE")]
    pub node: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value_t = 10, env = "RMQCHECK_TIMEOUT")]
    pub timeout: u64,

    /// TOML file holding [credentials] username/password
    #[arg(long, env = "RMQCHECK_CREDENTIALS_FILE")]
    pub credentials_file: Option<PathBuf>,

    /// Memory usage warning threshold (%)
    #[arg(long, default_value_t = 80.0)]
    pub memwarn: f64,

    /// Memory usage critical threshold (%)
    #[arg(long, default_value_t = 90.0)]
    pub memcrit: f64,

    /// Socket usage warning threshold (%)
    #[arg(long, default_value_t = 80.0)]
    pub socketwarn: f64,

    /// Socket usage critical threshold (%)
    #[arg(long, default_value_t = 90.0)]
    pub socketcrit: f64,

    /// File descriptor usage warning threshold (%)
    #[arg(long, default_value_t = 80.0)]
    pub fdwarn: f64,

    /// File descriptor usage critical threshold (%)
    #[arg(long, default_value_t = 90.0)]
    pub fdcrit: f64,

    /// Go critical when the node raises a memory or disk alarm
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub alarms: bool,

    /// Classify file descriptor usage against --fdwarn/--fdcrit
    #[arg(long)]
    pub enforce_fd: bool,

    /// Append performance data to the status line
    #[arg(long)]
    pub perfdata: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Options {
    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig {
            memory: Bounds::new(self.memwarn, self.memcrit),
            sockets: Bounds::new(self.socketwarn, self.socketcrit),
            file_descriptors: Bounds::new(self.fdwarn, self.fdcrit),
            watch_alarms: self.alarms,
            enforce_fd_check: self.enforce_fd,
        }
    }

    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Explicit `--node`, otherwise `rabbit@<short hostname>`.
    ///
    /// Loopback hosts resolve to this machine's hostname, which is how the
    /// broker names a local node.
    pub fn node_name(&self) -> String {
        if let Some(node) = &self.node {
            return node.clone();
        }
        let host = if is_loopback(&self.host) {
            local_hostname().unwrap_or_else(|| self.host.clone())
        } else {
            self.host.clone()
        };
        format!("rabbit@{}", short_hostname(&host))
    }
}

fn is_loopback(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]")
}

fn local_hostname() -> Option<String> {
    hostname::get().ok().and_then(|h| h.into_string().ok())
}

fn short_hostname(host: &str) -> &str {
    // IP literals keep their dots
    if host.parse::<std::net::IpAddr>().is_ok() {
        return host;
    }
    host.split('.').next().unwrap_or(host)
}
