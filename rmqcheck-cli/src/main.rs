//! check_rabbitmq_server - Nagios-style health probe for a RabbitMQ node
//!
//! Fetches `/api/nodes/{node}` from the management API once, evaluates it
//! against the configured thresholds and reports:
//! - a single status line on stdout
//! - exit code 0/1/2/3 for OK/WARNING/CRITICAL/UNKNOWN

mod api;
mod credentials;
mod error;
mod logging;
mod options;
mod output;
mod probe;

use clap::error::ErrorKind;
use clap::Parser;
use options::Options;
use rmqcheck_core::{Severity, Verdict};
use tracing::debug;

#[tokio::main]
async fn main() {
    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            // Usage errors must not look like a critical node
            _ => output::emit(
                &Verdict::failure(Severity::Unknown, err.to_string().trim_end()),
                false,
            ),
        },
    };

    if let Err(e) = logging::init(options.verbose) {
        eprintln!("{e:#}");
    }
    debug!("options: host={} port={} ssl={}", options.host, options.port, options.ssl);

    let verdict = probe::run_probe(&options).await;
    output::emit(&verdict, options.perfdata)
}
