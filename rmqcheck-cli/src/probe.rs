//! One probe run: credentials, fetch, evaluate.
//!
//! This is the outermost boundary: every failure becomes a verdict here.

use crate::api::ManagementClient;
use crate::credentials::Credentials;
use crate::error::ProbeError;
use crate::options::Options;
use rmqcheck_core::{evaluate, MetricsSnapshot, Verdict};
use tracing::{info, warn};

pub async fn run_probe(options: &Options) -> Verdict {
    match probe(options).await {
        Ok(verdict) => verdict,
        Err(err) => {
            warn!("probe failed: {}", err);
            Verdict::failure(err.severity(), err.to_string())
        }
    }
}

async fn probe(options: &Options) -> Result<Verdict, ProbeError> {
    let thresholds = options.thresholds();
    for note in thresholds.validate() {
        warn!("{}", note);
    }

    let credentials = Credentials::resolve(
        &options.user,
        &options.password,
        options.credentials_file.as_deref(),
    )
    .await?;

    let client = ManagementClient::new(
        &options.base_url(),
        credentials,
        options.request_timeout(),
        options.no_verify,
    )?;

    let node = options.node_name();
    info!("Checking node {} at {}", node, options.base_url());

    let stats = client.node_stats(&node).await?;
    let snapshot = MetricsSnapshot::from(stats);
    let verdict = evaluate(&snapshot, &thresholds)?;

    info!("Verdict: {} ({} findings)", verdict.severity, verdict.findings.len());
    Ok(verdict)
}
