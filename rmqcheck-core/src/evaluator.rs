//! Snapshot + thresholds -> verdict.
//!
//! Checks run in a fixed order (memory, sockets, file descriptors, alarms) and
//! that order is the order of the message fragments, whatever their severity.

use crate::severity::Severity;
use crate::snapshot::{FileDescriptorUsage, MetricsSnapshot};
use crate::thresholds::ThresholdConfig;
use crate::verdict::{Finding, PerfDatum, Verdict};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("cannot compute {metric} usage: capacity reported as zero")]
    ZeroCapacity { metric: &'static str },
}

/// `used / total * 100`, rounded to two decimals.
pub fn percentage(used: f64, total: f64) -> f64 {
    (used / total * 100.0 * 100.0).round() / 100.0
}

fn utilization(metric: &'static str, used: f64, total: f64) -> Result<f64, EvalError> {
    if total == 0.0 {
        return Err(EvalError::ZeroCapacity { metric });
    }
    Ok(percentage(used, total))
}

/// Evaluate one snapshot. Pure apart from debug logging.
pub fn evaluate(snapshot: &MetricsSnapshot, config: &ThresholdConfig) -> Result<Verdict, EvalError> {
    let mut findings = Vec::new();
    let mut perfdata = Vec::new();

    let pmem = utilization("memory", snapshot.memory_used, snapshot.memory_limit)?;
    debug!("memory usage {:.2}% ({} / {})", pmem, snapshot.memory_used, snapshot.memory_limit);
    perfdata.push(PerfDatum::new("memory", pmem, &config.memory));
    if let Some(severity) = config.memory.classify(pmem) {
        findings.push(Finding::breach("Memory usage", severity, pmem));
    }

    let psocket = utilization("socket", snapshot.sockets_used, snapshot.sockets_total)?;
    debug!("socket usage {:.2}% ({} / {})", psocket, snapshot.sockets_used, snapshot.sockets_total);
    perfdata.push(PerfDatum::new("sockets", psocket, &config.sockets));
    if let Some(severity) = config.sockets.classify(psocket) {
        findings.push(Finding::breach("Socket usage", severity, psocket));
    }

    if let Some(finding) = file_descriptor_check(snapshot.file_descriptors, config, &mut perfdata) {
        findings.push(finding);
    }

    if config.watch_alarms {
        if snapshot.memory_alarm_active {
            findings.push(Finding::new(Severity::Critical, " Memory Alarm ON"));
        }
        if snapshot.disk_alarm_active {
            findings.push(Finding::new(Severity::Critical, " Disk Alarm ON"));
        }
    } else {
        trace!("alarm flags ignored (watch_alarms disabled)");
    }

    Ok(Verdict::from_findings(findings, perfdata))
}

/// File descriptor check.
///
/// The probe this replaces guarded the check with an inverted condition:
/// numeric data skipped it, and unsupported data produced NaN which never
/// crosses a bound. Both branches therefore yield nothing unless
/// `enforce_fd_check` opts into classifying numeric data.
fn file_descriptor_check(
    usage: FileDescriptorUsage,
    config: &ThresholdConfig,
    perfdata: &mut Vec<PerfDatum>,
) -> Option<Finding> {
    match usage {
        FileDescriptorUsage::Numeric { used, total } => {
            if total == 0.0 {
                debug!("fd total reported as zero, skipping fd check");
                return None;
            }
            let pfd = percentage(used, total);
            debug!("fd usage {:.2}% ({} / {})", pfd, used, total);
            perfdata.push(PerfDatum::new("fd", pfd, &config.file_descriptors));

            if !config.enforce_fd_check {
                return None;
            }
            config
                .file_descriptors
                .classify(pfd)
                .map(|severity| Finding::breach("File descriptor usage", severity, pfd))
        }
        FileDescriptorUsage::Unsupported => {
            debug!("fd usage not reported by node, skipping fd check");
            None
        }
    }
}
