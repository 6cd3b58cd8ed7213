//! Findings and the verdict they fold into.

use crate::severity::Severity;
use crate::thresholds::Bounds;
use serde::Serialize;
use std::fmt;

/// Message used whenever evaluation ends in `Ok`.
pub const HEALTHY_MESSAGE: &str = "Server is healthy.";

/// One observation made during evaluation, kept in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub text: String,
}

impl Finding {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self { severity, text: text.into() }
    }

    /// Threshold breach for a percentage metric, e.g. `"Memory usage is critical: 95.00%;"`.
    pub(crate) fn breach(subject: &str, severity: Severity, pct: f64) -> Self {
        let text = match severity {
            Severity::Critical => format!("{subject} is critical: {pct:.2}%;"),
            _ => format!("{subject} is at warning: {pct:.2}%;"),
        };
        Self::new(severity, text)
    }
}

/// Performance data point, rendered `label=value%;warn;crit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerfDatum {
    pub label: &'static str,
    pub value: f64,
    pub warning: f64,
    pub critical: f64,
}

impl PerfDatum {
    pub fn new(label: &'static str, value: f64, bounds: &Bounds) -> Self {
        Self {
            label,
            value,
            warning: bounds.warning,
            critical: bounds.critical,
        }
    }
}

impl fmt::Display for PerfDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.2}%;{};{}", self.label, self.value, self.warning, self.critical)
    }
}

/// Outcome of one probe invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
    pub findings: Vec<Finding>,
    pub perfdata: Vec<PerfDatum>,
}

impl Verdict {
    /// Fold findings with [`Severity::escalate`] and join their text.
    ///
    /// Fragments are concatenated as-is in the order given; an `Ok` result
    /// always carries [`HEALTHY_MESSAGE`].
    pub fn from_findings(findings: Vec<Finding>, perfdata: Vec<PerfDatum>) -> Self {
        let severity = findings
            .iter()
            .fold(Severity::Ok, |current, f| current.escalate(f.severity));

        let message = if severity == Severity::Ok {
            HEALTHY_MESSAGE.to_string()
        } else {
            findings.iter().map(|f| f.text.as_str()).collect()
        };

        Self {
            severity,
            message,
            findings,
            perfdata,
        }
    }

    /// Verdict for a probe that could not evaluate the node at all.
    pub fn failure(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            message: text.into(),
            findings: Vec::new(),
            perfdata: Vec::new(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.severity == Severity::Ok
    }

    /// Perfdata joined with spaces, `None` when nothing was measured.
    pub fn perfdata_line(&self) -> Option<String> {
        if self.perfdata.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.perfdata.iter().map(ToString::to_string).collect();
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_findings_is_healthy() {
        let v = Verdict::from_findings(Vec::new(), Vec::new());
        assert!(v.is_healthy());
        assert_eq!(v.message, HEALTHY_MESSAGE);
    }

    #[test]
    fn test_fragments_keep_given_order() {
        let v = Verdict::from_findings(
            vec![
                Finding::breach("Memory usage", Severity::Warning, 85.0),
                Finding::breach("Socket usage", Severity::Critical, 99.5),
                Finding::new(Severity::Critical, " Disk Alarm ON"),
            ],
            Vec::new(),
        );
        assert_eq!(v.severity, Severity::Critical);
        assert_eq!(
            v.message,
            "Memory usage is at warning: 85.00%;Socket usage is critical: 99.50%; Disk Alarm ON"
        );
    }

    #[test]
    fn test_failure_keeps_raw_text() {
        let v = Verdict::failure(Severity::Unknown, "boom");
        assert_eq!(v.severity, Severity::Unknown);
        assert_eq!(v.message, "boom");
        assert!(v.perfdata_line().is_none());
    }

    #[test]
    fn test_perfdata_rendering() {
        let bounds = Bounds::new(80.0, 90.0);
        let v = Verdict::from_findings(
            Vec::new(),
            vec![
                PerfDatum::new("memory", 50.0, &bounds),
                PerfDatum::new("sockets", 12.346, &bounds),
            ],
        );
        assert_eq!(
            v.perfdata_line().as_deref(),
            Some("memory=50.00%;80;90 sockets=12.35%;80;90")
        );
    }
}
