//! Severity levels and the escalation rule used to fold findings together.

use serde::Serialize;
use std::fmt;

/// Health state reported to the monitoring framework.
///
/// The derived ordering gives `Ok < Warning < Critical`; `Unknown` sorts last
/// but is never produced by [`Severity::escalate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Fold one finding into the current state.
    ///
    /// - `Ok` moves to whatever the finding is
    /// - `Warning` only moves up to `Critical`
    /// - `Critical` and `Unknown` absorb everything
    pub fn escalate(self, finding: Severity) -> Severity {
        match (self, finding) {
            (Severity::Ok, Severity::Unknown) => Severity::Ok,
            (Severity::Ok, finding) => finding,
            (Severity::Warning, Severity::Critical) => Severity::Critical,
            (current, _) => current,
        }
    }

    /// Upper-case label used as the output prefix.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }

    /// Process exit status expected by Nagios-compatible schedulers.
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINDINGS: [Severity; 2] = [Severity::Warning, Severity::Critical];

    #[test]
    fn test_ok_takes_finding() {
        assert_eq!(Severity::Ok.escalate(Severity::Warning), Severity::Warning);
        assert_eq!(Severity::Ok.escalate(Severity::Critical), Severity::Critical);
    }

    #[test]
    fn test_warning_transitions() {
        assert_eq!(Severity::Warning.escalate(Severity::Warning), Severity::Warning);
        assert_eq!(Severity::Warning.escalate(Severity::Critical), Severity::Critical);
    }

    #[test]
    fn test_critical_absorbs_all() {
        for finding in FINDINGS {
            assert_eq!(Severity::Critical.escalate(finding), Severity::Critical);
        }
    }

    #[test]
    fn test_escalate_never_yields_unknown() {
        for start in [Severity::Ok, Severity::Warning, Severity::Critical] {
            for finding in FINDINGS {
                assert_ne!(start.escalate(finding), Severity::Unknown);
            }
        }
        assert_eq!(Severity::Ok.escalate(Severity::Unknown), Severity::Ok);
    }

    #[test]
    fn test_monotonic_over_every_sequence() {
        // All sequences of up to four findings
        let mut sequences: Vec<Vec<Severity>> = vec![vec![]];
        for _ in 0..4 {
            let mut next = Vec::new();
            for seq in &sequences {
                for finding in FINDINGS {
                    let mut s = seq.clone();
                    s.push(finding);
                    next.push(s);
                }
            }
            sequences.extend(next);
        }

        for seq in sequences {
            let mut current = Severity::Ok;
            for finding in &seq {
                let folded = current.escalate(*finding);
                assert!(folded >= current, "{seq:?} decreased at {finding:?}");
                assert!(folded >= *finding);
                current = folded;
            }
            let worst = seq.iter().copied().max().unwrap_or(Severity::Ok);
            assert_eq!(current, worst);
        }
    }

    #[test]
    fn test_labels_and_exit_codes() {
        assert_eq!(Severity::Ok.to_string(), "OK");
        assert_eq!(Severity::Unknown.label(), "UNKNOWN");
        assert_eq!(
            [Severity::Ok, Severity::Warning, Severity::Critical, Severity::Unknown]
                .map(Severity::exit_code),
            [0, 1, 2, 3]
        );
    }
}
