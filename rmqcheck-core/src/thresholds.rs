//! Warning/critical bounds for each monitored metric.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A warning/critical pair, both expressed as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub warning: f64,
    pub critical: f64,
}

impl Bounds {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    /// Classify a utilization against this pair.
    ///
    /// Critical wins over warning; a NaN percentage never classifies.
    pub fn classify(&self, pct: f64) -> Option<Severity> {
        if pct >= self.critical {
            Some(Severity::Critical)
        } else if pct >= self.warning {
            Some(Severity::Warning)
        } else {
            None
        }
    }
}

/// Immutable threshold configuration, built once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub memory: Bounds,
    pub sockets: Bounds,
    pub file_descriptors: Bounds,
    /// Whether the node's memory/disk alarm flags contribute to the verdict.
    pub watch_alarms: bool,
    /// Classify numeric descriptor usage instead of skipping the check.
    pub enforce_fd_check: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            memory: Bounds::new(80.0, 90.0),
            sockets: Bounds::new(80.0, 90.0),
            file_descriptors: Bounds::new(80.0, 90.0),
            watch_alarms: true,
            enforce_fd_check: false,
        }
    }
}

impl ThresholdConfig {
    /// Diagnostics for suspicious but accepted bounds.
    ///
    /// Bounds are never rejected; the caller decides whether to log these.
    pub fn validate(&self) -> Vec<String> {
        let mut notes = Vec::new();
        for (name, bounds) in [
            ("memory", &self.memory),
            ("socket", &self.sockets),
            ("fd", &self.file_descriptors),
        ] {
            if bounds.warning > bounds.critical {
                notes.push(format!(
                    "{name} warning bound {} is above critical bound {}; warning can never fire",
                    bounds.warning, bounds.critical
                ));
            }
            if !(0.0..=100.0).contains(&bounds.warning) || !(0.0..=100.0).contains(&bounds.critical) {
                notes.push(format!(
                    "{name} bounds {}/{} fall outside 0-100%",
                    bounds.warning, bounds.critical
                ));
            }
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_edges() {
        let b = Bounds::new(80.0, 90.0);
        assert_eq!(b.classify(79.99), None);
        assert_eq!(b.classify(80.0), Some(Severity::Warning));
        assert_eq!(b.classify(89.99), Some(Severity::Warning));
        assert_eq!(b.classify(90.0), Some(Severity::Critical));
        assert_eq!(b.classify(150.0), Some(Severity::Critical));
    }

    #[test]
    fn test_classify_nan_is_silent() {
        assert_eq!(Bounds::new(0.0, 0.0).classify(f64::NAN), None);
    }

    #[test]
    fn test_inverted_bounds_go_straight_to_critical() {
        let b = Bounds::new(95.0, 50.0);
        assert_eq!(b.classify(60.0), Some(Severity::Critical));
        assert_eq!(b.classify(40.0), None);
    }

    #[test]
    fn test_default_config() {
        let cfg = ThresholdConfig::default();
        assert_eq!(cfg.memory, Bounds::new(80.0, 90.0));
        assert!(cfg.watch_alarms);
        assert!(!cfg.enforce_fd_check);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn test_validate_flags_odd_bounds() {
        let cfg = ThresholdConfig {
            sockets: Bounds::new(95.0, 90.0),
            file_descriptors: Bounds::new(80.0, 120.0),
            ..ThresholdConfig::default()
        };
        let notes = cfg.validate();
        assert_eq!(notes.len(), 2);
        assert!(notes[0].starts_with("socket"));
        assert!(notes[1].starts_with("fd"));
    }
}
