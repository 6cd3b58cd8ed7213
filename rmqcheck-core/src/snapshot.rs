//! Node metrics as seen by the evaluator.

use serde::{Deserialize, Serialize};

/// File descriptor usage as reported by the node.
///
/// Some platforms (notably Windows) cannot report descriptor counts and the
/// management API answers with a non-numeric marker instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileDescriptorUsage {
    Numeric { used: f64, total: f64 },
    Unsupported,
}

/// One immutable reading of a node, created once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub memory_used: f64,
    pub memory_limit: f64,
    pub sockets_used: f64,
    pub sockets_total: f64,
    pub file_descriptors: FileDescriptorUsage,
    pub memory_alarm_active: bool,
    pub disk_alarm_active: bool,
}

impl MetricsSnapshot {
    /// Snapshot with the given memory and socket readings, no descriptor data
    /// and both alarms off.
    pub fn new(memory_used: f64, memory_limit: f64, sockets_used: f64, sockets_total: f64) -> Self {
        Self {
            memory_used,
            memory_limit,
            sockets_used,
            sockets_total,
            file_descriptors: FileDescriptorUsage::Unsupported,
            memory_alarm_active: false,
            disk_alarm_active: false,
        }
    }

    pub fn with_file_descriptors(mut self, used: f64, total: f64) -> Self {
        self.file_descriptors = FileDescriptorUsage::Numeric { used, total };
        self
    }

    pub fn with_memory_alarm(mut self, active: bool) -> Self {
        self.memory_alarm_active = active;
        self
    }

    pub fn with_disk_alarm(mut self, active: bool) -> Self {
        self.disk_alarm_active = active;
        self
    }
}
