//! rmqcheck core - threshold evaluation for RabbitMQ node health checks
//!
//! Turns one metrics snapshot from a node's management API into one verdict:
//! - Percentage utilizations for memory, sockets and file descriptors
//! - Independent warning/critical bounds per metric
//! - Monotonic severity escalation across all findings
//! - Deterministic message built in evaluation order
//!
//! Nothing in this crate performs I/O; fetching the snapshot and printing the
//! verdict belong to the binary.

pub mod evaluator;
pub mod severity;
pub mod snapshot;
pub mod thresholds;
pub mod verdict;

pub use evaluator::{evaluate, percentage, EvalError};
pub use severity::Severity;
pub use snapshot::{FileDescriptorUsage, MetricsSnapshot};
pub use thresholds::{Bounds, ThresholdConfig};
pub use verdict::{Finding, PerfDatum, Verdict, HEALTHY_MESSAGE};
