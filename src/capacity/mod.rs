//! Capacity utilization: daily rate sums against configured capacity,
//! rolled up through the organizational hierarchy.

pub mod aggregation;
pub mod hierarchy;
pub mod node;
pub mod severity;

pub use aggregation::{
    AggregationResult, DailyLoad, OVERFLOW_SENTINEL, compute_daily, compute_daily_with, load_ratio,
};
pub use hierarchy::{
    Hierarchy, HierarchyBuilder, HierarchyNode, NodeId, NodeLevel, aggregate_tree,
};
pub use node::{CapacityNode, CapacityRollup};
pub use severity::{LoadSeverity, SeverityThresholds};
