//! timeline-rs: timeline layout and capacity-aggregation engine.
//!
//! Turns date-ranged loading records into laned, pixel-positioned bars,
//! drives edge-drag resizing of those bars, and rolls daily capacity
//! utilization up an organizational hierarchy. Everything is a pure
//! computation over immutable snapshots supplied by the host.

pub mod api;
pub mod capacity;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
