//! Host-facing facade over the layout, interaction and capacity engines.

mod config;
mod engine;
mod projection;

pub use config::TimelineConfig;
pub use engine::TimelineEngine;
pub use projection::{
    PROJECTION_JSON_SCHEMA_V1, RowProjection, TimelineProjection,
    TimelineProjectionJsonContractV1, project_hierarchy,
};
