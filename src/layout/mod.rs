//! Bar layout for timeline rows: lane packing, pixel geometry, colors and
//! pointer hit testing.

pub mod bars;
pub mod color;
pub mod lanes;

pub use bars::{BarGeometryConfig, BarRender, RowLayout, bar_color, layout, layout_row};
pub use color::{BAR_PALETTE, Color, color_for_key};
pub use hit_test::{BarHit, HitZone, hit_test};
pub use lanes::{LaneAssignment, assign_lanes, layout_order};
