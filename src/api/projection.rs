use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capacity::{DailyLoad, Hierarchy, NodeId, NodeLevel, aggregate_tree};
use crate::core::{DayScale, DayWindow};
use crate::error::{TimelineError, TimelineResult};
use crate::layout::{BarGeometryConfig, RowLayout, layout_row};

pub const PROJECTION_JSON_SCHEMA_V1: u32 = 1;

/// One visible timeline row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowProjection {
    pub node: NodeId,
    pub key: String,
    pub name: String,
    pub level: NodeLevel,
    pub depth: usize,
    /// Row shows every assignment of its subtree; bars are read-only.
    pub aggregate: bool,
    pub layout: RowLayout,
}

/// Render model for one hierarchy snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineProjection {
    pub rows: Vec<RowProjection>,
    pub loads: IndexMap<NodeId, DailyLoad>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineProjectionJsonContractV1 {
    pub schema_version: u32,
    pub projection: TimelineProjection,
}

impl TimelineProjection {
    #[must_use]
    pub fn row(&self, node: NodeId) -> Option<&RowProjection> {
        self.rows.iter().find(|row| row.node == node)
    }

    #[must_use]
    pub fn load(&self, node: NodeId) -> Option<&DailyLoad> {
        self.loads.get(&node)
    }

    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.rows.iter().map(|row| row.layout.height).sum()
    }

    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineProjectionJsonContractV1 {
            schema_version: PROJECTION_JSON_SCHEMA_V1,
            projection: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize projection contract v1: {e}"))
        })
    }
}

/// Lays out every hierarchy node as a row and aggregates its daily load.
///
/// Employee and anonymous-loading rows show their own intervals; every other
/// level shows the flattened intervals of its subtree.
#[must_use]
pub fn project_hierarchy(
    hierarchy: &Hierarchy,
    window: &DayWindow,
    scale: DayScale,
    geometry: BarGeometryConfig,
) -> TimelineProjection {
    let mut rows = Vec::with_capacity(hierarchy.len());
    for id in hierarchy.depth_first() {
        let Ok(node) = hierarchy.node(id) else {
            continue;
        };
        let aggregate = !node.level.is_owner();
        let layout = if aggregate {
            let intervals = hierarchy.collect_intervals(id).unwrap_or_default();
            let mut layout = layout_row(intervals, window, scale, geometry);
            for bar in &mut layout.bars {
                bar.resizable = false;
            }
            layout
        } else {
            layout_row(&node.intervals, window, scale, geometry)
        };

        rows.push(RowProjection {
            node: id,
            key: node.key.clone(),
            name: node.name.clone(),
            level: node.level,
            depth: depth_of(hierarchy, id),
            aggregate,
            layout,
        });
    }

    let loads = aggregate_tree(hierarchy, window);
    debug!(rows = rows.len(), days = window.len(), "projected timeline");
    TimelineProjection { rows, loads }
}

fn depth_of(hierarchy: &Hierarchy, id: NodeId) -> usize {
    let mut depth = 0;
    let mut current = hierarchy.node(id).ok().and_then(|node| node.parent);
    while let Some(parent) = current {
        depth += 1;
        current = hierarchy.node(parent).ok().and_then(|node| node.parent);
    }
    depth
}
