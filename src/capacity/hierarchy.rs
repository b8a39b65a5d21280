//! Organizational hierarchy as an index-addressed arena.
//!
//! Nodes are appended under an existing parent, so the tree can hold no
//! cycles and every child has exactly one parent. A [`Hierarchy`] is an
//! immutable snapshot; hosts rebuild it on every data refresh.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capacity::aggregation::{DailyLoad, compute_daily_with};
use crate::capacity::node::{CapacityNode, CapacityRollup};
use crate::core::{DayWindow, Interval};
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeLevel {
    Department,
    Project,
    Object,
    Section,
    Employee,
    AnonymousLoading,
}

impl NodeLevel {
    /// Rows at this level show one person's own assignments.
    #[must_use]
    pub fn is_owner(self) -> bool {
        matches!(self, Self::Employee | Self::AnonymousLoading)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: NodeId,
    pub key: String,
    pub name: String,
    pub level: NodeLevel,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub capacity: Option<CapacityNode>,
    pub intervals: Vec<Interval>,
}

impl HierarchyNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Mutable assembly step for a [`Hierarchy`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    nodes: Vec<HierarchyNode>,
    roots: Vec<NodeId>,
}

impl HierarchyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        level: NodeLevel,
    ) -> NodeId {
        let id = self.push(key.into(), name.into(), level, None);
        self.roots.push(id);
        id
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        name: impl Into<String>,
        level: NodeLevel,
    ) -> TimelineResult<NodeId> {
        self.check(parent)?;
        let id = self.push(key.into(), name.into(), level, Some(parent));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn set_capacity(&mut self, node: NodeId, capacity: CapacityNode) -> TimelineResult<()> {
        self.check(node)?;
        self.nodes[node.0].capacity = Some(capacity);
        Ok(())
    }

    pub fn add_intervals<I>(&mut self, node: NodeId, intervals: I) -> TimelineResult<()>
    where
        I: IntoIterator<Item = Interval>,
    {
        self.check(node)?;
        self.nodes[node.0].intervals.extend(intervals);
        Ok(())
    }

    #[must_use]
    pub fn build(self) -> Hierarchy {
        debug!(
            nodes = self.nodes.len(),
            roots = self.roots.len(),
            "built hierarchy snapshot"
        );
        Hierarchy {
            nodes: self.nodes,
            roots: self.roots,
        }
    }

    fn push(
        &mut self,
        key: String,
        name: String,
        level: NodeLevel,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HierarchyNode {
            id,
            key,
            name,
            level,
            parent,
            children: Vec::new(),
            capacity: None,
            intervals: Vec::new(),
        });
        id
    }

    fn check(&self, node: NodeId) -> TimelineResult<()> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(TimelineError::UnknownNode(node.0))
        }
    }
}

/// Immutable hierarchy snapshot.
///
/// Deserialized snapshots are checked like builder output: every index in
/// range, parent links consistent and every node reachable from exactly one
/// root path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HierarchySnapshot")]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    roots: Vec<NodeId>,
}

/// Unchecked wire form of a [`Hierarchy`].
#[derive(Deserialize)]
struct HierarchySnapshot {
    nodes: Vec<HierarchyNode>,
    roots: Vec<NodeId>,
}

impl TryFrom<HierarchySnapshot> for Hierarchy {
    type Error = TimelineError;

    fn try_from(snapshot: HierarchySnapshot) -> TimelineResult<Self> {
        let HierarchySnapshot { nodes, roots } = snapshot;
        let len = nodes.len();
        let in_range = |id: NodeId| {
            if id.0 < len {
                Ok(id)
            } else {
                Err(TimelineError::UnknownNode(id.0))
            }
        };

        for (index, node) in nodes.iter().enumerate() {
            if node.id.0 != index {
                return Err(TimelineError::InvalidData(format!(
                    "hierarchy node at position {index} has id {}",
                    node.id.0
                )));
            }
            if let Some(parent) = node.parent {
                in_range(parent)?;
            }
            for child in &node.children {
                let child = in_range(*child)?;
                if nodes[child.0].parent != Some(node.id) {
                    return Err(TimelineError::InvalidData(format!(
                        "hierarchy node {} lists child {} that does not point back",
                        node.id.0, child.0
                    )));
                }
            }
        }

        let mut visited = vec![false; len];
        let mut stack = Vec::with_capacity(roots.len());
        for root in &roots {
            let root = in_range(*root)?;
            if nodes[root.0].parent.is_some() {
                return Err(TimelineError::InvalidData(format!(
                    "hierarchy root {} has a parent",
                    root.0
                )));
            }
            stack.push(root);
        }
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut visited[id.0], true) {
                return Err(TimelineError::InvalidData(format!(
                    "hierarchy node {} is reachable twice",
                    id.0
                )));
            }
            stack.extend(nodes[id.0].children.iter().copied());
        }
        if let Some(orphan) = visited.iter().position(|seen| !seen) {
            return Err(TimelineError::InvalidData(format!(
                "hierarchy node {orphan} is not reachable from any root"
            )));
        }

        Ok(Self { nodes, roots })
    }
}

impl Hierarchy {
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> TimelineResult<&HierarchyNode> {
        self.nodes.get(id.0).ok_or(TimelineError::UnknownNode(id.0))
    }

    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.nodes.iter().find(|node| node.key == key).map(|node| node.id)
    }

    /// All nodes, parents before children, siblings in insertion order.
    #[must_use]
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Capacity of a subtree on `date`.
    ///
    /// A node with its own capacity config is a leaf of the rollup; any other
    /// node sums its children. Nodes with neither contribute zero.
    pub fn rollup_capacity(&self, id: NodeId, date: NaiveDate) -> TimelineResult<CapacityRollup> {
        self.node(id)?;
        Ok(self.rollup(id, date))
    }

    fn rollup(&self, id: NodeId, date: NaiveDate) -> CapacityRollup {
        let node = &self.nodes[id.0];
        if let Some(capacity) = &node.capacity {
            return capacity.capacity_on(date);
        }
        node.children
            .iter()
            .fold(CapacityRollup::default(), |total, child| {
                total.combine(self.rollup(*child, date))
            })
    }

    /// Every interval stored in the subtree, own intervals first, then children in order.
    pub fn collect_intervals(&self, id: NodeId) -> TimelineResult<Vec<&Interval>> {
        self.node(id)?;
        let mut collected = Vec::new();
        self.collect_into(id, &mut collected);
        Ok(collected)
    }

    fn collect_into<'a>(&'a self, id: NodeId, out: &mut Vec<&'a Interval>) {
        let node = &self.nodes[id.0];
        out.extend(node.intervals.iter());
        for child in &node.children {
            self.collect_into(*child, out);
        }
    }

    /// Daily load of a subtree: its intervals against its rolled-up capacity.
    pub fn daily_load(&self, id: NodeId, window: &DayWindow) -> TimelineResult<DailyLoad> {
        let intervals = self.collect_intervals(id)?;
        Ok(compute_daily_with(window, intervals, |date| {
            self.rollup(id, date)
        }))
    }
}

/// Daily load for every node, in depth-first order.
#[must_use]
pub fn aggregate_tree(hierarchy: &Hierarchy, window: &DayWindow) -> IndexMap<NodeId, DailyLoad> {
    hierarchy
        .depth_first()
        .into_iter()
        .filter_map(|id| {
            hierarchy
                .daily_load(id, window)
                .ok()
                .map(|load| (id, load))
        })
        .collect()
}
