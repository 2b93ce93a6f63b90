//! Mirror-based tiling via a spanning tree of polygon reflections.
//!
//! Purpose
//! - Grow a {p, q} tiling by reflecting the seed polygon across its own
//!   edges, recursively, to the configured depth. Each reflection shares one
//!   edge with its parent; that copy is flagged redundant so the recursion
//!   never walks back inward.
//!
//! Why this design
//! - Nodes own their children by value, so the tree is a plain recursive
//!   data structure with no parent pointers and no interior mutability.
//! - Edge registration happens in a separate preorder walk after the
//!   geometry exists, deduplicated on unordered endpoint pairs.

use std::collections::HashSet;

use crate::disk::construct::{create_mirrored_point, create_rotated_point};
use crate::disk::{Disk, DiskCfg, PointId};
use crate::tiling::{
    seed_points, Edge, EdgeArena, EdgeTransform, GraphError, IndexSource, OrientedEdge, Polygon,
    PolygonId, TilingAlgorithm, TilingError, TilingOutput, TilingParams, VertexTransform,
};

/// Arena-backed storage for the polygons produced by the recursion.
#[derive(Clone, Debug, Default)]
pub struct SpanStore {
    arena: EdgeArena,
    polygons: Vec<Polygon>,
    polygon_indices: IndexSource,
    edge_indices: IndexSource,
}

impl SpanStore {
    pub fn arena(&self) -> &EdgeArena {
        &self.arena
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    fn polygon(&self, id: PolygonId) -> Result<&Polygon, TilingError> {
        self.polygons
            .get(id.0)
            .ok_or(GraphError::UnknownPolygon(id).into())
    }

    fn push_polygon(&mut self, polygon: Polygon) -> PolygonId {
        let id = PolygonId(self.polygons.len());
        self.polygons.push(polygon);
        id
    }
}

/// One node of the reflection tree: a polygon plus the slot of the edge this
/// node expands through. Children are owned by value.
#[derive(Clone, Debug)]
pub struct SpanningTreeNode {
    polygon: PolygonId,
    slot: usize,
    children: Vec<SpanningTreeNode>,
}

impl SpanningTreeNode {
    pub fn polygon(&self) -> PolygonId {
        self.polygon
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn children(&self) -> &[SpanningTreeNode] {
        &self.children
    }
}

/// Spanning-tree mirror algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct MirrorTiling {
    cfg: DiskCfg,
}

impl MirrorTiling {
    pub fn new(cfg: DiskCfg) -> Self {
        Self { cfg }
    }

    /// Recursively expand one polygon edge. Depth zero and redundant edges
    /// terminate the recursion.
    fn grow_node(
        &self,
        disk: &mut Disk,
        store: &mut SpanStore,
        polygon: PolygonId,
        slot: usize,
        depth: usize,
    ) -> Result<SpanningTreeNode, TilingError> {
        let mut node = SpanningTreeNode {
            polygon,
            slot,
            children: Vec::new(),
        };

        let edge_id = store.polygon(polygon)?.slots()[slot].edge;
        if depth == 0 || !store.arena.get(edge_id)?.is_active {
            return Ok(node);
        }

        let transforms = store.polygon(polygon)?.edge_transforms().to_vec();
        for transform in transforms {
            let child = self.apply_edge_transform(disk, store, polygon, slot, transform)?;
            let child_slots = store.polygon(child)?.slots().len();
            for child_slot in 0..child_slots {
                node.children
                    .push(self.grow_node(disk, store, child, child_slot, depth - 1)?);
            }
        }
        Ok(node)
    }

    fn apply_edge_transform(
        &self,
        disk: &mut Disk,
        store: &mut SpanStore,
        polygon: PolygonId,
        slot: usize,
        transform: EdgeTransform,
    ) -> Result<PolygonId, TilingError> {
        match transform {
            EdgeTransform::Mirror => self.mirror_polygon(disk, store, polygon, slot),
        }
    }

    /// Reflect `polygon` across the geodesic of the edge at `slot`.
    ///
    /// The shared edge is re-emitted verbatim as the child's first edge,
    /// flagged redundant; every other vertex is mirrored across the axis,
    /// chained end-to-start, with the final edge closing back onto the
    /// axis start.
    fn mirror_polygon(
        &self,
        disk: &mut Disk,
        store: &mut SpanStore,
        polygon: PolygonId,
        slot: usize,
    ) -> Result<PolygonId, TilingError> {
        let parent = store.polygon(polygon)?.clone();
        let slots = parent.slots_relative_to(slot);
        let (axis_p0, axis_p1) = store.arena.endpoints(slots[0])?;
        let child_layer = parent.layer + 1;

        let mut new_slots = Vec::with_capacity(slots.len());
        let mut prev_end = axis_p1;
        for (i, s) in slots.iter().enumerate() {
            let edge = if i == 0 {
                Edge::new(axis_p0, axis_p1, child_layer, store.edge_indices.next_index())?
                    .with_activity(false, false, false)
            } else {
                let (_, v) = store.arena.endpoints(*s)?;
                let end = if i == slots.len() - 1 {
                    axis_p0
                } else {
                    create_mirrored_point(disk, v, axis_p0, axis_p1, self.cfg)?
                };
                let start = prev_end;
                prev_end = end;
                let on_axis = |p: PointId| p == axis_p0 || p == axis_p1;
                Edge::new(start, end, child_layer, store.edge_indices.next_index())?
                    .with_activity(true, !on_axis(start), !on_axis(end))
            };
            new_slots.push(OrientedEdge::forward(store.arena.push(edge)));
        }

        let child = Polygon::new(
            &store.arena,
            new_slots,
            child_layer,
            store.polygon_indices.next_index(),
            parent.edge_transforms().to_vec(),
            parent.vertex_transforms().to_vec(),
        )?;
        Ok(store.push_polygon(child))
    }

    /// Apply a vertex transform at one of the polygon's vertices. Not used
    /// by the mirror recursion itself; hosts combine it with custom
    /// transform lists.
    pub fn apply_vertex_transform(
        &self,
        disk: &mut Disk,
        store: &mut SpanStore,
        polygon: PolygonId,
        vertex: PointId,
        transform: VertexTransform,
    ) -> Result<PolygonId, TilingError> {
        match transform {
            VertexTransform::Rotation { angle } => {
                self.rotate_polygon_about_vertex(disk, store, polygon, vertex, angle)
            }
        }
    }

    /// Rotate `polygon` about one of its vertices.
    pub fn rotate_polygon_about_vertex(
        &self,
        disk: &mut Disk,
        store: &mut SpanStore,
        polygon: PolygonId,
        vertex: PointId,
        angle: f64,
    ) -> Result<PolygonId, TilingError> {
        let parent = store.polygon(polygon)?.clone();
        let slots = parent.slots_relative_to_vertex(&store.arena, vertex)?;
        let child_layer = parent.layer + 1;

        let mut new_slots = Vec::with_capacity(slots.len());
        let mut prev_end = None;
        for (i, s) in slots.iter().enumerate() {
            let (_, v) = store.arena.endpoints(*s)?;
            let last = i == slots.len() - 1;
            let start = prev_end.unwrap_or(vertex);
            let end = if last {
                vertex
            } else {
                create_rotated_point(disk, v, vertex, angle)?
            };
            prev_end = Some(end);
            // The edges touching the pivot stay covered by the parent.
            let edge = Edge::new(start, end, child_layer, store.edge_indices.next_index())?
                .with_activity(!(i == 0 || last), i != 0, false);
            new_slots.push(OrientedEdge::forward(store.arena.push(edge)));
        }

        let child = Polygon::new(
            &store.arena,
            new_slots,
            child_layer,
            store.polygon_indices.next_index(),
            parent.edge_transforms().to_vec(),
            parent.vertex_transforms().to_vec(),
        )?;
        Ok(store.push_polygon(child))
    }
}

/// Deduplicating sink for rendered edges; unordered endpoint pairs are
/// registered at most once.
#[derive(Debug, Default)]
struct EdgeRegistrar {
    seen: HashSet<(PointId, PointId)>,
}

impl EdgeRegistrar {
    fn register(&mut self, disk: &mut Disk, edge: &Edge) -> Result<bool, TilingError> {
        let key = if edge.p0 <= edge.p1 {
            (edge.p0, edge.p1)
        } else {
            (edge.p1, edge.p0)
        };
        if !self.seen.insert(key) {
            return Ok(false);
        }
        disk.add_edge(edge.p0, edge.p1, edge.label.clone().unwrap_or_default())?;
        Ok(true)
    }
}

fn register_subtree(
    disk: &mut Disk,
    store: &SpanStore,
    node: &SpanningTreeNode,
    registrar: &mut EdgeRegistrar,
    out: &mut Vec<(PointId, PointId)>,
) -> Result<(), TilingError> {
    let slot = store.polygon(node.polygon)?.slots()[node.slot];
    let edge = store.arena.get(slot.edge)?.clone();
    if registrar.register(disk, &edge)? {
        out.push((edge.p0, edge.p1));
    }
    for child in &node.children {
        register_subtree(disk, store, child, registrar, out)?;
    }
    Ok(())
}

impl TilingAlgorithm for MirrorTiling {
    fn generate(
        &self,
        disk: &mut Disk,
        params: &TilingParams,
    ) -> Result<TilingOutput, TilingError> {
        params.validate()?;

        let points = seed_points(disk, params)?;
        let mut store = SpanStore::default();

        let mut slots = Vec::with_capacity(points.len());
        for i in 0..points.len() {
            let edge = Edge::new(
                points[i],
                points[(i + 1) % points.len()],
                0,
                store.edge_indices.next_index(),
            )?;
            slots.push(OrientedEdge::forward(store.arena.push(edge)));
        }
        let seed = Polygon::new(
            &store.arena,
            slots,
            0,
            store.polygon_indices.next_index(),
            vec![EdgeTransform::Mirror],
            Vec::new(),
        )?;
        let root = store.push_polygon(seed);

        let slot_count = store.polygon(root)?.slots().len();
        let mut edges = Vec::new();
        let mut registrar = EdgeRegistrar::default();
        for slot in 0..slot_count {
            let tree = self.grow_node(disk, &mut store, root, slot, params.layers as usize)?;
            register_subtree(disk, &store, &tree, &mut registrar, &mut edges)?;
        }

        Ok(TilingOutput {
            points: disk.points().collect(),
            edges,
        })
    }
}
