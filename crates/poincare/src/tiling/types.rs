//! Data types for the tiling graph: edges, polygons, and the arena that owns
//! them.
//!
//! Polygons reference edges through `EdgeId` slots instead of back-pointers,
//! so ownership flows one way: the arena owns edges, polygons own slot lists.

use std::fmt;

use crate::disk::PointId;

/// Arena handle for an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// Arena handle for a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PolygonId(pub usize);

/// Errors raised by graph and polygon invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// An equivalent edge (same unordered endpoints) is already registered.
    DuplicateEdge { p0: PointId, p1: PointId },
    /// A point appeared where a distinct one was required (degenerate edge,
    /// re-marking an already tracked frontier point).
    DuplicatePoint(PointId),
    /// The point is not part of the structure being queried.
    UnknownPoint(PointId),
    /// The edge handle does not resolve in the arena.
    UnknownEdge(EdgeId),
    /// The polygon handle does not resolve in its store.
    UnknownPolygon(PolygonId),
    /// Only frontier points may transition to visited.
    NotFrontier(PointId),
    /// Polygon edges do not chain end-to-start at slot `at`.
    NonContiguousPolygon { at: usize },
    /// A polygon needs at least 3 edges.
    PolygonTooSmall { edges: usize },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateEdge { p0, p1 } => {
                write!(f, "graph already contains an edge equivalent to {p0}-{p1}")
            }
            GraphError::DuplicatePoint(p) => write!(f, "point {p} is not distinct here"),
            GraphError::UnknownPoint(p) => write!(f, "point {p} is not part of this structure"),
            GraphError::UnknownEdge(e) => write!(f, "edge handle {} does not resolve", e.0),
            GraphError::UnknownPolygon(p) => write!(f, "polygon handle {} does not resolve", p.0),
            GraphError::NotFrontier(p) => write!(f, "point {p} has not been marked frontier"),
            GraphError::NonContiguousPolygon { at } => {
                write!(f, "polygon edges are not contiguous at slot {at}")
            }
            GraphError::PolygonTooSmall { edges } => {
                write!(f, "polygon needs at least 3 edges, got {edges}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Canonical unordered key for edge membership checks.
#[inline]
pub(crate) fn unordered(p0: PointId, p1: PointId) -> (PointId, PointId) {
    if p0 <= p1 {
        (p0, p1)
    } else {
        (p1, p0)
    }
}

/// An oriented edge between two distinct points, with generation metadata.
///
/// `is_active` marks whether the edge participates in further generation
/// (inactive edges are the redundant shared copies produced by mirroring);
/// the endpoint flags do the same per vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub p0: PointId,
    pub p1: PointId,
    pub layer: usize,
    pub index_in_layer: usize,
    pub is_active: bool,
    pub is_p0_active: bool,
    pub is_p1_active: bool,
    pub label: Option<String>,
}

impl Edge {
    pub fn new(
        p0: PointId,
        p1: PointId,
        layer: usize,
        index_in_layer: usize,
    ) -> Result<Self, GraphError> {
        if p0 == p1 {
            return Err(GraphError::DuplicatePoint(p0));
        }
        Ok(Self {
            p0,
            p1,
            layer,
            index_in_layer,
            is_active: true,
            is_p0_active: true,
            is_p1_active: true,
            label: None,
        })
    }

    /// Override the participation flags (builder style).
    pub fn with_activity(mut self, edge: bool, p0: bool, p1: bool) -> Self {
        self.is_active = edge;
        self.is_p0_active = p0;
        self.is_p1_active = p1;
        self
    }

    /// Same undirected edge, opposite orientation; endpoint flags swap too.
    pub fn reversed(&self) -> Self {
        Self {
            p0: self.p1,
            p1: self.p0,
            layer: self.layer,
            index_in_layer: self.index_in_layer,
            is_active: self.is_active,
            is_p0_active: self.is_p1_active,
            is_p1_active: self.is_p0_active,
            label: self.label.clone(),
        }
    }

    /// Orientation with `point` first; fails if the edge does not touch it.
    pub fn oriented_away_from(&self, point: PointId) -> Result<Self, GraphError> {
        if point == self.p0 {
            Ok(self.clone())
        } else if point == self.p1 {
            Ok(self.reversed())
        } else {
            Err(GraphError::UnknownPoint(point))
        }
    }

    /// Canonical unordered endpoint pair.
    #[inline]
    pub fn key(&self) -> (PointId, PointId) {
        unordered(self.p0, self.p1)
    }

    pub fn has_common_point(&self, other: &Edge) -> bool {
        self.common_point(other).is_some()
    }

    pub fn common_point(&self, other: &Edge) -> Option<PointId> {
        if self.p0 == other.p0 || self.p0 == other.p1 {
            Some(self.p0)
        } else if self.p1 == other.p0 || self.p1 == other.p1 {
            Some(self.p1)
        } else {
            None
        }
    }
}

/// Append-only edge storage.
#[derive(Clone, Debug, Default)]
pub struct EdgeArena {
    edges: Vec<Edge>,
}

impl EdgeArena {
    pub fn push(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(edge);
        id
    }

    pub fn get(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        self.edges.get(id.0).ok_or(GraphError::UnknownEdge(id))
    }

    pub fn get_mut(&mut self, id: EdgeId) -> Result<&mut Edge, GraphError> {
        self.edges.get_mut(id.0).ok_or(GraphError::UnknownEdge(id))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Endpoints of a slot in traversal order.
    pub fn endpoints(&self, slot: OrientedEdge) -> Result<(PointId, PointId), GraphError> {
        let e = self.get(slot.edge)?;
        Ok(if slot.reversed {
            (e.p1, e.p0)
        } else {
            (e.p0, e.p1)
        })
    }
}

/// A polygon slot: an arena edge plus the orientation it is traversed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrientedEdge {
    pub edge: EdgeId,
    pub reversed: bool,
}

impl OrientedEdge {
    #[inline]
    pub fn forward(edge: EdgeId) -> Self {
        Self {
            edge,
            reversed: false,
        }
    }
}

/// Transform applied to a polygon's active edges when generating children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeTransform {
    /// Reflect the polygon across the edge's geodesic.
    Mirror,
}

/// Transform applied to a polygon's active vertices when generating children.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VertexTransform {
    /// Rotate the polygon about the vertex by the given angle.
    Rotation { angle: f64 },
}

/// A closed cyclic sequence of contiguous oriented edges.
#[derive(Clone, Debug)]
pub struct Polygon {
    slots: Vec<OrientedEdge>,
    pub layer: usize,
    pub index_in_layer: usize,
    edge_transforms: Vec<EdgeTransform>,
    vertex_transforms: Vec<VertexTransform>,
}

impl Polygon {
    /// Validates the contiguity invariant: every slot must end where the next
    /// one starts, all the way around.
    pub fn new(
        arena: &EdgeArena,
        slots: Vec<OrientedEdge>,
        layer: usize,
        index_in_layer: usize,
        edge_transforms: Vec<EdgeTransform>,
        vertex_transforms: Vec<VertexTransform>,
    ) -> Result<Self, GraphError> {
        if slots.len() < 3 {
            return Err(GraphError::PolygonTooSmall { edges: slots.len() });
        }
        for i in 0..slots.len() {
            let (_, end) = arena.endpoints(slots[i])?;
            let (start, _) = arena.endpoints(slots[(i + 1) % slots.len()])?;
            if end != start {
                return Err(GraphError::NonContiguousPolygon { at: i });
            }
        }
        Ok(Self {
            slots,
            layer,
            index_in_layer,
            edge_transforms,
            vertex_transforms,
        })
    }

    pub fn slots(&self) -> &[OrientedEdge] {
        &self.slots
    }

    /// Start vertex of every slot, in cycle order.
    pub fn vertices(&self, arena: &EdgeArena) -> Result<Vec<PointId>, GraphError> {
        self.slots
            .iter()
            .map(|s| arena.endpoints(*s).map(|(start, _)| start))
            .collect()
    }

    pub fn contains_vertex(&self, arena: &EdgeArena, vertex: PointId) -> Result<bool, GraphError> {
        Ok(self.vertices(arena)?.contains(&vertex))
    }

    /// Slot list rotated to start at `slot_index`.
    pub fn slots_relative_to(&self, slot_index: usize) -> Vec<OrientedEdge> {
        let n = self.slots.len();
        (0..n).map(|i| self.slots[(slot_index + i) % n]).collect()
    }

    /// Slot list rotated so the first slot starts at `vertex`.
    pub fn slots_relative_to_vertex(
        &self,
        arena: &EdgeArena,
        vertex: PointId,
    ) -> Result<Vec<OrientedEdge>, GraphError> {
        for (i, slot) in self.slots.iter().enumerate() {
            let (start, _) = arena.endpoints(*slot)?;
            if start == vertex {
                return Ok(self.slots_relative_to(i));
            }
        }
        Err(GraphError::UnknownPoint(vertex))
    }

    pub fn edge_transforms(&self) -> &[EdgeTransform] {
        &self.edge_transforms
    }

    pub fn vertex_transforms(&self) -> &[VertexTransform] {
        &self.vertex_transforms
    }
}

/// Monotonically increasing index dispenser for per-layer numbering.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexSource {
    next: usize,
}

impl IndexSource {
    pub fn next_index(&mut self) -> usize {
        let i = self.next;
        self.next += 1;
        i
    }
}
