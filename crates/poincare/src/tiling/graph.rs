//! The tiling graph: arena-backed edges, adjacency, and the frontier/visited
//! point partition that drives layer-by-layer growth.
//!
//! Frontier and visited sets are `BTreeSet`s and incident lists keep
//! insertion order, so iteration over the graph is deterministic for a given
//! construction sequence.

use std::collections::{BTreeSet, HashMap};

use crate::disk::PointId;

use super::types::{unordered, Edge, EdgeArena, EdgeId, GraphError, Polygon};

#[derive(Clone, Debug, Default)]
pub struct Graph {
    arena: EdgeArena,
    by_key: HashMap<(PointId, PointId), EdgeId>,
    incident: HashMap<PointId, Vec<EdgeId>>,
    frontier: BTreeSet<PointId>,
    visited: BTreeSet<PointId>,
    polygons: Vec<Polygon>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an edge. A point seen for the first time joins the frontier
    /// automatically; an unordered-endpoint collision is an error.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        let key = edge.key();
        if self.by_key.contains_key(&key) {
            return Err(GraphError::DuplicateEdge {
                p0: edge.p0,
                p1: edge.p1,
            });
        }
        let (p0, p1) = (edge.p0, edge.p1);
        let id = self.arena.push(edge);
        self.by_key.insert(key, id);
        for p in [p0, p1] {
            let entry = self.incident.entry(p).or_default();
            if entry.is_empty() && !self.visited.contains(&p) {
                self.frontier.insert(p);
            }
            entry.push(id);
        }
        Ok(id)
    }

    pub fn contains_edge(&self, p0: PointId, p1: PointId) -> bool {
        self.by_key.contains_key(&unordered(p0, p1))
    }

    pub fn find_edge(&self, p0: PointId, p1: PointId) -> Option<EdgeId> {
        self.by_key.get(&unordered(p0, p1)).copied()
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        self.arena.get(id)
    }

    pub fn set_edge_label(&mut self, id: EdgeId, label: impl Into<String>) -> Result<(), GraphError> {
        self.arena.get_mut(id)?.label = Some(label.into());
        Ok(())
    }

    /// All edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.arena.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.arena.len()
    }

    /// Edges touching `point`, in the order they were registered.
    pub fn edges_incident_to(&self, point: PointId) -> Result<&[EdgeId], GraphError> {
        self.incident
            .get(&point)
            .map(Vec::as_slice)
            .ok_or(GraphError::UnknownPoint(point))
    }

    /// Current frontier, in `PointId` order.
    pub fn frontier_points(&self) -> impl Iterator<Item = PointId> + '_ {
        self.frontier.iter().copied()
    }

    pub fn is_frontier(&self, point: PointId) -> bool {
        self.frontier.contains(&point)
    }

    pub fn is_visited(&self, point: PointId) -> bool {
        self.visited.contains(&point)
    }

    /// Explicitly mark a known point as frontier. The point must carry at
    /// least one edge and must not already be tracked in either set.
    pub fn mark_frontier(&mut self, point: PointId) -> Result<(), GraphError> {
        if self.frontier.contains(&point) || self.visited.contains(&point) {
            return Err(GraphError::DuplicatePoint(point));
        }
        if !self.incident.contains_key(&point) {
            return Err(GraphError::UnknownPoint(point));
        }
        self.frontier.insert(point);
        Ok(())
    }

    /// Move a point from frontier to visited.
    pub fn mark_visited(&mut self, point: PointId) -> Result<(), GraphError> {
        if !self.frontier.remove(&point) {
            return Err(GraphError::NotFrontier(point));
        }
        self.visited.insert(point);
        Ok(())
    }

    pub fn push_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn arena(&self) -> &EdgeArena {
        &self.arena
    }
}
