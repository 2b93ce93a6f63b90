//! Stitching pass: join a layer's freshly generated edges into closed
//! quadrilaterals, adding the bridging edges that close each one.
//!
//! Two shapes occur. Consecutive new edges sharing a frontier point close a
//! "corner" quad through a mirrored fourth point; edges on distinct frontier
//! points close a "square" quad through the one existing edge that already
//! connects them. A pair with no usable connecting edge is skipped, not an
//! error: the same quad is reached again from the other side.

use crate::disk::construct::create_mirrored_point;
use crate::disk::{Disk, DiskCfg, PointId};

use super::graph::Graph;
use super::types::{Edge, EdgeId, GraphError, IndexSource, OrientedEdge, Polygon, PolygonId};
use super::TilingError;

/// Close a quadrilateral over two edges sharing a point: mirror the shared
/// point across the geodesic through the two far endpoints and return the
/// two bridging segments `(a, m)` and `(m, b)`.
pub fn complete_quad(
    disk: &mut Disk,
    cfg: DiskCfg,
    sides: u32,
    e0: &Edge,
    e1: &Edge,
) -> Result<[(PointId, PointId); 2], TilingError> {
    if sides != 4 {
        return Err(TilingError::UnsupportedPolygonSize { sides });
    }

    let common = e0
        .common_point(e1)
        .ok_or(GraphError::UnknownPoint(e1.p0))?;
    let a = e0.oriented_away_from(common)?.p1;
    let b = e1.oriented_away_from(common)?.p1;

    let m = create_mirrored_point(disk, common, a, b, cfg)?;
    Ok([(a, m), (m, b)])
}

#[derive(Clone, Copy, Debug)]
pub struct EdgeStitcher {
    cfg: DiskCfg,
}

impl EdgeStitcher {
    pub fn new(cfg: DiskCfg) -> Self {
        Self { cfg }
    }

    /// Walk consecutive pairs of the layer's new edges cyclically and close
    /// a polygon over each stitchable pair. Returns the ids of the polygons
    /// pushed into the graph.
    pub fn stitch_new_edges(
        &self,
        disk: &mut Disk,
        sides: u32,
        graph: &mut Graph,
        new_edges: &[EdgeId],
        layer: usize,
        edge_indices: &mut IndexSource,
        polygon_indices: &mut IndexSource,
    ) -> Result<Vec<PolygonId>, TilingError> {
        let mut result = Vec::new();
        if new_edges.len() < 2 {
            return Ok(result);
        }

        for i in 0..new_edges.len() {
            let e0_id = new_edges[i];
            let e1_id = new_edges[(i + 1) % new_edges.len()];
            let e0 = graph.edge(e0_id)?.clone();
            let e1 = graph.edge(e1_id)?.clone();

            let cycle = if let Some(common) = e0.common_point(&e1) {
                let [(a, m), (_, b)] = complete_quad(disk, self.cfg, sides, &e0, &e1)?;
                // (b -> common -> a -> m -> b)
                [(b, common), (common, a), (a, m), (m, b)]
            } else {
                // The quad is closed by the one existing edge connecting the
                // two frontier points.
                let candidates = [
                    (e0.p0, e1.p0),
                    (e0.p0, e1.p1),
                    (e0.p1, e1.p0),
                    (e0.p1, e1.p1),
                ];
                let mut connecting = candidates
                    .iter()
                    .filter(|(u, v)| graph.contains_edge(*u, *v));
                let (c0, c1) = match (connecting.next(), connecting.next()) {
                    (Some(pair), None) => *pair,
                    _ => continue,
                };
                let a = e0.oriented_away_from(c0)?.p1;
                let b = e1.oriented_away_from(c1)?.p1;
                [(c0, a), (a, b), (b, c1), (c1, c0)]
            };

            let mut slots = Vec::with_capacity(cycle.len());
            for (u, v) in cycle {
                slots.push(self.slot_for(graph, u, v, layer, edge_indices)?);
            }
            let polygon = Polygon::new(
                graph.arena(),
                slots,
                layer,
                polygon_indices.next_index(),
                Vec::new(),
                Vec::new(),
            )?;
            let id = PolygonId(graph.polygons().len());
            graph.push_polygon(polygon);
            result.push(id);
        }

        Ok(result)
    }

    /// Resolve the traversal `u -> v` to an oriented slot, registering the
    /// edge first if the graph does not have it yet.
    fn slot_for(
        &self,
        graph: &mut Graph,
        u: PointId,
        v: PointId,
        layer: usize,
        indices: &mut IndexSource,
    ) -> Result<OrientedEdge, TilingError> {
        let id = match graph.find_edge(u, v) {
            Some(id) => id,
            None => graph.add_edge(Edge::new(u, v, layer, indices.next_index())?)?,
        };
        let reversed = graph.edge(id)?.p0 != u;
        Ok(OrientedEdge { edge: id, reversed })
    }
}
