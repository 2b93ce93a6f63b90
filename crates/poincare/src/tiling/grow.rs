//! Layer-by-layer frontier growth.
//!
//! After Datar's layered construction: seed one central polygon, then per
//! layer sort the frontier by angle, generate new edges per frontier point,
//! stitch them into polygons, and retire the processed points to visited.
//! Everything is deterministic for fixed parameters: point ids are
//! sequential, the frontier order is the documented angle sort, and ties
//! break on point id.

use std::cmp::Ordering;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::disk::{Disk, DiskCfg, DiskError, PointId};

use super::generator::EdgeGenerator;
use super::graph::Graph;
use super::stitcher::EdgeStitcher;
use super::types::{Edge, IndexSource, OrientedEdge, Polygon};
use super::TilingError;

/// Schläfli-style parameters: `sides`-gons, `adjacency` meeting per vertex,
/// grown for `layers` rounds beyond the seed.
#[derive(Clone, Copy, Debug)]
pub struct TilingParams {
    pub sides: u32,
    pub adjacency: u32,
    pub layers: u32,
}

impl TilingParams {
    /// The pair must be hyperbolic: p >= 3, q >= 3 and (p - 2)(q - 2) > 4.
    pub fn validate(&self) -> Result<(), TilingError> {
        if self.sides < 3 || self.adjacency < 3 || (self.sides - 2) * (self.adjacency - 2) <= 4 {
            return Err(TilingError::UnsupportedTiling {
                p: self.sides,
                q: self.adjacency,
            });
        }
        Ok(())
    }

    /// Euclidean distance from the disk center to a seed vertex, from the
    /// hyperbolic triangle with angles π/p, π/q, π/2.
    pub fn seed_radius(&self) -> f64 {
        let a = PI / self.sides as f64;
        let b = PI / self.adjacency as f64;
        (FRAC_PI_2 - b - a).sin() / (1.0 - b.sin().powi(2) - a.sin().powi(2)).sqrt()
    }
}

/// The generated tiling as id-level data; coordinates are read back from the
/// disk the algorithm ran on.
#[derive(Clone, Debug)]
pub struct TilingOutput {
    pub points: Vec<PointId>,
    pub edges: Vec<(PointId, PointId)>,
}

/// Common interface over the two generation strategies.
pub trait TilingAlgorithm {
    fn generate(
        &self,
        disk: &mut Disk,
        params: &TilingParams,
    ) -> Result<TilingOutput, TilingError>;
}

/// Bake the seed polygon's vertices: one per corner, rotated into place and
/// pushed out to the seed radius.
pub(crate) fn seed_points(
    disk: &mut Disk,
    params: &TilingParams,
) -> Result<Vec<PointId>, TilingError> {
    let radius = params.seed_radius();
    let mut points = Vec::with_capacity(params.sides as usize);
    for i in 0..params.sides {
        let mut disk = disk.saved();
        disk.rotate(TAU * i as f64 / params.sides as f64);
        disk.translate(0.0, radius);
        points.push(disk.add_point()?);
    }
    Ok(points)
}

/// Frontier-growth algorithm over the edge graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontierTiling {
    cfg: DiskCfg,
}

impl FrontierTiling {
    pub fn new(cfg: DiskCfg) -> Self {
        Self { cfg }
    }

    fn seed_graph(&self, disk: &mut Disk, params: &TilingParams) -> Result<Graph, TilingError> {
        let points = seed_points(disk, params)?;
        let mut graph = Graph::new();
        let mut indices = IndexSource::default();
        let mut slots = Vec::with_capacity(points.len());
        for i in 0..points.len() {
            let edge = Edge::new(
                points[i],
                points[(i + 1) % points.len()],
                0,
                indices.next_index(),
            )?;
            slots.push(OrientedEdge::forward(graph.add_edge(edge)?));
        }
        let seed = Polygon::new(graph.arena(), slots, 0, 0, Vec::new(), Vec::new())?;
        graph.push_polygon(seed);
        Ok(graph)
    }

    /// Frontier points sorted by descending angle to the disk center, point
    /// id as tiebreak.
    fn ordered_frontier(&self, disk: &Disk, graph: &Graph) -> Result<Vec<PointId>, TilingError> {
        let mut frontier = graph
            .frontier_points()
            .map(|p| Ok((p, disk.angle_to_point(p)?)))
            .collect::<Result<Vec<_>, DiskError>>()?;
        frontier.sort_by(|(p0, a0), (p1, a1)| {
            a1.partial_cmp(a0).unwrap_or(Ordering::Equal).then(p0.cmp(p1))
        });
        Ok(frontier.into_iter().map(|(p, _)| p).collect())
    }
}

impl TilingAlgorithm for FrontierTiling {
    fn generate(
        &self,
        disk: &mut Disk,
        params: &TilingParams,
    ) -> Result<TilingOutput, TilingError> {
        params.validate()?;

        let mut graph = self.seed_graph(disk, params)?;
        let generator = EdgeGenerator::new(self.cfg);
        let stitcher = EdgeStitcher::new(self.cfg);

        for layer in 0..params.layers as usize {
            let mut edge_indices = IndexSource::default();
            let mut polygon_indices = IndexSource::default();
            let frontier = self.ordered_frontier(disk, &graph)?;

            let mut new_edges = Vec::new();
            for (position, point) in frontier.iter().enumerate() {
                disk.set_label(*point, position.to_string())?;
                new_edges.extend(generator.generate_new_edges(
                    disk,
                    &mut graph,
                    *point,
                    params.adjacency,
                    layer + 1,
                    &mut edge_indices,
                )?);
            }

            stitcher.stitch_new_edges(
                disk,
                params.sides,
                &mut graph,
                &new_edges,
                layer + 1,
                &mut edge_indices,
                &mut polygon_indices,
            )?;

            for (i, id) in new_edges.iter().enumerate() {
                graph.set_edge_label(*id, i.to_string())?;
            }
            for point in frontier {
                graph.mark_visited(point)?;
            }
        }

        let mut edges = Vec::with_capacity(graph.edge_count());
        for (_, edge) in graph.edges() {
            disk.add_edge(edge.p0, edge.p1, edge.label.clone().unwrap_or_default())?;
            edges.push((edge.p0, edge.p1));
        }
        Ok(TilingOutput {
            points: disk.points().collect(),
            edges,
        })
    }
}
