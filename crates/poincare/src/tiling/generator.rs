//! Per-frontier-point edge generation.
//!
//! A frontier point with 2 incident edges sits on a polygon corner and fans
//! out three new edges; one with 3 incident edges sits between two polygons
//! and gets the remaining two. All cursor motion happens under guards, so the
//! view is unchanged on return no matter which path ran.

use std::f64::consts::TAU;

use crate::disk::construct::{clockwise, normalize_angle};
use crate::disk::{Disk, DiskCfg, DiskError, PointId};

use super::graph::Graph;
use super::types::{Edge, EdgeId, IndexSource};
use super::TilingError;

/// Deterministic enumeration order for orderings of three neighbors.
const PERMS3: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

#[derive(Clone, Copy, Debug)]
pub struct EdgeGenerator {
    cfg: DiskCfg,
}

impl EdgeGenerator {
    pub fn new(cfg: DiskCfg) -> Self {
        Self { cfg }
    }

    /// Generate and register the new edges for one frontier point. Points
    /// with an incident count other than 2 or 3 produce nothing; that is the
    /// normal state of interior points, not an error.
    pub fn generate_new_edges(
        &self,
        disk: &mut Disk,
        graph: &mut Graph,
        point: PointId,
        adjacency: u32,
        layer: usize,
        indices: &mut IndexSource,
    ) -> Result<Vec<EdgeId>, TilingError> {
        let incident: Vec<Edge> = graph
            .edges_incident_to(point)?
            .iter()
            .map(|id| graph.edge(*id).cloned())
            .collect::<Result<_, _>>()?;

        let new_points = match incident.len() {
            2 => self.fan_from_two(disk, point, &incident, adjacency)?,
            3 => self.pair_from_three(disk, point, &incident, adjacency)?,
            _ => Vec::new(),
        };

        let mut result = Vec::with_capacity(new_points.len());
        for p in new_points {
            let edge = Edge::new(point, p, layer, indices.next_index())?;
            result.push(graph.add_edge(edge)?);
        }
        Ok(result)
    }

    /// Corner case: the point belongs to one polygon. Fan out three points
    /// at steps of the polygon angle, at the same spacing as the existing
    /// neighbors.
    fn fan_from_two(
        &self,
        disk: &mut Disk,
        point: PointId,
        incident: &[Edge],
        adjacency: u32,
    ) -> Result<Vec<PointId>, TilingError> {
        let mut disk = disk.saved();

        disk.translate_to_point(point)?;
        if disk.position(point)?.norm() > self.cfg.eps_align {
            return Err(DiskError::Alignment {
                point,
                reason: "frontier point did not land on the disk center",
            }
            .into());
        }

        let mut neighbors = [
            incident[0].oriented_away_from(point)?.p1,
            incident[1].oriented_away_from(point)?.p1,
        ];

        // Establish the clockwise ordering (n0, point, n1).
        let readings = [
            disk.position(neighbors[0])?,
            disk.position(point)?,
            disk.position(neighbors[1])?,
        ];
        if !clockwise(&readings) {
            neighbors.swap(0, 1);
        }

        let angle = normalize_angle(disk.angle_to_point(neighbors[0])?);
        disk.rotate(-angle);
        if disk.angle_to_point(neighbors[0])?.abs() > self.cfg.eps_align {
            return Err(DiskError::Alignment {
                point: neighbors[0],
                reason: "first neighbor did not land at angle zero",
            }
            .into());
        }

        let polygon_angle = TAU / adjacency as f64;
        let spacing = disk.position(neighbors[0])?.x.abs();

        disk.rotate(-4.0 * polygon_angle);

        let mut points = Vec::with_capacity(3);
        for i in 0..3 {
            let mut disk = disk.saved();
            disk.rotate(polygon_angle * i as f64);
            disk.translate(-spacing, 0.0);
            points.push(disk.add_point()?);
        }
        Ok(points)
    }

    /// Seam case: the point belongs to two polygons. Find the clockwise
    /// ordering of its three neighbors and place the remaining two points
    /// half a polygon angle to either side of the middle one.
    fn pair_from_three(
        &self,
        disk: &mut Disk,
        point: PointId,
        incident: &[Edge],
        adjacency: u32,
    ) -> Result<Vec<PointId>, TilingError> {
        let mut disk = disk.saved();

        disk.translate_to_point(point)?;
        if disk.position(point)?.norm() > self.cfg.eps_align {
            return Err(DiskError::Alignment {
                point,
                reason: "frontier point did not land on the disk center",
            }
            .into());
        }

        let neighbors = [
            incident[0].oriented_away_from(point)?.p1,
            incident[1].oriented_away_from(point)?.p1,
            incident[2].oriented_away_from(point)?.p1,
        ];

        let mut ordered = None;
        for perm in PERMS3 {
            let ids = [
                point,
                neighbors[perm[0]],
                neighbors[perm[1]],
                neighbors[perm[2]],
            ];
            let readings = [
                disk.position(ids[0])?,
                disk.position(ids[1])?,
                disk.position(ids[2])?,
                disk.position(ids[3])?,
            ];
            if clockwise(&readings) {
                ordered = Some(ids);
                break;
            }
        }
        let ordered = ordered.ok_or(TilingError::Disk(DiskError::Alignment {
            point,
            reason: "no clockwise ordering of incident points",
        }))?;

        // ordered[2] is the middle neighbor once the fan is clockwise.
        let angle = disk.angle_to_point(ordered[1])?;
        disk.rotate(-angle);
        let spacing = disk.position(ordered[2])?.norm();
        let separation_angle = TAU / adjacency as f64;

        let mut points = Vec::with_capacity(2);
        for sign in [-1.0, 1.0] {
            let mut disk = disk.saved();
            disk.rotate(sign * separation_angle / 2.0);
            disk.translate(spacing, 0.0);
            points.push(disk.add_point()?);
        }
        Ok(points)
    }
}
