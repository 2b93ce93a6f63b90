//! Frontier-based hyperbolic tiling over an edge graph.
//!
//! Purpose
//! - Grow a {p, q} tiling outward from a central seed polygon, one layer at
//!   a time: generate new edges per frontier point, stitch them into closed
//!   polygons, retire the frontier to visited, repeat.
//!
//! Why this design
//! - Edges live in an append-only arena and polygons reference them by
//!   handle with an orientation flag, so there are no back-pointers and the
//!   strict edge-contiguity invariant is checked once, at construction.
//! - Ordered sets and sequential ids make a run fully reproducible; the
//!   tests rely on that.

mod exposure;
mod generator;
mod graph;
mod grow;
mod stitcher;
mod types;

pub use exposure::{Exposure, ExposureParameterTable};
pub use generator::EdgeGenerator;
pub use graph::Graph;
pub use grow::{FrontierTiling, TilingAlgorithm, TilingOutput, TilingParams};
pub use stitcher::{complete_quad, EdgeStitcher};
pub use types::{
    Edge, EdgeArena, EdgeId, EdgeTransform, GraphError, IndexSource, OrientedEdge, Polygon,
    PolygonId, VertexTransform,
};

pub(crate) use grow::seed_points;

use std::fmt;

use crate::disk::DiskError;

/// Umbrella error for the tiling algorithms.
#[derive(Clone, Debug, PartialEq)]
pub enum TilingError {
    Disk(DiskError),
    Graph(GraphError),
    /// {p, q} does not describe a hyperbolic tiling, or the case is not
    /// covered by the implemented tables.
    UnsupportedTiling { p: u32, q: u32 },
    /// The stitching pass only closes quadrilaterals.
    UnsupportedPolygonSize { sides: u32 },
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TilingError::Disk(err) => write!(f, "disk operation failed: {err}"),
            TilingError::Graph(err) => write!(f, "graph operation failed: {err}"),
            TilingError::UnsupportedTiling { p, q } => {
                write!(f, "{{{p}, {q}}} is not a supported hyperbolic tiling")
            }
            TilingError::UnsupportedPolygonSize { sides } => {
                write!(f, "polygon completion supports 4 sides, got {sides}")
            }
        }
    }
}

impl std::error::Error for TilingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TilingError::Disk(err) => Some(err),
            TilingError::Graph(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DiskError> for TilingError {
    fn from(err: DiskError) -> Self {
        TilingError::Disk(err)
    }
}

impl From<GraphError> for TilingError {
    fn from(err: GraphError) -> Self {
        TilingError::Graph(err)
    }
}

#[cfg(test)]
mod tests;
