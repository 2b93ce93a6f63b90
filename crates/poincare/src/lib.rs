//! Hyperbolic tiling engine for the Poincaré disk model.
//!
//! The disk is driven through a single movable cursor frame backed by Möbius
//! transforms; points are baked into canonical coordinates once and read back
//! through the current view. Two tiling strategies are built on top: layered
//! frontier growth over an edge graph ([`tiling`]) and recursive reflection
//! along a spanning tree ([`spanning`]).
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.

pub mod disk;
pub mod mobius;
pub mod spanning;
pub mod tiling;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::disk::{Disk, DiskCfg, DiskError, PointId};
    pub use crate::mobius::MobiusTransform;
    pub use crate::spanning::MirrorTiling;
    pub use crate::tiling::{
        FrontierTiling, TilingAlgorithm, TilingError, TilingOutput, TilingParams,
    };
    pub use nalgebra::Vector2 as Vec2;
}
