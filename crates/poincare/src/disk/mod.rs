//! Point store and movable cursor frame ("Disk").
//!
//! Purpose
//! - Own the canonical point table and the single cursor transform that acts
//!   as a movable coordinate frame over the Poincaré disk.
//! - `add_point` captures "the point currently at the disk center, undone by
//!   the current view" as the canonical coordinate. To place a point at any
//!   on-screen location, callers move the cursor there first, add the point,
//!   and restore the cursor.
//!
//! Why this design
//! - The cursor is the one piece of shared mutable state in a construction
//!   pass. `Disk::saved` returns a guard that restores the saved transform on
//!   drop, so the save/restore contract around local constructions is
//!   enforced by the compiler instead of by convention.
//! - Canonical coordinates never change after creation; only the viewing
//!   transform changes how they are read back.

pub mod construct;

use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, DerefMut};

use nalgebra::Vector2;

use crate::mobius::{MobiusTransform, NonInvertibleTransform};

/// Opaque identifier for a point in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u32);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Tolerances for the geometric construction primitives.
///
/// `eps_align` is the single documented alignment tolerance used by every
/// alignment assertion (the original mixed `!= 0`, `1e-5`, and `1e-8`).
#[derive(Clone, Copy, Debug)]
pub struct DiskCfg {
    pub eps_align: f64,
}

impl Default for DiskCfg {
    fn default() -> Self {
        Self { eps_align: 1e-7 }
    }
}

/// Errors surfaced by the point store and construction primitives.
#[derive(Clone, Debug, PartialEq)]
pub enum DiskError {
    /// Lookup of a point id that was never created.
    UnknownPoint(PointId),
    /// The cursor transform could not be inverted while baking a point.
    NonInvertible(NonInvertibleTransform),
    /// A geometric alignment assertion failed during construction.
    Alignment { point: PointId, reason: &'static str },
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskError::UnknownPoint(id) => write!(f, "unknown point {id}"),
            DiskError::NonInvertible(err) => write!(f, "cursor is degenerate: {err}"),
            DiskError::Alignment { point, reason } => {
                write!(f, "alignment failed at {point}: {reason}")
            }
        }
    }
}

impl std::error::Error for DiskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiskError::NonInvertible(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NonInvertibleTransform> for DiskError {
    fn from(err: NonInvertibleTransform) -> Self {
        DiskError::NonInvertible(err)
    }
}

/// An edge registered for rendering, deduplicated by unordered endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEdge {
    pub p0: PointId,
    pub p1: PointId,
    pub label: String,
}

#[derive(Clone, Debug)]
struct PointRecord {
    canonical: Vector2<f64>,
    label: Option<String>,
}

/// The point store plus cursor transform.
#[derive(Clone, Debug, Default)]
pub struct Disk {
    cursor: MobiusTransform,
    points: Vec<PointRecord>,
    edges: Vec<RenderedEdge>,
    edge_keys: HashSet<(PointId, PointId)>,
}

impl Disk {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, id: PointId) -> Result<&PointRecord, DiskError> {
        self.points
            .get(id.0 as usize)
            .ok_or(DiskError::UnknownPoint(id))
    }

    /// Bake the point currently at the disk center into canonical space.
    pub fn add_point(&mut self) -> Result<PointId, DiskError> {
        let canonical = self
            .cursor
            .inverse()?
            .transform_point(Vector2::new(0.0, 0.0));
        let id = PointId(self.points.len() as u32);
        self.points.push(PointRecord {
            canonical,
            label: None,
        });
        Ok(id)
    }

    /// The point as seen under the current cursor transform.
    pub fn position(&self, id: PointId) -> Result<Vector2<f64>, DiskError> {
        Ok(self.cursor.transform_point(self.record(id)?.canonical))
    }

    /// Left-compose a hyperbolic translation onto the cursor.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.cursor = MobiusTransform::translation(dx, dy) * self.cursor;
    }

    /// Left-compose a rotation about the disk center onto the cursor.
    pub fn rotate(&mut self, angle: f64) {
        self.cursor = MobiusTransform::rotation(angle) * self.cursor;
    }

    /// Snapshot of the cursor transform.
    pub fn transform(&self) -> MobiusTransform {
        self.cursor
    }

    /// Replace the cursor transform wholesale. Degenerate transforms are
    /// accepted here and rejected only when inverted or composed.
    pub fn set_transform(&mut self, transform: MobiusTransform) {
        self.cursor = transform;
    }

    /// Scoped save/restore of the cursor: the guard derefs to the disk and
    /// writes the saved transform back on drop.
    pub fn saved(&mut self) -> CursorGuard<'_> {
        let saved = self.cursor;
        CursorGuard { disk: self, saved }
    }

    /// Angle of the point's current reading, `atan2(y, x)`.
    pub fn angle_to_point(&self, id: PointId) -> Result<f64, DiskError> {
        let p = self.position(id)?;
        Ok(p.y.atan2(p.x))
    }

    /// Translate by the negated current reading, bringing the point to the
    /// disk center.
    pub fn translate_to_point(&mut self, id: PointId) -> Result<(), DiskError> {
        let p = self.position(id)?;
        self.translate(-p.x, -p.y);
        Ok(())
    }

    pub fn set_label(&mut self, id: PointId, label: impl Into<String>) -> Result<(), DiskError> {
        self.record(id)?;
        self.points[id.0 as usize].label = Some(label.into());
        Ok(())
    }

    pub fn label(&self, id: PointId) -> Result<Option<&str>, DiskError> {
        Ok(self.record(id)?.label.as_deref())
    }

    /// Register a rendered edge. Duplicates (in either orientation) are
    /// silently skipped; returns whether the edge was newly added.
    pub fn add_edge(
        &mut self,
        p0: PointId,
        p1: PointId,
        label: impl Into<String>,
    ) -> Result<bool, DiskError> {
        self.record(p0)?;
        self.record(p1)?;
        let key = if p0 <= p1 { (p0, p1) } else { (p1, p0) };
        if !self.edge_keys.insert(key) {
            return Ok(false);
        }
        self.edges.push(RenderedEdge {
            p0,
            p1,
            label: label.into(),
        });
        Ok(true)
    }

    /// All point ids in creation order.
    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        (0..self.points.len() as u32).map(PointId)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Registered rendered edges in registration order.
    pub fn edges(&self) -> &[RenderedEdge] {
        &self.edges
    }
}

/// Guard returned by [`Disk::saved`]; restores the saved cursor on drop.
pub struct CursorGuard<'a> {
    disk: &'a mut Disk,
    saved: MobiusTransform,
}

impl Deref for CursorGuard<'_> {
    type Target = Disk;

    fn deref(&self) -> &Disk {
        self.disk
    }
}

impl DerefMut for CursorGuard<'_> {
    fn deref_mut(&mut self) -> &mut Disk {
        self.disk
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.disk.cursor = self.saved;
    }
}
