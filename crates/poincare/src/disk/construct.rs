//! Geometric construction primitives built on the cursor frame.
//!
//! Each primitive moves the cursor into a convenient local frame, bakes a new
//! point, and restores the cursor through the guard. The alignment checks are
//! hard invariants of the constructions, not soft heuristics: a failure means
//! the local frame was never established and the result would be garbage.

use nalgebra::Vector2;

use super::{Disk, DiskCfg, DiskError, PointId};

/// Map an angle to `[0, 2π)` by wrapping negatives.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    if angle < 0.0 {
        std::f64::consts::TAU + angle
    } else {
        angle
    }
}

/// Cross-product-sum orientation test: true when the points wind clockwise.
pub fn clockwise(points: &[Vector2<f64>]) -> bool {
    let mut sum = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        sum += (points[j].x - points[i].x) * (points[j].y + points[i].y);
    }
    sum > 0.0
}

/// Reflect `p` across the hyperbolic geodesic through `p0` and `p1`.
///
/// Translate so `p0` reads as the origin, rotate so `p1` reads on the real
/// axis; the geodesic is now the real axis, so negating the y-component of
/// `p`'s reading is exactly the hyperbolic reflection.
pub fn create_mirrored_point(
    disk: &mut Disk,
    p: PointId,
    p0: PointId,
    p1: PointId,
    cfg: DiskCfg,
) -> Result<PointId, DiskError> {
    let mut disk = disk.saved();

    let p0e = disk.position(p0)?;
    disk.translate(-p0e.x, -p0e.y);
    if disk.position(p0)?.norm() > cfg.eps_align {
        return Err(DiskError::Alignment {
            point: p0,
            reason: "p0 did not land on the disk center",
        });
    }

    let p1e = disk.position(p1)?;
    let angle = p1e.y.atan2(p1e.x);
    disk.rotate(-angle);

    if disk.position(p0)?.norm() > cfg.eps_align {
        return Err(DiskError::Alignment {
            point: p0,
            reason: "p0 drifted off the disk center after rotation",
        });
    }
    if disk.position(p1)?.y.abs() > cfg.eps_align {
        return Err(DiskError::Alignment {
            point: p1,
            reason: "p1 did not land on the real axis",
        });
    }

    let pe = disk.position(p)?;
    disk.translate(-pe.x, pe.y);

    disk.add_point()
}

/// Rotate the *reading* of `point` by `angle` about `origin` and bake a point
/// there. Valid because Euclidean and hyperbolic rotations coincide at the
/// disk center.
pub fn create_rotated_point(
    disk: &mut Disk,
    point: PointId,
    origin: PointId,
    angle: f64,
) -> Result<PointId, DiskError> {
    let mut disk = disk.saved();

    let origin_xy = disk.position(origin)?;
    disk.translate(-origin_xy.x, -origin_xy.y);

    let p = disk.position(point)?;
    let rotated = Vector2::new(
        angle.cos() * p.x - angle.sin() * p.y,
        angle.sin() * p.x + angle.cos() * p.y,
    );
    // Center the view on the rotated reading, then bake.
    disk.translate(-rotated.x, -rotated.y);

    disk.add_point()
}

/// Bake a point at the Euclidean mean of the given readings. Available for
/// inter-layer linking; not used by the main generation paths.
pub fn create_average_point(disk: &mut Disk, points: &[PointId]) -> Result<PointId, DiskError> {
    let mut sum = Vector2::new(0.0, 0.0);
    for point in points {
        sum += disk.position(*point)?;
    }
    let mean = sum / points.len().max(1) as f64;

    let mut disk = disk.saved();
    disk.translate(-mean.x, -mean.y);
    disk.add_point()
}
