use super::particle_error::check_spacing;
use super::ParticleError;
use crate::math::{Point, Real};
use alloc::vec::Vec;
use core::f64::consts::TAU;

/// The number of points sampled on a circle of the given radius.
fn ring_len(radius: Real, spacing: Real) -> usize {
    (TAU as Real * radius / spacing).floor().max(0.0) as usize
}

/// The number of layers sampled along an extent, both ends included.
fn layers(extent: Real, spacing: Real) -> usize {
    (extent / spacing + 1.0e-4).floor().max(0.0) as usize + 1
}

fn push_ring(out: &mut Vec<Point<Real>>, radius: Real, y: Real, spacing: Real) {
    let len = ring_len(radius, spacing);
    out.extend((0..len).map(|i| {
        let angle = TAU as Real * i as Real / len as Real;
        Point::new(radius * angle.cos(), y, radius * angle.sin())
    }));
}

/// The walls of a vertical cylinder of axis `+Y`, from `y = 0` to `y = height`.
///
/// Rings are placed every `spacing` along the axis, each with `floor(2π * radius / spacing)`
/// evenly distributed points.
pub fn cup_walls(
    radius: Real,
    height: Real,
    spacing: Real,
) -> Result<Vec<Point<Real>>, ParticleError> {
    let spacing = check_spacing(spacing)?;
    let mut points = Vec::new();

    for layer in 0..layers(height, spacing) {
        push_ring(&mut points, radius, layer as Real * spacing, spacing);
    }

    Ok(points)
}

/// A disk of the given radius in the plane `y = 0`, centered at the origin.
///
/// Points are placed on a square lattice of step `spacing` starting at `(-radius, -radius)`,
/// and only those inside of the disk are kept.
pub fn cup_floor(radius: Real, spacing: Real) -> Result<Vec<Point<Real>>, ParticleError> {
    let spacing = check_spacing(spacing)?;
    let n = layers(2.0 * radius, spacing);
    let mut points = Vec::new();

    for i in 0..n {
        let x = -radius + i as Real * spacing;
        for k in 0..n {
            let z = -radius + k as Real * spacing;
            if x * x + z * z <= radius * radius {
                points.push(Point::new(x, 0.0, z));
            }
        }
    }

    Ok(points)
}

/// A truncated cone of axis `+Y`, with radius `bottom_radius` at `y = 0` and `top_radius` at
/// `y = height`.
///
/// Rings are placed every `spacing` along the axis, with a linearly interpolated radius.
pub fn funnel(
    top_radius: Real,
    bottom_radius: Real,
    height: Real,
    spacing: Real,
) -> Result<Vec<Point<Real>>, ParticleError> {
    let spacing = check_spacing(spacing)?;
    let num_layers = layers(height, spacing);
    let mut points = Vec::new();

    for layer in 0..num_layers {
        let y = layer as Real * spacing;
        let t = if height > 0.0 { (y / height).min(1.0) } else { 0.0 };
        let radius = bottom_radius + (top_radius - bottom_radius) * t;
        push_ring(&mut points, radius, y, spacing);
    }

    Ok(points)
}
