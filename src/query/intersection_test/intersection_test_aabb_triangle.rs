use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use crate::shape::Triangle;

/// Tests if a triangle overlaps the interior of an AABB.
///
/// This is a separating-axis test on the 13 candidate axes of a box/triangle pair: the three
/// box face normals, the triangle normal, and the nine cross-products between box axes and
/// triangle edges. Projections are compared on open intervals: a triangle that only touches
/// the box boundary (a face lying on a box face, an edge running along a box edge) does not
/// overlap it.
pub fn intersection_test_aabb_triangle(aabb1: &Aabb, triangle2: &Triangle) -> bool {
    let half_extents = aabb1.half_extents();
    let center = aabb1.center();
    // Express the triangle relative to the box center.
    let local = Triangle::new(
        Point::from(triangle2.a - center),
        Point::from(triangle2.b - center),
        Point::from(triangle2.c - center),
    );

    box_axes_separation(&half_extents, &local) < 0.0
        && normal_separation(&half_extents, &local) < 0.0
        && edge_axes_separation(&half_extents, &local) < 0.0
}

/// The gap between the projections of a centered box and a triangle on `axis`.
///
/// Negative when the open projections overlap.
fn gap_along(half_extents: &Vector<Real>, triangle: &Triangle, axis: &Vector<Real>) -> Real {
    let radius = half_extents.dot(&axis.abs());
    let pa = axis.dot(&triangle.a.coords);
    let pb = axis.dot(&triangle.b.coords);
    let pc = axis.dot(&triangle.c.coords);
    let min = pa.min(pb).min(pc);
    let max = pa.max(pb).max(pc);

    (min - radius).max(-max - radius)
}

fn box_axes_separation(half_extents: &Vector<Real>, triangle: &Triangle) -> Real {
    (0..DIM)
        .map(|i| gap_along(half_extents, triangle, &Vector::ith(i, 1.0)))
        .fold(-Real::MAX, Real::max)
}

/// A degenerate triangle has no normal and never separates along it.
fn normal_separation(half_extents: &Vector<Real>, triangle: &Triangle) -> Real {
    let normal = triangle.scaled_normal();
    if normal.norm_squared() == 0.0 {
        return -Real::MAX;
    }

    let radius = half_extents.dot(&normal.abs());
    normal.dot(&triangle.a.coords).abs() - radius
}

fn edge_axes_separation(half_extents: &Vector<Real>, triangle: &Triangle) -> Real {
    let edges = [
        triangle.b - triangle.a,
        triangle.c - triangle.b,
        triangle.a - triangle.c,
    ];

    let mut separation = -Real::MAX;
    for edge in &edges {
        for i in 0..DIM {
            let axis = Vector::<Real>::ith(i, 1.0).cross(edge);
            // Edge parallel to the box axis.
            if axis.norm_squared() == 0.0 {
                continue;
            }
            separation = separation.max(gap_along(half_extents, triangle, &axis));
        }
    }

    separation
}
