use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::TriMesh;
use alloc::vec::Vec;

impl Aabb {
    /// Discretize the boundary of this AABB as a triangle-mesh.
    pub fn to_trimesh(&self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let center = self.center();
        let extents = self.extents();
        let (mut vtx, idx) = unit_cuboid();
        vtx.iter_mut()
            .for_each(|p| *p = center + p.coords.component_mul(&extents));
        (vtx, idx)
    }
}

/// Builds the closed 12-triangle mesh of the boundary of `aabb`.
///
/// If `inward` is `true`, every triangle is flipped so the normals point toward the box
/// center. Appending an inward box inside an outward one gives a closed hollow shell.
pub fn aabb_to_trimesh(aabb: &Aabb, inward: bool) -> TriMesh {
    let (vtx, mut idx) = aabb.to_trimesh();

    if inward {
        idx.iter_mut().for_each(|tri| tri.swap(0, 1));
    }

    TriMesh::new_unchecked(vtx, idx)
}

/**
 * Generates a cuboid shape with a split index buffer.
 *
 * The cuboid is centered at the origin, and has its half extents set to 0.5.
 */
fn unit_cuboid() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let mut coords = Vec::with_capacity(8);
    let mut faces = Vec::with_capacity(12);

    coords.push(Point::new(-0.5, -0.5, 0.5));
    coords.push(Point::new(-0.5, -0.5, -0.5));
    coords.push(Point::new(0.5, -0.5, -0.5));
    coords.push(Point::new(0.5, -0.5, 0.5));
    coords.push(Point::new(-0.5, 0.5, 0.5));
    coords.push(Point::new(-0.5, 0.5, -0.5));
    coords.push(Point::new(0.5, 0.5, -0.5));
    coords.push(Point::new(0.5, 0.5, 0.5));

    faces.push([4, 5, 0]);
    faces.push([5, 1, 0]);

    faces.push([5, 6, 1]);
    faces.push([6, 2, 1]);

    faces.push([6, 7, 3]);
    faces.push([2, 6, 3]);

    faces.push([7, 4, 0]);
    faces.push([3, 7, 0]);

    faces.push([0, 1, 2]);
    faces.push([3, 0, 2]);

    faces.push([7, 6, 5]);
    faces.push([4, 7, 5]);

    (coords, faces)
}
