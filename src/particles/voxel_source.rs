use super::box_sampling::box_samples;
use super::particle_error::check_spacing;
use super::ParticleError;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Transform};
use alloc::vec::Vec;

/// Particles on a regular sub-grid of each voxel of a list.
///
/// Every voxel is sampled independently with [`Self::spacing`] between points. A voxel smaller
/// than the spacing along any axis contributes no particle at all.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelSource {
    voxels: Vec<Aabb>,
    local_to_world: Option<Transform>,
    spacing: Real,
    positions: Vec<Point<Real>>,
}

impl VoxelSource {
    /// A source sampling `voxels`, with particles transformed by `local_to_world` if any.
    pub fn new(
        voxels: Vec<Aabb>,
        local_to_world: Option<Transform>,
        spacing: Real,
    ) -> Result<Self, ParticleError> {
        let spacing = check_spacing(spacing)?;

        if voxels.is_empty() {
            return Err(ParticleError::EmptyVoxelList);
        }

        Ok(Self {
            voxels,
            local_to_world,
            spacing,
            positions: Vec::new(),
        })
    }

    /// The sampled voxels.
    pub fn voxels(&self) -> &[Aabb] {
        &self.voxels
    }

    /// The transform applied to the generated particles.
    pub fn local_to_world(&self) -> Option<&Transform> {
        self.local_to_world.as_ref()
    }

    /// The distance between two adjacent particles.
    pub fn spacing(&self) -> Real {
        self.spacing
    }

    /// The particles generated by the last call to [`Self::create_particles`].
    pub fn positions(&self) -> &[Point<Real>] {
        &self.positions
    }

    /// Regenerates the particles.
    pub fn create_particles(&mut self) {
        let spacing = self.spacing;
        let local_to_world = self.local_to_world.as_ref();
        self.positions.clear();
        self.positions.extend(
            self.voxels
                .iter()
                .flat_map(|voxel| box_samples(voxel, spacing))
                .map(|pt| local_to_world.map_or(pt, |m| m.transform_point(&pt))),
        );

        log::debug!(
            "voxel particle source: {} particles from {} voxels.",
            self.positions.len(),
            self.voxels.len()
        );
    }
}
