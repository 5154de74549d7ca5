use super::{ContainerizerError, ContainerizerParameters};
use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::particles::VoxelSource;
use crate::shape::TriMesh;
use crate::transformation::hollowing::{self, CavityClassification};
use crate::transformation::voxelization::{GridDescriptor, VoxelGrid, VoxelizationError, Voxelizer};
use alloc::vec::Vec;

#[derive(Clone, Debug)]
struct ContainerVoxels {
    grid: VoxelGrid,
    classification: CavityClassification,
    exterior: Vec<Aabb>,
    interior: Vec<Aabb>,
}

/// Converts a closed mesh into the voxels lining its walls and the voxels it encloses.
///
/// Building voxelizes the mesh, pads the grid with one empty cell on every face, and
/// classifies it with [`classify_cavities`](hollowing::classify_cavities). Hull cells become
/// the exterior voxels (the container walls, where boundary particles are seeded) and cavity
/// cells become the interior voxels (where fluid particles are seeded).
///
/// Voxels are expressed in the local space of the mesh. The `*_world` accessors apply the
/// `local_to_world` transform of the parameters.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use vessel3d::bounding_volume::Aabb;
/// use vessel3d::container::{ContainerizerParameters, FluidContainerizer};
/// use vessel3d::transformation::aabb_to_trimesh;
/// use nalgebra::Point3;
///
/// // A hollow box: outer walls facing out, inner walls facing in.
/// let mut mesh = aabb_to_trimesh(&Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)), false);
/// mesh.append(&aabb_to_trimesh(&Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5)), true));
///
/// let params = ContainerizerParameters { cell_half_size: 0.0625, ..Default::default() };
/// let mut container = FluidContainerizer::new(mesh, params);
/// assert!(!container.is_ready());
/// container.build().unwrap();
/// assert!(container.is_ready());
/// assert!(!container.interior_voxels().unwrap().is_empty());
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct FluidContainerizer {
    mesh: TriMesh,
    params: ContainerizerParameters,
    voxels: Option<ContainerVoxels>,
}

impl FluidContainerizer {
    /// A containerizer for `mesh`. Nothing is computed until [`Self::build`].
    pub fn new(mesh: TriMesh, params: ContainerizerParameters) -> Self {
        Self {
            mesh,
            params,
            voxels: None,
        }
    }

    /// The container mesh.
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// The containerizer parameters.
    pub fn parameters(&self) -> &ContainerizerParameters {
        &self.params
    }

    /// The grid the mesh is voxelized on, before padding.
    pub fn grid_descriptor(&self) -> Result<GridDescriptor, VoxelizationError> {
        match self.params.resolution {
            Some(resolution) => {
                let bounds = self.mesh.local_aabb().scaled_wrt_center(&self.params.scale);
                Ok(GridDescriptor::with_resolution(bounds, resolution))
            }
            None => GridDescriptor::from_mesh(
                &self.mesh,
                &self.params.scale,
                self.params.cell_half_size,
            ),
        }
    }

    /// Builds the voxels with the backend selected by the parameters.
    pub fn build(&mut self) -> Result<(), ContainerizerError> {
        let mut voxelizer = self.params.backend.into_voxelizer();
        self.build_with(voxelizer.as_mut())
    }

    /// Builds the voxels with the given voxelizer.
    ///
    /// Does nothing if the container is already ready. Fails if the classification yields no
    /// exterior or no interior voxel: the mesh is then not a valid closed container at this
    /// resolution.
    pub fn build_with(&mut self, voxelizer: &mut dyn Voxelizer) -> Result<(), ContainerizerError> {
        if self.voxels.is_some() {
            log::debug!("the container is already built.");
            return Ok(());
        }

        let desc = self.grid_descriptor()?;
        let grid = voxelizer.voxelize(&self.mesh, &desc)?.padded(1);
        let classification = hollowing::classify_cavities(&grid)?;

        let to_boxes = |cells: &[[u32; 3]]| -> Vec<Aabb> {
            cells.iter().map(|ijk| grid.cell_aabb(*ijk)).collect()
        };
        let exterior = to_boxes(classification.hull_cells());
        let interior = to_boxes(classification.cavity_cells());

        if exterior.is_empty() {
            return Err(ContainerizerError::NoExteriorVoxels);
        }

        if interior.is_empty() {
            return Err(ContainerizerError::NoInteriorVoxels);
        }

        log::debug!(
            "container built: {} exterior and {} interior voxels.",
            exterior.len(),
            interior.len()
        );

        self.voxels = Some(ContainerVoxels {
            grid,
            classification,
            exterior,
            interior,
        });

        Ok(())
    }

    /// Were the voxels built successfully?
    ///
    /// Once `true`, this never becomes `false` again.
    pub fn is_ready(&self) -> bool {
        self.voxels.is_some()
    }

    fn built(&self) -> Result<&ContainerVoxels, ContainerizerError> {
        self.voxels.as_ref().ok_or(ContainerizerError::NotReady)
    }

    /// The padded voxel grid.
    pub fn grid(&self) -> Result<&VoxelGrid, ContainerizerError> {
        Ok(&self.built()?.grid)
    }

    /// The classification of the padded voxel grid.
    pub fn classification(&self) -> Result<&CavityClassification, ContainerizerError> {
        Ok(&self.built()?.classification)
    }

    /// The boxes of the hull cells, in the local space of the mesh.
    pub fn exterior_voxels(&self) -> Result<&[Aabb], ContainerizerError> {
        Ok(&self.built()?.exterior)
    }

    /// The boxes of the cavity cells, in the local space of the mesh.
    pub fn interior_voxels(&self) -> Result<&[Aabb], ContainerizerError> {
        Ok(&self.built()?.interior)
    }

    /// The boxes of the hull cells, in world space.
    pub fn exterior_voxels_world(&self) -> Result<Vec<Aabb>, ContainerizerError> {
        Ok(self.to_world(self.exterior_voxels()?))
    }

    /// The boxes of the cavity cells, in world space.
    pub fn interior_voxels_world(&self) -> Result<Vec<Aabb>, ContainerizerError> {
        Ok(self.to_world(self.interior_voxels()?))
    }

    fn to_world(&self, voxels: &[Aabb]) -> Vec<Aabb> {
        match &self.params.local_to_world {
            Some(m) => voxels.iter().map(|aabb| aabb.transform_by(m)).collect(),
            None => voxels.to_vec(),
        }
    }

    /// A particle source filling the exterior voxels, in world space.
    pub fn boundary_particles(&self, spacing: Real) -> Result<VoxelSource, ContainerizerError> {
        let voxels = self.exterior_voxels()?.to_vec();
        Ok(VoxelSource::new(voxels, self.params.local_to_world, spacing)?)
    }

    /// A particle source filling the interior voxels, in world space.
    pub fn fluid_particles(&self, spacing: Real) -> Result<VoxelSource, ContainerizerError> {
        let voxels = self.interior_voxels()?.to_vec();
        Ok(VoxelSource::new(voxels, self.params.local_to_world, spacing)?)
    }
}
