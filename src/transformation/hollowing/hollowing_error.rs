/// Errors raised by the cavity classification.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum HollowingError {
    /// The voxel grid does not contain any solid cell to start the classification from.
    #[error("the voxel grid does not contain any solid cell.")]
    NoSolidCell,
}
