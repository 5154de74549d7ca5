pub use self::cavity_classifier::{classify_cavities, CavityClassification, CellClass};
pub use self::hollowing_error::HollowingError;

mod cavity_classifier;
mod hollowing_error;
