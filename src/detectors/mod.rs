//! Current-state detectors
//!
//! - `duplicate_functions` - function names declared in more than one file
//! - `packages` - independent-package boundaries used to suppress expected reuse

mod duplicate_functions;
mod packages;

pub use duplicate_functions::{is_split_across_packages, DuplicateFunctionDetector};
pub use packages::{IndependentPackages, PackageClassifier};
