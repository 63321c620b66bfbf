//! Package cluster groups trajectories with DBScan over Hausdorff distances
pub mod dbscan;
pub mod hausdorff;
pub mod kdtree;
pub mod matrix;
pub mod point;
pub mod store;

#[cfg(test)]
mod hausdorff_test;
#[cfg(test)]
mod point_test;

// Public API exports - allow unused imports as these are part of the public API
#[allow(unused_imports)]
pub use point::{Cluster, Point, PointList, Trajectory, TrajectoryList};
#[allow(unused_imports)]
pub use dbscan::{NOISE, build_labels, cluster, db_scan, region_query, validate_parameters};
#[allow(unused_imports)]
pub use hausdorff::{directed_distance, symmetric_distance};
#[allow(unused_imports)]
pub use matrix::{DistanceMatrix, build_matrix, build_matrix_parallel};
#[allow(unused_imports)]
pub use store::{RawTrajectory, load, parse_coordinates};
