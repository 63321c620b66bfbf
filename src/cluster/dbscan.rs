use super::matrix::DistanceMatrix;
use super::point::Cluster;
use crate::error::{Result, TrajectoryError};
use bitvec::prelude::*;
use log::trace;

/// Label of trajectories that belong to no cluster
pub const NOISE: i32 = -1;

// DBSCAN algorithm pseudocode (from <http://en.wikipedia.org/wiki/DBSCAN>):
//
// DBSCAN(D, eps, MinPts)
//    C = 0
//    for each unvisited point P in dataset D
//       mark P as visited
//       NeighborPts = regionQuery(P, eps)
//       if sizeof(NeighborPts) < MinPts
//          mark P as NOISE
//       else
//          C = next cluster
//          expandCluster(P, NeighborPts, C, eps, MinPts)
//
// expandCluster(P, NeighborPts, C, eps, MinPts)
//    add P to cluster C
//    for each point P' in NeighborPts
//       if P' is not visited
//          mark P' as visited
//          NeighborPts' = regionQuery(P', eps)
//          if sizeof(NeighborPts') >= MinPts
//             NeighborPts = NeighborPts joined with NeighborPts'
//       if P' is not yet member of any cluster
//          add P' to cluster C
//
// regionQuery(P, eps)
//    return all points within P's eps-neighborhood (including P)
//
// Here a "point" is a trajectory and distances come from the precomputed
// matrix. NOISE is only provisional: a trajectory marked as noise may later
// be reached by a core trajectory and join its cluster as a border member.

/// Checks DBSCAN parameters
///
/// `eps` must be a finite number above zero and `min_samples` at least 1.
pub fn validate_parameters(eps: f64, min_samples: usize) -> Result<()> {
    if !eps.is_finite() || eps <= 0.0 {
        return Err(TrajectoryError::InvalidParameters(format!(
            "eps must be a positive finite number, got {eps}"
        )));
    }
    if min_samples < 1 {
        return Err(TrajectoryError::InvalidParameters(
            "min_samples must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Clusters trajectories using DBSCAN over a precomputed distance matrix
///
/// # Arguments
///
/// * `matrix` - Pairwise trajectory distances
/// * `eps` - Maximum distance for two trajectories to be neighbours
/// * `min_samples` - Minimum neighbourhood size, the trajectory itself included,
///   for a trajectory to be core
///
/// # Returns
///
/// A tuple `(clusters, noise)` where:
/// - `clusters` is a vector of found clusters, ids in discovery order
/// - `noise` is a vector of trajectory indices that are in no cluster
pub fn db_scan(
    matrix: &DistanceMatrix,
    eps: f64,
    min_samples: usize,
) -> Result<(Vec<Cluster>, Vec<usize>)> {
    validate_parameters(eps, min_samples)?;

    let n = matrix.len();
    let mut visited = bitvec![0; n];
    let mut members = bitvec![0; n];
    let mut clusters = Vec::new();
    let mut c = 0;

    let mut neighbor_unique = bitvec![0; n];

    for i in 0..n {
        if visited[i] {
            continue;
        }
        visited.set(i, true);

        let neighbor_pts = region_query(matrix, i, eps);
        if neighbor_pts.len() < min_samples {
            continue;
        }

        let mut cluster = Cluster {
            c,
            trajectories: vec![i],
        };
        members.set(i, true);
        c += 1;

        // expandCluster goes here inline
        neighbor_unique.fill(false);
        for &j in &neighbor_pts {
            neighbor_unique.set(j, true);
        }

        let mut neighbor_pts = neighbor_pts;
        let mut j = 0;
        // The frontier grows while it is walked, breadth-first
        while j < neighbor_pts.len() {
            let k = neighbor_pts[j];
            if !visited[k] {
                visited.set(k, true);
                let more_neighbors = region_query(matrix, k, eps);
                if more_neighbors.len() >= min_samples {
                    for &p in &more_neighbors {
                        if !neighbor_unique[p] {
                            neighbor_pts.push(p);
                            neighbor_unique.set(p, true);
                        }
                    }
                }
            }

            if !members[k] {
                cluster.trajectories.push(k);
                members.set(k, true);
            }
            j += 1;
        }

        trace!(
            "Cluster {} seeded by trajectory {} with {} members",
            cluster.c,
            i,
            cluster.trajectories.len()
        );
        clusters.push(cluster);
    }

    let noise = members.iter_zeros().collect();

    Ok((clusters, noise))
}

/// Finds every trajectory within `eps` of trajectory `i`, `i` included
///
/// Plain O(N) scan of one matrix row.
pub fn region_query(matrix: &DistanceMatrix, i: usize, eps: f64) -> Vec<usize> {
    matrix
        .row(i)
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d <= eps)
        .map(|(j, _)| j)
        .collect()
}

/// Creates a labels array from clusters
///
/// `labels[i]` = cluster ID for trajectory i, or [`NOISE`]
pub fn build_labels(clusters: &[Cluster], num_trajectories: usize) -> Vec<i32> {
    let mut labels = vec![NOISE; num_trajectories];

    for cluster in clusters {
        for &idx in &cluster.trajectories {
            labels[idx] = cluster.c as i32;
        }
    }

    labels
}

/// Runs DBSCAN and returns one label per trajectory
#[allow(dead_code)] // Part of public API, may be used by external code
pub fn cluster(matrix: &DistanceMatrix, eps: f64, min_samples: usize) -> Result<Vec<i32>> {
    let (clusters, _) = db_scan(matrix, eps, min_samples)?;
    Ok(build_labels(&clusters, matrix.len()))
}
