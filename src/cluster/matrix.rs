use super::hausdorff::symmetric_distance;
use super::point::Trajectory;
use crate::error::{Result, TrajectoryError};
use log::debug;
use rayon::prelude::*;

/// Square symmetric matrix of pairwise trajectory distances
///
/// Stored row-major. Entry `(i, j)` is the symmetric Hausdorff distance
/// between trajectories `i` and `j`; the diagonal is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Builds a matrix from precomputed rows
    ///
    /// Panics unless the rows form a square, symmetric, non-negative matrix
    /// with a zero diagonal.
    #[cfg(test)]
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let mut matrix = Self::zeros(n);

        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), n, "row {i} has {} entries, expected {n}", row.len());
            matrix.data[i * n..(i + 1) * n].copy_from_slice(row);
        }

        assert!(
            matrix.data.iter().all(|d| d.is_finite() && *d >= 0.0),
            "distances must be finite and non-negative"
        );
        assert!(
            (0..n).all(|i| matrix.get(i, i) == 0.0),
            "diagonal must be zero"
        );
        assert!(matrix.is_symmetric(), "matrix must be symmetric");

        matrix
    }

    /// Number of trajectories (rows)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, an empty matrix has no rows anyway
        self.data.chunks(self.n.max(1))
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    fn set_pair(&mut self, i: usize, j: usize, d: f64) {
        self.data[i * self.n + j] = d;
        self.data[j * self.n + i] = d;
    }
}

/// Builds the distance matrix of all trajectories on the current thread
///
/// Each unordered pair is computed once and mirrored; the diagonal is left at
/// zero. Fails when fewer than two trajectories are given or when any
/// trajectory has no points, in which case no matrix is produced.
pub fn build_matrix(trajectories: &[Trajectory]) -> Result<DistanceMatrix> {
    let pairs = upper_pairs(trajectories.len())?;
    debug!("Computing {} trajectory pairs sequentially", pairs.len());

    let distances = pairs
        .iter()
        .map(|&(i, j)| symmetric_distance(&trajectories[i], &trajectories[j]))
        .collect::<Result<Vec<f64>>>()?;

    Ok(fill(trajectories.len(), &pairs, &distances))
}

/// Same as [`build_matrix`], with pair distances computed on the rayon pool
///
/// Every pair writes only its own cell, so the result is identical to the
/// sequential build.
pub fn build_matrix_parallel(trajectories: &[Trajectory]) -> Result<DistanceMatrix> {
    let pairs = upper_pairs(trajectories.len())?;
    debug!(
        "Computing {} trajectory pairs on {} threads",
        pairs.len(),
        rayon::current_num_threads()
    );

    let distances = pairs
        .par_iter()
        .map(|&(i, j)| symmetric_distance(&trajectories[i], &trajectories[j]))
        .collect::<Result<Vec<f64>>>()?;

    Ok(fill(trajectories.len(), &pairs, &distances))
}

/// Returns every `(i, j)` with `i < j < n`
fn upper_pairs(n: usize) -> Result<Vec<(usize, usize)>> {
    if n < 2 {
        return Err(TrajectoryError::NotEnoughTrajectories { found: n });
    }

    Ok((0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect())
}

fn fill(n: usize, pairs: &[(usize, usize)], distances: &[f64]) -> DistanceMatrix {
    let mut matrix = DistanceMatrix::zeros(n);
    for (&(i, j), &d) in pairs.iter().zip(distances) {
        matrix.set_pair(i, j, d);
    }
    debug_assert!(matrix.is_symmetric());
    matrix
}
