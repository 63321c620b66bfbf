use super::kdtree::new_kd_tree;
use super::point::{Point, Trajectory};
use crate::error::{Result, TrajectoryError};

/// Trajectories with at least this many points are searched through a K-D
/// tree instead of a linear scan
const KD_TREE_MIN_POINTS: usize = 64;

/// Calculates the directed (one-sided) Hausdorff distance from `a` to `b`
///
/// For every point of `a` the nearest point of `b` is found; the result is
/// the largest of those nearest distances. Both trajectories must have at
/// least one point.
pub fn directed_distance(a: &Trajectory, b: &Trajectory) -> Result<f64> {
    check_points(a, b)?;

    let d = if b.len() >= KD_TREE_MIN_POINTS {
        directed_indexed(a.points(), b.points())
    } else {
        directed_scan(a.points(), b.points())
    };

    Ok(d)
}

/// Calculates the symmetric Hausdorff distance between two trajectories
///
/// `max(directed(a, b), directed(b, a))`
pub fn symmetric_distance(a: &Trajectory, b: &Trajectory) -> Result<f64> {
    let ab = directed_distance(a, b)?;
    let ba = directed_distance(b, a)?;
    Ok(ab.max(ba))
}

fn check_points(a: &Trajectory, b: &Trajectory) -> Result<()> {
    if a.is_empty() || b.is_empty() {
        return Err(TrajectoryError::InsufficientPoints {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Directed distance by full cross scan
///
/// The inner scan stops as soon as the current point of `a` is closer to
/// some point of `b` than the running maximum: it can no longer raise it.
pub(crate) fn directed_scan(a: &[Point], b: &[Point]) -> f64 {
    let mut cmax = 0.0_f64;

    for pa in a {
        let mut cmin = f64::INFINITY;
        for pb in b {
            let d = pa.dist(pb);
            if d < cmax {
                cmin = d;
                break;
            }
            cmin = cmin.min(d);
        }
        if cmin > cmax {
            cmax = cmin;
        }
    }

    cmax
}

/// Directed distance with nearest neighbours from a K-D tree over `b`
pub(crate) fn directed_indexed(a: &[Point], b: &[Point]) -> f64 {
    let tree = new_kd_tree(b);

    a.iter()
        .filter_map(|pa| tree.nearest(pa))
        .map(|(_, d)| d)
        .fold(0.0_f64, f64::max)
}
