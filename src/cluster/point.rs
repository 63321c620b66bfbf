//! Points, trajectories and clusters

/// Point represents a planar coordinate
///
/// The point is stored as [x, y] where:
/// - `[0]` is x
/// - `[1]` is y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub [f64; 2]);

/// PointList is a collection of Points
pub type PointList = Vec<Point>;

/// Trajectory is an ordered path of points
///
/// Order is kept for output, while distance computations treat the
/// trajectory as a point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: PointList,
}

/// TrajectoryList is a collection of Trajectories, indexed by trajectory id
pub type TrajectoryList = Vec<Trajectory>;

/// Cluster represents a result of DBScan clustering work
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Cluster ID
    pub c: usize,
    /// Indices of trajectories belonging to this cluster
    pub trajectories: Vec<usize>,
}

impl Point {
    /// Returns Euclidean distance between two points
    ///
    /// `hypot` keeps the result finite where `dx * dx + dy * dy` would
    /// overflow.
    pub fn dist(&self, b: &Point) -> f64 {
        let dx = self.0[0] - b.0[0];
        let dy = self.0[1] - b.0[1];
        dx.hypot(dy)
    }
}

impl Trajectory {
    pub fn new(points: PointList) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `(min, max)` corners of the bounding box, or `None` for an
    /// empty trajectory
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        let mut min = first;
        let mut max = first;

        for pt in &self.points[1..] {
            for j in 0..2 {
                min.0[j] = min.0[j].min(pt.0[j]);
                max.0[j] = max.0[j].max(pt.0[j]);
            }
        }

        Some((min, max))
    }
}

impl From<PointList> for Trajectory {
    fn from(points: PointList) -> Self {
        Self::new(points)
    }
}

impl Cluster {
    /// Calculates the bounding box over every point of every member trajectory
    ///
    /// Returns `(min, max)` where:
    /// - `min` is the minimum point (bottom-left)
    /// - `max` is the maximum point (top-right)
    ///
    /// Returns `None` if the cluster holds no points at all.
    pub fn bounds(&self, trajectories: &[Trajectory]) -> Option<(Point, Point)> {
        let mut result: Option<(Point, Point)> = None;

        for &i in &self.trajectories {
            let Some((t_min, t_max)) = trajectories[i].bounds() else {
                continue;
            };
            result = Some(match result {
                None => (t_min, t_max),
                Some((mut min, mut max)) => {
                    for j in 0..2 {
                        min.0[j] = min.0[j].min(t_min.0[j]);
                        max.0[j] = max.0[j].max(t_max.0[j]);
                    }
                    (min, max)
                }
            });
        }

        result
    }
}
