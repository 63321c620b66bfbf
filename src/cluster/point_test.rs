#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_point_distance() {
        let a = Point([0.0, 0.0]);
        let b = Point([3.0, 4.0]);
        assert_eq!(a.dist(&b), 5.0);
        assert_eq!(b.dist(&a), 5.0);
        assert_eq!(a.dist(&a), 0.0);

        let far = Point([1e200, 0.0]);
        assert_eq!(a.dist(&far), 1e200);
    }

    #[test]
    fn test_trajectory_bounds() {
        let t = Trajectory::new(vec![
            Point([1.0, 5.0]),
            Point([-2.0, 3.0]),
            Point([4.0, -1.0]),
        ]);
        let (min, max) = t.bounds().expect("non-empty trajectory has bounds");
        assert_eq!(min, Point([-2.0, -1.0]));
        assert_eq!(max, Point([4.0, 5.0]));

        assert!(Trajectory::new(Vec::new()).bounds().is_none());
    }

    #[test]
    fn test_cluster_bounds() {
        let trajectories: TrajectoryList = vec![
            Trajectory::new(vec![Point([0.0, 0.0]), Point([1.0, 1.0])]),
            Trajectory::new(vec![Point([100.0, 100.0])]),
            Trajectory::from(vec![Point([-1.0, 0.5]), Point([0.5, 2.0])]),
        ];
        let c1 = Cluster {
            c: 0,
            trajectories: vec![0, 2],
        };

        let (min, max) = c1.bounds(&trajectories).expect("cluster has points");
        assert_eq!(min, Point([-1.0, 0.0]));
        assert_eq!(max, Point([1.0, 2.0]));

        let empty = Cluster {
            c: 1,
            trajectories: Vec::new(),
        };
        assert!(empty.bounds(&trajectories).is_none());
    }
}
