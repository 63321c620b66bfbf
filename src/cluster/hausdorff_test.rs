#[cfg(test)]
mod tests {
    use crate::cluster::hausdorff::{directed_indexed, directed_scan};
    use crate::cluster::kdtree::new_kd_tree;
    use crate::cluster::store::{RawTrajectory, load};
    use crate::cluster::{Point, Trajectory, build_matrix, directed_distance, symmetric_distance};
    use crate::error::TrajectoryError;
    use quickcheck::{TestResult, quickcheck};

    fn trajectory(coords: &[(f64, f64)]) -> Trajectory {
        coords.iter().map(|&(x, y)| Point([x, y])).collect::<Vec<_>>().into()
    }

    fn small_ints(coords: &[(i16, i16)]) -> Vec<Point> {
        coords
            .iter()
            .map(|&(x, y)| Point([x as f64, y as f64]))
            .collect()
    }

    #[test]
    fn test_single_point_against_segment() {
        let a = trajectory(&[(0.0, 0.0)]);
        let b = trajectory(&[(0.0, 0.0), (3.0, 4.0)]);

        assert_eq!(directed_distance(&a, &b).unwrap(), 0.0);
        assert_eq!(directed_distance(&b, &a).unwrap(), 5.0);
        assert_eq!(symmetric_distance(&a, &b).unwrap(), 5.0);
        assert_eq!(symmetric_distance(&b, &a).unwrap(), 5.0);
    }

    #[test]
    fn test_parallel_paths() {
        let a = trajectory(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let b = trajectory(&[(0.0, 2.0), (1.0, 2.0), (2.0, 2.0), (3.0, 2.0)]);

        assert_eq!(directed_distance(&a, &b).unwrap(), 2.0);
        assert_eq!(symmetric_distance(&a, &b).unwrap(), 2.0);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = trajectory(&[(0.0, 0.0), (5.0, 1.0), (9.0, -3.0)]);
        let reversed = trajectory(&[(9.0, -3.0), (5.0, 1.0), (0.0, 0.0)]);
        let b = trajectory(&[(1.0, 1.0), (6.0, 6.0)]);

        assert_eq!(symmetric_distance(&a, &reversed).unwrap(), 0.0);
        assert_eq!(
            symmetric_distance(&a, &b).unwrap(),
            symmetric_distance(&reversed, &b).unwrap()
        );
    }

    #[test]
    fn test_empty_trajectory_rejected() {
        let empty = Trajectory::new(Vec::new());
        let b = trajectory(&[(1.0, 1.0), (2.0, 2.0)]);

        assert_eq!(
            directed_distance(&empty, &b),
            Err(TrajectoryError::InsufficientPoints { left: 0, right: 2 })
        );
        assert_eq!(
            directed_distance(&b, &empty),
            Err(TrajectoryError::InsufficientPoints { left: 2, right: 0 })
        );
        assert!(matches!(
            symmetric_distance(&empty, &empty),
            Err(TrajectoryError::InsufficientPoints { .. })
        ));
    }

    #[test]
    fn test_long_trajectory_uses_same_result() {
        // Long enough for the K-D tree path
        let a: Trajectory = (0..200)
            .map(|i| Point([i as f64 * 0.5, (i as f64 * 0.1).sin()]))
            .collect::<Vec<_>>()
            .into();
        let b: Trajectory = (0..150)
            .map(|i| Point([i as f64 * 0.7, 3.0 + (i as f64 * 0.2).cos()]))
            .collect::<Vec<_>>()
            .into();

        let expected_ab = directed_scan(a.points(), b.points());
        let expected_ba = directed_scan(b.points(), a.points());
        assert_eq!(directed_distance(&a, &b).unwrap(), expected_ab);
        assert_eq!(directed_distance(&b, &a).unwrap(), expected_ba);
    }

    #[test]
    fn test_kd_tree_nearest() {
        let points = vec![
            Point([2.0, 3.0]),
            Point([5.0, 4.0]),
            Point([9.0, 6.0]),
            Point([4.0, 7.0]),
            Point([8.0, 1.0]),
            Point([7.0, 2.0]),
        ];
        let tree = new_kd_tree(&points);
        assert_eq!(tree.height(), 3);

        let (idx, d) = tree.nearest(&Point([9.0, 2.0])).unwrap();
        assert_eq!(idx, 4);
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(tree.nearest(&Point([4.0, 7.0])), Some((3, 0.0)));
        assert_eq!(tree.nearest(&Point([3.0, 3.0])), Some((0, 1.0)));

        let empty: Vec<Point> = Vec::new();
        assert_eq!(new_kd_tree(&empty).nearest(&Point([0.0, 0.0])), None);
    }

    #[test]
    fn test_kd_tree_duplicates() {
        let points = vec![Point([1.0, 1.0]); 10];
        let tree = new_kd_tree(&points);
        let (_, d) = tree.nearest(&Point([1.0, 2.0])).unwrap();
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_far_apart_coordinates_stay_finite() {
        let a = trajectory(&[(0.0, 0.0)]);
        let b = trajectory(&[(1e200, 0.0)]);
        assert_eq!(directed_distance(&a, &b).unwrap(), 1e200);
        assert_eq!(symmetric_distance(&a, &b).unwrap(), 1e200);

        let c = trajectory(&[(-1e300, -1e300)]);
        let d = trajectory(&[(1e300, 1e300)]);
        let cd = symmetric_distance(&c, &d).unwrap();
        let expected = 2e300 * 2.0_f64.sqrt();
        assert!(cd.is_finite());
        assert!((cd - expected).abs() <= expected * 1e-15);
    }

    #[test]
    fn test_far_apart_matrix_stays_finite() {
        let records: Vec<RawTrajectory> = ["0,0", "1e200,0", "0,0 -1e200,0"]
            .iter()
            .map(|c| RawTrajectory {
                coordinates: c.to_string(),
            })
            .collect();
        let trajectories = load(&records).unwrap();

        let m = build_matrix(&trajectories).unwrap();
        assert_eq!(m.get(0, 1), 1e200);
        assert_eq!(m.get(1, 0), 1e200);
        assert_eq!(m.get(0, 2), 1e200);
        assert_eq!(m.get(1, 2), 2e200);
        assert!(m.rows().flatten().all(|d| d.is_finite()));
    }

    #[test]
    fn test_long_far_apart_trajectories_stay_finite() {
        // Both directions go through the K-D tree
        let a: Trajectory = (0..100)
            .map(|i| Point([i as f64 * 1e200, 0.0]))
            .collect::<Vec<_>>()
            .into();
        let b: Trajectory = (0..100)
            .map(|i| Point([i as f64 * 1e200, 3e200]))
            .collect::<Vec<_>>()
            .into();
        assert_eq!(symmetric_distance(&a, &b).unwrap(), 3e200);
    }

    quickcheck! {
        fn prop_self_distance_is_zero(coords: Vec<(i16, i16)>) -> TestResult {
            if coords.is_empty() {
                return TestResult::discard();
            }
            let a = Trajectory::new(small_ints(&coords));
            TestResult::from_bool(
                directed_distance(&a, &a) == Ok(0.0) && symmetric_distance(&a, &a) == Ok(0.0),
            )
        }

        fn prop_symmetric_and_non_negative(a: Vec<(i16, i16)>, b: Vec<(i16, i16)>) -> TestResult {
            if a.is_empty() || b.is_empty() {
                return TestResult::discard();
            }
            let a = Trajectory::new(small_ints(&a));
            let b = Trajectory::new(small_ints(&b));
            let ab = symmetric_distance(&a, &b).unwrap();
            let ba = symmetric_distance(&b, &a).unwrap();
            TestResult::from_bool(ab == ba && ab >= 0.0)
        }

        fn prop_zero_only_for_equal_point_sets(a: Vec<(i16, i16)>, b: Vec<(i16, i16)>) -> TestResult {
            if a.is_empty() || b.is_empty() {
                return TestResult::discard();
            }
            let same_set = a.iter().all(|p| b.contains(p)) && b.iter().all(|p| a.contains(p));
            let a = Trajectory::new(small_ints(&a));
            let b = Trajectory::new(small_ints(&b));
            let d = symmetric_distance(&a, &b).unwrap();
            TestResult::from_bool((d == 0.0) == same_set && (same_set || d > 0.0))
        }

        fn prop_kd_tree_matches_scan(a: Vec<(i16, i16)>, b: Vec<(i16, i16)>) -> TestResult {
            if a.is_empty() || b.is_empty() {
                return TestResult::discard();
            }
            let a = small_ints(&a);
            let b = small_ints(&b);
            TestResult::from_bool(directed_indexed(&a, &b) == directed_scan(&a, &b))
        }

        fn prop_kd_tree_nearest_is_exact(points: Vec<(i16, i16)>, query: (i16, i16)) -> TestResult {
            if points.is_empty() {
                return TestResult::discard();
            }
            let points = small_ints(&points);
            let q = Point([query.0 as f64, query.1 as f64]);
            let expected = points
                .iter()
                .map(|p| p.dist(&q))
                .fold(f64::INFINITY, f64::min);
            let (idx, d) = new_kd_tree(&points).nearest(&q).unwrap();
            TestResult::from_bool(d == expected && points[idx].dist(&q) == d)
        }
    }
}
