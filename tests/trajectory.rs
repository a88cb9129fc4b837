use algolab::trajectory::TrajectoryGenerator;
use algolab::AlgolabError;

fn close(a: [f64; 3], b: [f64; 3], tol: f64) -> bool {
    a.iter().zip(&b).all(|(x, y)| (x - y).abs() < tol)
}

#[test]
fn test_rest_to_rest_boundaries() {
    let start = [0.0, 1.0, -2.0];
    let goal = [4.0, -3.0, 6.0];
    let path = TrajectoryGenerator::new(start, goal, 2.5).solve().unwrap();

    assert!(close(path.position(0.0), start, 1e-9));
    assert!(close(path.position(2.5), goal, 1e-9));
    assert!(close(path.velocity(0.0), [0.0; 3], 1e-9));
    assert!(close(path.velocity(2.5), [0.0; 3], 1e-9));
    assert!(close(path.acceleration(0.0), [0.0; 3], 1e-9));
    assert!(close(path.acceleration(2.5), [0.0; 3], 1e-9));
}

#[test]
fn test_rest_to_rest_midpoint_is_halfway() {
    let path = TrajectoryGenerator::new([0.0; 3], [10.0, 20.0, -4.0], 4.0).solve().unwrap();
    assert!(close(path.position(2.0), [5.0, 10.0, -2.0], 1e-9));

    // minimum jerk profile: 10 s^3 - 15 s^4 + 6 s^5
    let c = path.coefficients[0];
    assert!((c[0] - 10.0 * 6.0 / 4f64.powi(5)).abs() < 1e-9);
    assert!((c[1] + 10.0 * 15.0 / 4f64.powi(4)).abs() < 1e-9);
    assert!((c[2] - 10.0 * 10.0 / 4f64.powi(3)).abs() < 1e-9);
    assert!(c[3..].iter().all(|v| v.abs() < 1e-9));
}

#[test]
fn test_velocity_and_acceleration_conditions() {
    let path = TrajectoryGenerator::new([0.0; 3], [1.0; 3], 1.0)
        .with_velocities([1.0, 0.0, -1.0], [0.5, 0.5, 0.5])
        .with_accelerations([0.0, 2.0, 0.0], [-1.0, 0.0, 1.0])
        .solve()
        .unwrap();

    assert!(close(path.velocity(0.0), [1.0, 0.0, -1.0], 1e-9));
    assert!(close(path.velocity(1.0), [0.5, 0.5, 0.5], 1e-9));
    assert!(close(path.acceleration(0.0), [0.0, 2.0, 0.0], 1e-9));
    assert!(close(path.acceleration(1.0), [-1.0, 0.0, 1.0], 1e-9));
}

#[test]
fn test_samples_span_the_duration() {
    let path = TrajectoryGenerator::new([0.0; 3], [1.0; 3], 3.0).solve().unwrap();

    let points = path.sample(4);
    let times: Vec<f64> = points.iter().map(|p| p.t).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0]);
    assert!(close(points[3].position, [1.0; 3], 1e-9));

    assert!(path.sample(0).is_empty());
    assert_eq!(path.sample(1)[0].t, 0.0);
}

#[test]
fn test_invalid_inputs() {
    for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = TrajectoryGenerator::new([0.0; 3], [1.0; 3], duration).solve();
        assert!(matches!(result, Err(AlgolabError::Trajectory(_))));
    }
    let result = TrajectoryGenerator::new([f64::NAN, 0.0, 0.0], [1.0; 3], 1.0).solve();
    assert!(result.is_err());
}
