use nalgebra::{Point2, Vector2};
use navsim_planner::*;
use navsim_world::{
    transforms_to_poses, MotionCommand, Pose, SimWorld, SimWorldConfig, Wall,
};

fn quiet_world(walls: Vec<Wall>, landmarks: Vec<[f64; 2]>) -> SimWorld {
    SimWorld::new(SimWorldConfig {
        walls,
        landmarks,
        odom_noise: 0.0,
        gps_noise: 0.0,
        sensor_noise: 0.0,
        ..Default::default()
    })
    .unwrap()
}

fn distance_to_wall(p: &Point2<f64>, wall: &Wall) -> f64 {
    let a = Point2::new(wall.start[0], wall.start[1]);
    let b = Point2::new(wall.end[0], wall.end[1]);
    let ab: Vector2<f64> = b - a;
    let t = ((p - a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

#[test]
fn test_plan_and_execute_around_wall() {
    let wall = Wall::new([1.5, -0.5], [1.5, 1.0]);
    let world = quiet_world(vec![wall], vec![]);
    let planner = create_lattice_planner(&LatticePlannerConfig::default()).unwrap();
    let goal = Point2::new(3.0, 0.0);

    let snapshot = WorldSnapshot::capture(&world, &world).unwrap();
    assert!(!snapshot.readings.is_empty());
    let plan = planner.plan(&snapshot, &goal, 0.3).unwrap();
    assert!(plan.num_turns() > 0, "the wall is in the way: {plan:?}");

    let mut executor = PlanExecutor::new(&world, plan.clone());
    assert_eq!(executor.run().unwrap(), plan.len());

    let pose = world.true_pose();
    assert!((pose.position() - goal).norm() < 0.3, "{pose:?}");
    for pose in transforms_to_poses(&world.ground_truth()) {
        assert!(distance_to_wall(&pose.position(), &wall) > 0.3, "{pose:?}");
    }
}

#[test]
fn test_replanning_loop_reaches_goal() {
    let world = quiet_world(vec![], vec![[1.0, 1.0], [2.0, 0.8]]);
    let planner = LatticePlannerBuilder::new().finalize().unwrap();
    let goal = Point2::new(3.0, 2.0);

    let mut steps = 0;
    loop {
        let snapshot = WorldSnapshot::capture(&world, &world).unwrap();
        let action = planner.act(&snapshot, &goal, 0.3).unwrap();
        if action.is_zero() {
            break;
        }
        world.move_robot(action.rotation, action.translation).unwrap();
        steps += 1;
        assert!(steps < 100, "too many steps");
    }
    assert!((world.true_pose().position() - goal).norm() < 0.3);
    for pose in transforms_to_poses(&world.ground_truth()) {
        for landmark in world.landmarks() {
            assert!((pose.position() - landmark).norm() >= 0.4, "{pose:?}");
        }
    }
}

#[test]
fn test_replay_matches_simulation() {
    let world = quiet_world(vec![], vec![]);
    let planner = create_lattice_planner(&LatticePlannerConfig::default()).unwrap();
    let snapshot = WorldSnapshot::capture(&world, &world).unwrap();
    let plan = planner.plan(&snapshot, &Point2::new(-1.0, 1.5), 0.3).unwrap();

    let expected = transforms_to_poses(&plan.trajectory(&snapshot.transform));
    for action in &plan {
        world.move_robot(action.rotation, action.translation).unwrap();
    }
    let actual = transforms_to_poses(&world.ground_truth());
    assert_eq!(expected.len(), actual.len());
    for (e, a) in expected.iter().zip(&actual) {
        assert!((e.position() - a.position()).norm() < 1e-9);
        assert!((e.heading - a.heading).abs() < 1e-9);
    }
    let last: &Pose = actual.last().unwrap();
    assert!((last.position() - Point2::new(-1.0, 1.5)).norm() < 0.3);
}
