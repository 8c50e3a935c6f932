use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::{Isometry2, Point2};
use navsim_planner::{create_lattice_planner, LatticePlannerConfig, WorldSnapshot};

fn generate_random_readings(num: usize) -> Vec<Point2<f64>> {
    (0..num)
        .map(|_| {
            let x = rand::random::<f64>() * 6.0 - 1.0;
            let y = rand::random::<f64>() * 6.0 - 1.0;
            Point2::new(x, y)
        })
        // keep the start and the goal free
        .filter(|p| p.coords.norm() > 0.8 && (p - Point2::new(4.0, 3.0)).norm() > 0.8)
        .collect()
}

fn bench_plan_without_obstacles(c: &mut Criterion) {
    let planner = create_lattice_planner(&LatticePlannerConfig::default()).unwrap();
    let snapshot = WorldSnapshot::new(Isometry2::identity(), vec![]);
    let goal = Point2::new(4.0, 3.0);

    c.bench_function("bench_plan_without_obstacles", |b| {
        b.iter(|| planner.plan(&snapshot, &goal, 0.3).unwrap());
    });
}

fn bench_plan_with_random_obstacles(c: &mut Criterion) {
    let planner = create_lattice_planner(&LatticePlannerConfig::default()).unwrap();
    let goal = Point2::new(4.0, 3.0);

    c.bench_function("bench_plan_with_random_obstacles", |b| {
        b.iter(|| {
            let snapshot = WorldSnapshot::new(Isometry2::identity(), generate_random_readings(30));
            // random layouts may block the goal entirely
            let _ = planner.plan(&snapshot, &goal, 0.3);
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = bench_plan_without_obstacles, bench_plan_with_random_obstacles);
criterion_main!(benches);
