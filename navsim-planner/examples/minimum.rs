/*
Copyright 2017 Takashi Ogura

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use nalgebra::Point2;
use navsim_world::{pose_to_transform, transforms_to_poses, Pose};

fn main() {
    tracing_subscriber::fmt::init();

    // Create the planner with a larger robot
    let planner = navsim_planner::LatticePlannerBuilder::new()
        .resolution(0.25)
        .safety_radius(0.5)
        .finalize()
        .expect("invalid planner parameters");

    // Robot at (1, 1) facing +y, with two obstacle points ahead (robot frame)
    let start = pose_to_transform(&Pose::new(1.0, 1.0, std::f64::consts::FRAC_PI_2));
    let readings = vec![Point2::new(1.0, 0.0), Point2::new(1.0, 0.3)];
    let snapshot = navsim_planner::WorldSnapshot::new(start, readings);

    let goal = Point2::new(1.0, 4.0);
    let plan = planner.plan(&snapshot, &goal, 0.3).unwrap();
    println!("plan = {:?}", plan.actions);

    // Replay the plan to get the poses in the world frame
    for pose in transforms_to_poses(&plan.trajectory(&start)) {
        println!("{pose:?}");
    }

    // Only the first action is needed when planning again at every step
    let action = planner.act(&snapshot, &goal, 0.3).unwrap();
    println!("first action = {action:?}");
}
