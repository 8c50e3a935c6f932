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
use std::collections::{hash_map::Entry, HashMap};

use nalgebra::Point2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::{
    collision::ObstacleChecker,
    errors::*,
    funcs::{Action, Plan},
    planner::lattice::{DiscreteState, Frontier, NodeArena},
    snapshot::WorldSnapshot,
};

/// Best-first planner over a grid of positions and eight headings
///
/// Every node expands into three actions: move forward one cell, turn left
/// and turn right by 45 degrees. Turns are always allowed; forward moves are
/// checked against the obstacle readings.
///
/// The heuristic is the straight-line distance to the goal. It ignores turn
/// costs and the goal radius, so plans are feasible but not guaranteed to be
/// the cheapest.
///
/// By default a state is closed as soon as it enters the frontier for the
/// first time, even if a cheaper way to reach it is found later. Set
/// `relax_closed_set` to reopen states reached with a lower cost instead.
#[derive(Clone, Debug)]
pub struct LatticePlanner {
    /// Size of one grid cell
    resolution: f64,
    /// Cost of a single 45 degree turn
    turn_cost: f64,
    obstacle_checker: ObstacleChecker,
    /// Max num of nodes popped from the frontier
    max_iterations: usize,
    relax_closed_set: bool,
}

impl LatticePlanner {
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn turn_cost(&self) -> f64 {
        self.turn_cost
    }

    pub fn obstacle_checker(&self) -> &ObstacleChecker {
        &self.obstacle_checker
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn relax_closed_set(&self) -> bool {
        self.relax_closed_set
    }

    /// Straight-line distance from `state` to `goal`
    pub fn heuristic(&self, state: &DiscreteState, goal: &Point2<f64>) -> f64 {
        (goal - state.position(self.resolution)).norm()
    }

    /// Cost of taking `action`: the distance for a forward move, the turn cost otherwise.
    pub fn step_cost(&self, action: &Action) -> f64 {
        if action.translation > 0.0 {
            action.translation
        } else {
            self.turn_cost
        }
    }

    /// Check if `state`, reached by `action`, is safe to occupy.
    ///
    /// Turning is always allowed so that the robot can rotate away from nearby obstacles.
    pub fn is_valid(
        &self,
        state: &DiscreteState,
        action: &Action,
        readings: &[Point2<f64>],
    ) -> bool {
        if action.translation == 0.0 {
            return true;
        }
        !self
            .obstacle_checker
            .is_collision_detected(&state.to_transform(self.resolution), readings)
    }

    /// Actions considered from `state`, in expansion order.
    fn candidate_actions(&self, state: &DiscreteState) -> [Action; 3] {
        [
            state.forward_action(self.resolution),
            Action::turn_left(),
            Action::turn_right(),
        ]
    }

    /// Plan from the robot pose in `snapshot` toward `goal`
    ///
    /// # Arguments
    ///
    /// - `snapshot`: pose estimate and obstacle readings, captured once for this call.
    /// - `goal`: target position in the world frame.
    /// - `goal_radius`: the search stops at the first state closer than this to the goal.
    ///
    /// An empty plan means the robot is already within `goal_radius`. If no
    /// such state is found within `max_iterations`, [`Error::PathPlanFail`]
    /// is returned; the caller should not move.
    pub fn plan(
        &self,
        snapshot: &WorldSnapshot,
        goal: &Point2<f64>,
        goal_radius: f64,
    ) -> Result<Plan> {
        let local_goal = snapshot.to_robot_frame(goal);
        self.plan_in_robot_frame(&local_goal, goal_radius, &snapshot.readings)
    }

    /// Same as [`plan`](Self::plan) with the goal and readings already in the robot frame.
    pub fn plan_in_robot_frame(
        &self,
        goal: &Point2<f64>,
        goal_radius: f64,
        readings: &[Point2<f64>],
    ) -> Result<Plan> {
        check_positive("goal_radius", goal_radius)?;

        let root_state = DiscreteState::origin();
        let mut arena = NodeArena::new(root_state, self.heuristic(&root_state, goal));
        let mut frontier = Frontier::default();
        // lowest cost each state has been pushed with
        let mut visited = HashMap::new();
        let root = arena.root();
        frontier.push(root, arena.get(root).priority());
        visited.insert(root_state, 0.0);

        let mut iterations = 0;
        while iterations < self.max_iterations {
            let Some(id) = frontier.pop() else {
                break;
            };
            let node = *arena.get(id);
            if self.relax_closed_set
                && visited.get(&node.state).is_some_and(|c| node.cost > *c)
            {
                // superseded by a cheaper entry, not an expansion
                continue;
            }
            iterations += 1;
            if node.heuristic < goal_radius {
                let plan = Plan::new(arena.actions_to(id));
                debug!(
                    iterations,
                    nodes = arena.len(),
                    steps = plan.len(),
                    cost = node.cost,
                    "plan found"
                );
                return Ok(plan);
            }

            for action in self.candidate_actions(&node.state) {
                let state = node.state.apply(&action);
                if !self.is_valid(&state, &action, readings) {
                    continue;
                }
                let cost = node.cost + self.step_cost(&action);
                match visited.entry(state) {
                    Entry::Occupied(mut e) => {
                        if !self.relax_closed_set || cost >= *e.get() {
                            continue;
                        }
                        e.insert(cost);
                    }
                    Entry::Vacant(e) => {
                        e.insert(cost);
                    }
                }
                let heuristic = self.heuristic(&state, goal);
                let child = arena.expand(id, state, action, cost, heuristic);
                frontier.push(child, cost + heuristic);
            }
        }

        debug!(iterations, nodes = arena.len(), "plan not found");
        Err(Error::PathPlanFail {
            iterations,
            nodes: arena.len(),
        })
    }

    /// Plan and return only the first action to take.
    ///
    /// [`Action::zero`] is returned when there is nothing to do: either the
    /// robot is already within `goal_radius` or no safe plan was found.
    pub fn act(
        &self,
        snapshot: &WorldSnapshot,
        goal: &Point2<f64>,
        goal_radius: f64,
    ) -> Result<Action> {
        match self.plan(snapshot, goal, goal_radius) {
            Ok(plan) => Ok(plan.first().copied().unwrap_or_default()),
            Err(Error::PathPlanFail { iterations, nodes }) => {
                warn!(iterations, nodes, "no safe motion toward the goal, staying");
                Ok(Action::zero())
            }
            Err(e) => Err(e),
        }
    }
}

/// Builder pattern to create `LatticePlanner`
#[derive(Clone, Debug)]
pub struct LatticePlannerBuilder {
    resolution: f64,
    turn_cost: f64,
    safety_radius: f64,
    max_iterations: usize,
    relax_closed_set: bool,
}

impl LatticePlannerBuilder {
    pub fn new() -> Self {
        LatticePlannerBuilder {
            resolution: default_resolution(),
            turn_cost: default_turn_cost(),
            safety_radius: default_safety_radius(),
            max_iterations: default_max_iterations(),
            relax_closed_set: false,
        }
    }

    pub fn from_config(config: &LatticePlannerConfig) -> Self {
        LatticePlannerBuilder {
            resolution: config.resolution,
            turn_cost: config.turn_cost,
            safety_radius: config.safety_radius,
            max_iterations: config.max_iterations,
            relax_closed_set: config.relax_closed_set,
        }
    }

    pub fn resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn turn_cost(mut self, turn_cost: f64) -> Self {
        self.turn_cost = turn_cost;
        self
    }

    pub fn safety_radius(mut self, safety_radius: f64) -> Self {
        self.safety_radius = safety_radius;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn relax_closed_set(mut self, relax_closed_set: bool) -> Self {
        self.relax_closed_set = relax_closed_set;
        self
    }

    pub fn finalize(self) -> Result<LatticePlanner> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
            });
        }
        Ok(LatticePlanner {
            resolution: check_positive("resolution", self.resolution)?,
            turn_cost: check_positive("turn_cost", self.turn_cost)?,
            obstacle_checker: ObstacleChecker::new(self.safety_radius)?,
            max_iterations: self.max_iterations,
            relax_closed_set: self.relax_closed_set,
        })
    }
}

impl Default for LatticePlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LatticePlannerConfig {
    /// Size of one grid cell.
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    /// Cost of one 45 degree turn, in the same unit as distance.
    #[serde(default = "default_turn_cost")]
    pub turn_cost: f64,
    /// Minimum distance kept between the robot and any reading.
    #[serde(default = "default_safety_radius")]
    pub safety_radius: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Reopen states that are reached again with a lower cost.
    #[serde(default)]
    pub relax_closed_set: bool,
}

fn default_resolution() -> f64 {
    0.3
}

fn default_turn_cost() -> f64 {
    0.5
}

fn default_safety_radius() -> f64 {
    0.4
}

fn default_max_iterations() -> usize {
    100_000
}

impl Default for LatticePlannerConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            turn_cost: default_turn_cost(),
            safety_radius: default_safety_radius(),
            max_iterations: default_max_iterations(),
            relax_closed_set: false,
        }
    }
}

pub fn create_lattice_planner(config: &LatticePlannerConfig) -> Result<LatticePlanner> {
    LatticePlannerBuilder::from_config(config).finalize()
}
