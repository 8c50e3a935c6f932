use navsim_planner::{Action, LatticePlanner, Plan, WorldSnapshot};
use navsim_world::{Isometry2, Localization, MotionCommand, ObstacleSensor, Point2};
use tracing::{info, warn};

use crate::{Error, GoalConfig};

/// Why the autonomous loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The pose estimate is within the goal radius.
    ReachedGoal,
    /// The planner found no way forward.
    Stuck,
    /// `max_steps` actions were executed without reaching the goal.
    StepLimit,
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Executed actions, in order
    pub actions: Vec<Action>,
    /// Last pose estimate
    pub final_transform: Isometry2<f64>,
}

/// Drives a robot toward a goal by re-planning before every action.
#[derive(Debug)]
pub struct Navigator<L, S, M> {
    planner: LatticePlanner,
    localization: L,
    sensor: S,
    motion: M,
    goal: Point2<f64>,
    goal_radius: f64,
}

impl<L, S, M> Navigator<L, S, M>
where
    L: Localization,
    S: ObstacleSensor,
    M: MotionCommand,
{
    pub fn new(
        planner: LatticePlanner,
        localization: L,
        sensor: S,
        motion: M,
        goal: &GoalConfig,
    ) -> Self {
        Self {
            planner,
            localization,
            sensor,
            motion,
            goal: goal.position(),
            goal_radius: goal.radius,
        }
    }

    pub fn goal(&self) -> &Point2<f64> {
        &self.goal
    }

    pub fn set_goal(&mut self, goal: Point2<f64>, goal_radius: f64) {
        self.goal = goal;
        self.goal_radius = goal_radius;
    }

    pub fn snapshot(&self) -> Result<WorldSnapshot, Error> {
        Ok(WorldSnapshot::capture(&self.localization, &self.sensor)?)
    }

    /// Distance from the current pose estimate to the goal
    pub fn distance_to_goal(&self) -> Result<f64, Error> {
        Ok(self.snapshot()?.to_robot_frame(&self.goal).coords.norm())
    }

    /// Plan the whole way from the current pose without moving.
    pub fn plan(&self) -> Result<Plan, Error> {
        let snapshot = self.snapshot()?;
        Ok(self.planner.plan(&snapshot, &self.goal, self.goal_radius)?)
    }

    /// Re-plan and execute the first action.
    ///
    /// Returns the zero action without moving when there is nothing to do.
    pub fn step(&self) -> Result<Action, Error> {
        let snapshot = self.snapshot()?;
        let action = self.planner.act(&snapshot, &self.goal, self.goal_radius)?;
        if !action.is_zero() {
            info!(
                rotation = action.rotation,
                translation = action.translation,
                "execute"
            );
            self.motion
                .move_robot(action.rotation, action.translation)?;
        }
        Ok(action)
    }

    /// Step until the goal is reached, the planner gives up or `max_steps`
    /// actions have been executed.
    pub fn run(&self, max_steps: usize) -> Result<RunReport, Error> {
        let mut actions = vec![];
        let outcome = loop {
            if self.distance_to_goal()? < self.goal_radius {
                break RunOutcome::ReachedGoal;
            }
            if actions.len() >= max_steps {
                warn!(max_steps, "step limit reached");
                break RunOutcome::StepLimit;
            }
            let action = self.step()?;
            if action.is_zero() {
                warn!("no plan to the goal, leaving autonomous mode");
                break RunOutcome::Stuck;
            }
            actions.push(action);
        };
        info!(?outcome, steps = actions.len(), "finished");
        Ok(RunReport {
            outcome,
            actions,
            final_transform: self.localization.current_transform()?,
        })
    }

    pub fn into_inner(self) -> (L, S, M) {
        (self.localization, self.sensor, self.motion)
    }
}
