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
use navsim_world::MotionCommand;
use tracing::*;

use crate::{
    errors::*,
    funcs::{Action, Plan},
};

/// Sends the actions of a plan to the robot one at a time.
#[derive(Debug)]
pub struct PlanExecutor<M> {
    motion: M,
    plan: Plan,
    next: usize,
}

impl<M> PlanExecutor<M>
where
    M: MotionCommand,
{
    pub fn new(motion: M, plan: Plan) -> Self {
        Self {
            motion,
            plan,
            next: 0,
        }
    }

    /// Actions not sent yet
    pub fn remaining(&self) -> &[Action] {
        &self.plan.actions[self.next..]
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.plan.len()
    }

    /// Send the next action, if any, and return it.
    pub fn step(&mut self) -> Result<Option<Action>> {
        let Some(action) = self.plan.actions.get(self.next).copied() else {
            return Ok(None);
        };
        self.motion.move_robot(action.rotation, action.translation)?;
        self.next += 1;
        debug!(
            rotation = action.rotation,
            translation = action.translation,
            step = self.next,
            total = self.plan.len(),
            "executed action"
        );
        Ok(Some(action))
    }

    /// Send all remaining actions and return how many were sent.
    pub fn run(&mut self) -> Result<usize> {
        let mut count = 0;
        while self.step()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Replace the plan, e.g. after planning again from a new snapshot.
    pub fn replace_plan(&mut self, plan: Plan) {
        self.plan = plan;
        self.next = 0;
    }

    pub fn into_inner(self) -> M {
        self.motion
    }
}

#[cfg(test)]
mod tests {
    use navsim_world::DummyMotionCommand;

    use super::*;

    #[test]
    fn test_step_and_run() {
        let plan = Plan::new(vec![
            Action::turn_left(),
            Action::forward(0.3),
            Action::forward(0.3),
        ]);
        let mut executor = PlanExecutor::new(DummyMotionCommand::new(), plan);
        assert_eq!(executor.remaining().len(), 3);
        assert_eq!(executor.step().unwrap(), Some(Action::turn_left()));
        assert_eq!(executor.remaining(), &[Action::forward(0.3); 2]);
        assert_eq!(executor.run().unwrap(), 2);
        assert!(executor.is_finished());
        assert_eq!(executor.step().unwrap(), None);

        executor.replace_plan(Plan::new(vec![Action::turn_right()]));
        assert!(!executor.is_finished());
        assert_eq!(executor.run().unwrap(), 1);

        let commands = executor.into_inner().commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[1], (0.0, 0.3));
        assert_eq!(commands[3], (-std::f64::consts::FRAC_PI_4, 0.0));
    }
}
