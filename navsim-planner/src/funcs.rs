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

use std::f64::consts::FRAC_PI_4;

use nalgebra::Isometry2;
use navsim_world::transform_rotate_first;

/// One motion primitive: a pure turn or a pure forward move.
///
/// Actions produced by the planner never have both fields non zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Action {
    /// Heading change in radians, counter-clockwise positive.
    pub rotation: f64,
    /// Distance moved along the current heading.
    pub translation: f64,
}

impl Action {
    pub fn new(rotation: f64, translation: f64) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Turn counter-clockwise by 45 degrees
    pub fn turn_left() -> Self {
        Self::new(FRAC_PI_4, 0.0)
    }

    /// Turn clockwise by 45 degrees
    pub fn turn_right() -> Self {
        Self::new(-FRAC_PI_4, 0.0)
    }

    pub fn forward(distance: f64) -> Self {
        Self::new(0.0, distance)
    }

    /// The "do nothing" action.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.rotation == 0.0 && self.translation == 0.0
    }

    pub fn is_turn(&self) -> bool {
        self.translation == 0.0 && self.rotation != 0.0
    }

    pub fn is_forward(&self) -> bool {
        self.rotation == 0.0 && self.translation > 0.0
    }

    /// Transform of the robot motion, mapping the frame before the action into the frame after it.
    pub fn transform(&self) -> Isometry2<f64> {
        // rotating first is fine since the two are never combined
        transform_rotate_first(self.translation, 0.0, self.rotation)
    }
}

/// Ordered actions from the start pose toward the goal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plan {
    pub actions: Vec<Action>,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    pub fn first(&self) -> Option<&Action> {
        self.actions.first()
    }

    pub fn num_turns(&self) -> usize {
        self.iter().filter(|a| a.is_turn()).count()
    }

    pub fn num_forward_steps(&self) -> usize {
        self.iter().filter(|a| a.is_forward()).count()
    }

    /// Total distance travelled by the forward moves.
    pub fn length(&self) -> f64 {
        self.iter().map(|a| a.translation).sum()
    }

    /// See [`replay_plan`].
    pub fn trajectory(&self, initial_transform: &Isometry2<f64>) -> Vec<Isometry2<f64>> {
        replay_plan(&self.actions, initial_transform)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Replay `actions` from `initial_transform`
///
/// returns the transforms visited, starting with `initial_transform` itself,
/// so the length is always `actions.len() + 1`.
///
/// # Example
///
/// ```
/// use navsim_planner::{replay_plan, Action};
/// use nalgebra::Isometry2;
///
/// let actions = [Action::turn_left(), Action::turn_left(), Action::forward(1.0)];
/// let trajectory = replay_plan(&actions, &Isometry2::identity());
/// assert_eq!(trajectory.len(), 4);
/// let pose = navsim_world::transform_to_pose(&trajectory[3], 0.0);
/// assert!(pose.x.abs() < 1e-9);
/// assert!((pose.y - 1.0).abs() < 1e-9);
/// ```
pub fn replay_plan(actions: &[Action], initial_transform: &Isometry2<f64>) -> Vec<Isometry2<f64>> {
    let mut transform = *initial_transform;
    let mut trajectory = Vec::with_capacity(actions.len() + 1);
    trajectory.push(transform);
    for action in actions {
        transform = action.transform() * transform;
        trajectory.push(transform);
    }
    trajectory
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use navsim_world::{pose_to_transform, transforms_to_poses, Pose};

    use super::*;

    #[test]
    fn test_action_kinds() {
        assert!(Action::turn_left().is_turn());
        assert!(Action::turn_right().is_turn());
        assert!(!Action::turn_left().is_forward());
        assert!(Action::forward(0.3).is_forward());
        assert!(!Action::forward(0.3).is_turn());
        assert!(Action::zero().is_zero());
        assert!(!Action::zero().is_turn());
        assert!(!Action::zero().is_forward());
    }

    #[test]
    fn test_plan_counts() {
        let plan = Plan::new(vec![
            Action::turn_left(),
            Action::forward(0.3),
            Action::forward(0.3),
            Action::turn_right(),
            Action::forward(0.3),
        ]);
        assert_eq!(plan.len(), 5);
        assert_eq!(plan.num_turns(), 2);
        assert_eq!(plan.num_forward_steps(), 3);
        assert_approx_eq!(plan.length(), 0.9);
        assert_eq!(plan.first(), Some(&Action::turn_left()));
        assert_eq!((&plan).into_iter().count(), 5);
        assert!(Plan::default().is_empty());
    }

    #[test]
    fn test_replay_from_world_pose() {
        let start = Pose::new(2.0, 1.0, FRAC_PI_4 * 2.0);
        let plan = Plan::new(vec![
            Action::forward(1.0),
            Action::turn_right(),
            Action::turn_right(),
            Action::forward(0.5),
        ]);
        let poses = transforms_to_poses(&plan.trajectory(&pose_to_transform(&start)));
        assert_eq!(poses.len(), 5);
        assert_approx_eq!(poses[0].x, 2.0);
        assert_approx_eq!(poses[1].x, 2.0);
        assert_approx_eq!(poses[1].y, 2.0);
        assert_approx_eq!(poses[3].heading, 0.0);
        assert_approx_eq!(poses[4].x, 2.5);
        assert_approx_eq!(poses[4].y, 2.0);
    }

    #[test]
    fn test_empty_replay() {
        let start = pose_to_transform(&Pose::new(1.0, 2.0, 3.0));
        let trajectory = replay_plan(&[], &start);
        assert_eq!(trajectory, vec![start]);
    }
}
