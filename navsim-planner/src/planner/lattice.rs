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
//! Discretized robot states and the bookkeeping of the lattice search.

use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    f64::consts::{FRAC_PI_4, SQRT_2},
};

use nalgebra::{Isometry2, Point2};
use navsim_world::{pose_to_transform, Pose};

use crate::funcs::Action;

/// Number of discrete headings, each a multiple of 45 degrees
pub const NUM_HEADINGS: u8 = 8;

/// Grid step for each heading index, counter-clockwise from the x axis.
const GRID_DIRECTIONS: [(i32, i32); NUM_HEADINGS as usize] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Quantized robot pose in the frame of the robot at planning time.
///
/// The robot itself is always at the origin with heading `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiscreteState {
    pub x: i32,
    pub y: i32,
    /// Heading index in `0..NUM_HEADINGS`
    pub heading: u8,
}

impl DiscreteState {
    pub fn new(x: i32, y: i32, heading: u8) -> Self {
        Self {
            x,
            y,
            heading: heading % NUM_HEADINGS,
        }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// Odd headings point along a grid diagonal.
    pub fn is_diagonal(&self) -> bool {
        self.heading % 2 == 1
    }

    /// Length of one forward move from this state.
    pub fn forward_distance(&self, resolution: f64) -> f64 {
        if self.is_diagonal() {
            resolution * SQRT_2
        } else {
            resolution
        }
    }

    pub fn forward_action(&self, resolution: f64) -> Action {
        Action::forward(self.forward_distance(resolution))
    }

    /// State reached by taking `action`.
    ///
    /// Any positive translation moves exactly one cell along the heading; any
    /// other non zero action turns by one heading step in the sign of its rotation.
    pub fn apply(&self, action: &Action) -> Self {
        // fields are public, so the heading may be out of range here
        let heading = self.heading % NUM_HEADINGS;
        if action.translation > 0.0 {
            let (dx, dy) = GRID_DIRECTIONS[heading as usize];
            Self::new(self.x + dx, self.y + dy, heading)
        } else if action.rotation > 0.0 {
            Self::new(self.x, self.y, heading + 1)
        } else if action.rotation < 0.0 {
            Self::new(self.x, self.y, heading + NUM_HEADINGS - 1)
        } else {
            *self
        }
    }

    pub fn position(&self, resolution: f64) -> Point2<f64> {
        Point2::new(self.x as f64 * resolution, self.y as f64 * resolution)
    }

    pub fn heading_angle(&self) -> f64 {
        self.heading as f64 * FRAC_PI_4
    }

    pub fn to_pose(&self, resolution: f64) -> Pose {
        let position = self.position(resolution);
        Pose::new(position.x, position.y, self.heading_angle())
    }

    pub fn to_transform(&self, resolution: f64) -> Isometry2<f64> {
        pose_to_transform(&self.to_pose(resolution))
    }
}

pub(crate) type NodeId = usize;

/// Node of the search tree. Never changed once allocated.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SearchNode {
    pub(crate) state: DiscreteState,
    /// Accumulated cost from the root
    pub(crate) cost: f64,
    pub(crate) heuristic: f64,
    pub(crate) steps: usize,
    /// Action taken to reach this node from the parent
    pub(crate) action: Action,
    pub(crate) parent: Option<NodeId>,
}

impl SearchNode {
    pub(crate) fn priority(&self) -> f64 {
        self.cost + self.heuristic
    }
}

/// Owns every node allocated during one planning call.
///
/// Parents are referred to by index, so the whole tree is released at once.
#[derive(Debug)]
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub(crate) fn new(root_state: DiscreteState, root_heuristic: f64) -> Self {
        Self {
            nodes: vec![SearchNode {
                state: root_state,
                cost: 0.0,
                heuristic: root_heuristic,
                steps: 0,
                action: Action::zero(),
                parent: None,
            }],
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        0
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    pub(crate) fn expand(
        &mut self,
        parent: NodeId,
        state: DiscreteState,
        action: Action,
        cost: f64,
        heuristic: f64,
    ) -> NodeId {
        let steps = self.nodes[parent].steps + 1;
        self.nodes.push(SearchNode {
            state,
            cost,
            heuristic,
            steps,
            action,
            parent: Some(parent),
        });
        self.nodes.len() - 1
    }

    /// Actions from the root to `id`, in execution order.
    pub(crate) fn actions_to(&self, id: NodeId) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.nodes[id].steps);
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            actions.push(self.nodes[current].action);
            current = parent;
        }
        actions.reverse();
        actions
    }
}

#[derive(Debug)]
struct FrontierEntry {
    priority: f64,
    order: usize,
    id: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap: lowest priority first, then oldest entry
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Min-priority queue of nodes waiting to be expanded.
///
/// Ties are broken by insertion order.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushed: usize,
}

impl Frontier {
    pub(crate) fn push(&mut self, id: NodeId, priority: f64) {
        self.heap.push(FrontierEntry {
            priority,
            order: self.pushed,
            id,
        });
        self.pushed += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|entry| entry.id)
    }
}
