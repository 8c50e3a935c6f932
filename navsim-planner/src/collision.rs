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
//! Collision checks between the robot and sensed obstacle points.

use nalgebra::{Isometry2, Point2};
use tracing::debug;

use crate::errors::*;

/// Decides if the robot may occupy a pose given the latest obstacle readings.
///
/// The robot is treated as a disc of radius `safety_radius`.
#[derive(Clone, Copy, Debug)]
pub struct ObstacleChecker {
    safety_radius: f64,
}

impl ObstacleChecker {
    pub fn new(safety_radius: f64) -> Result<Self> {
        Ok(Self {
            safety_radius: check_positive("safety_radius", safety_radius)?,
        })
    }

    pub fn safety_radius(&self) -> f64 {
        self.safety_radius
    }

    /// Check if any reading is closer than the safety radius to a robot at `transform`.
    ///
    /// `transform` maps the frame of `readings` into the frame of the
    /// hypothetical robot. No readings means no known obstacles.
    ///
    /// ```
    /// use navsim_planner::ObstacleChecker;
    /// use nalgebra::{Isometry2, Point2, Vector2};
    ///
    /// let checker = ObstacleChecker::new(0.4).unwrap();
    /// let readings = [Point2::new(1.0, 0.0)];
    /// assert!(!checker.is_collision_detected(&Isometry2::identity(), &readings));
    /// // the robot moved 0.7 forward
    /// let moved = Isometry2::new(Vector2::new(-0.7, 0.0), 0.0);
    /// assert!(checker.is_collision_detected(&moved, &readings));
    /// ```
    pub fn is_collision_detected(
        &self,
        transform: &Isometry2<f64>,
        readings: &[Point2<f64>],
    ) -> bool {
        self.colliding_readings(transform, readings).next().is_some()
    }

    /// Lists the readings that are too close to a robot at `transform`
    pub fn colliding_readings<'a>(
        &'a self,
        transform: &'a Isometry2<f64>,
        readings: &'a [Point2<f64>],
    ) -> impl Iterator<Item = &'a Point2<f64>> + 'a {
        readings.iter().filter(move |reading| {
            let dist = (transform * *reading).coords.norm();
            if dist < self.safety_radius {
                debug!("reading: {reading}, dist={dist}");
                true
            } else {
                false
            }
        })
    }
}
