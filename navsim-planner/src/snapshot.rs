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

use nalgebra::{Isometry2, Point2};
use navsim_world::{Localization, ObstacleSensor};

use crate::errors::*;

/// Everything a planning call reads from the world, captured once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldSnapshot {
    /// Pose estimate, mapping world coordinates into the robot frame.
    pub transform: Isometry2<f64>,
    /// Latest obstacle and landmark readings in the robot frame.
    pub readings: Vec<Point2<f64>>,
}

impl WorldSnapshot {
    pub fn new(transform: Isometry2<f64>, readings: Vec<Point2<f64>>) -> Self {
        Self {
            transform,
            readings,
        }
    }

    /// Query the pose estimate and the latest readings.
    pub fn capture<L, S>(localization: &L, sensor: &S) -> Result<Self>
    where
        L: Localization + ?Sized,
        S: ObstacleSensor + ?Sized,
    {
        Ok(Self {
            transform: localization.current_transform()?,
            readings: sensor.latest_readings()?,
        })
    }

    /// Express a world frame point in the robot frame.
    pub fn to_robot_frame(&self, world_point: &Point2<f64>) -> Point2<f64> {
        self.transform * world_point
    }
}
