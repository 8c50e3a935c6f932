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
//! # Motion Planning Library for a Mobile Robot
//!
//! Get a collision free sequence of turn and move actions toward a goal. The
//! robot pose is quantized to a grid with eight headings and searched
//! best-first, checking every forward move against the latest obstacle
//! readings.
//!

#![warn(rust_2018_idioms)]

mod errors;

pub mod collision;

mod funcs;

mod planner;

mod snapshot;

pub use crate::{
    collision::ObstacleChecker,
    errors::Error,
    funcs::*,
    planner::*,
    snapshot::WorldSnapshot,
};
