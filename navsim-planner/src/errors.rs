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

use thiserror::Error;

/// Error for `navsim_planner`
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid parameter: {} must be positive but {}", name, value)]
    InvalidParameter { name: &'static str, value: f64 },
    #[error(
        "Path not found: gave up after {} iterations ({} nodes allocated)",
        iterations,
        nodes
    )]
    PathPlanFail { iterations: usize, nodes: usize },
    #[error("World error: {:?}", source)]
    World {
        #[from]
        source: navsim_world::Error,
    },
}

/// Result for `navsim_planner`
pub type Result<T> = ::std::result::Result<T, Error>;

/// Reject zero, negative and NaN values.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}
