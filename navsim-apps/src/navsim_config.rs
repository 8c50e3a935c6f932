use std::path::Path;

use fs_err as fs;
use navsim_planner::LatticePlannerConfig;
use navsim_world::{Point2, SimWorldConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Target of the navigation, in the world frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GoalConfig {
    #[serde(default = "default_goal_x")]
    pub x: f64,
    #[serde(default = "default_goal_y")]
    pub y: f64,
    /// The goal counts as reached within this distance.
    #[serde(default = "default_goal_radius")]
    pub radius: f64,
}

fn default_goal_x() -> f64 {
    9.0
}

fn default_goal_y() -> f64 {
    6.0
}

fn default_goal_radius() -> f64 {
    1.0
}

impl GoalConfig {
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            x: default_goal_x(),
            y: default_goal_y(),
            radius: default_goal_radius(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Max num of actions executed by the autonomous loop
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_max_steps() -> usize {
    500
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NavSimConfig {
    #[serde(default)]
    pub planner: LatticePlannerConfig,
    #[serde(default)]
    pub world: SimWorldConfig,
    #[serde(default)]
    pub goal: GoalConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl NavSimConfig {
    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(
            &fs::read_to_string(&path).map_err(|e| Error::NoFile(path.as_ref().to_owned(), e))?,
            &path,
        )
    }

    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self, Error> {
        toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.as_ref().to_owned(), e))
    }
}
