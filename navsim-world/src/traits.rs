mod localization;
mod motion_command;
mod obstacle_sensor;

pub use localization::*;
pub use motion_command::*;
pub use obstacle_sensor::*;
