mod dummy_localization;
mod dummy_motion_command;
mod dummy_obstacle_sensor;

pub use dummy_localization::*;
pub use dummy_motion_command::*;
pub use dummy_obstacle_sensor::*;
