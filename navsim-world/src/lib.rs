//! # navsim-world
//!
//! The query surface a motion planner uses to look at the world, and a
//! simulated world that implements it.
//!
//! Transforms follow one convention everywhere: a robot pose is stored as the
//! transform that maps world coordinates *into* the robot frame.

mod clients;
mod error;
mod sim_world;
mod traits;
mod transform;

pub use clients::*;
pub use error::*;
pub use sim_world::*;
pub use traits::*;
pub use transform::*;

// re-export
pub use nalgebra::{Isometry2, Point2, Vector2};
