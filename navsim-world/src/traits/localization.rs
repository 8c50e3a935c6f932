use auto_impl::auto_impl;
use nalgebra::Isometry2;

use crate::error::Result;

/// Source of the robot pose estimate.
#[auto_impl(&, Box, Arc)]
pub trait Localization: Send + Sync {
    /// Latest estimate of the transform mapping world coordinates into the robot frame.
    fn current_transform(&self) -> Result<Isometry2<f64>>;
}
