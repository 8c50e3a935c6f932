use auto_impl::auto_impl;

use crate::error::Result;

#[auto_impl(&, Box, Arc)]
pub trait MotionCommand: Send + Sync {
    /// Rotate by `rotation` radians, then move `translation` along the new heading.
    fn move_robot(&self, rotation: f64, translation: f64) -> Result<()>;
}
