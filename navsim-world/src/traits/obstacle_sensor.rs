use auto_impl::auto_impl;
use nalgebra::Point2;

use crate::error::Result;

#[auto_impl(&, Box, Arc)]
pub trait ObstacleSensor: Send + Sync {
    /// Most recent batch of obstacle and landmark readings, expressed in the robot frame.
    ///
    /// An empty batch means nothing has been observed yet.
    fn latest_readings(&self) -> Result<Vec<Point2<f64>>>;
}
