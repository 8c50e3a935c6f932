use std::f64::consts::PI;

use nalgebra::{Isometry2, Point2, Vector2};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Robot position and heading in some frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, counter-clockwise from the x axis.
    #[serde(default)]
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Transform of a robot that turns by `theta` and then moves by `(x, y)` in
/// its turned frame.
///
/// The result maps coordinates of the old robot frame into the new one.
///
/// ```
/// use nalgebra::Point2;
/// let tf = navsim_world::transform_rotate_first(1.0, 0.0, std::f64::consts::FRAC_PI_2);
/// let p = tf * Point2::new(0.0, 1.0);
/// assert!(p.x.abs() < 1e-12);
/// assert!(p.y.abs() < 1e-12);
/// ```
pub fn transform_rotate_first(x: f64, y: f64, theta: f64) -> Isometry2<f64> {
    Isometry2::new(Vector2::new(-x, -y), -theta)
}

/// Transform of a robot that moves by `(x, y)` and then turns by `theta`.
pub fn transform_translate_first(x: f64, y: f64, theta: f64) -> Isometry2<f64> {
    transform_rotate_first(0.0, 0.0, theta) * transform_rotate_first(x, y, 0.0)
}

/// Transform mapping frame coordinates into the frame of a robot at `pose`.
pub fn pose_to_transform(pose: &Pose) -> Isometry2<f64> {
    transform_translate_first(pose.x, pose.y, pose.heading)
}

/// Inverse of [`pose_to_transform`].
///
/// The heading is unwrapped so that it lies within `PI` of `reference_heading`.
pub fn transform_to_pose(transform: &Isometry2<f64>, reference_heading: f64) -> Pose {
    let position = transform.inverse_transform_point(&Point2::origin());
    let heading = unwrap_heading(-transform.rotation.angle(), reference_heading);
    Pose::new(position.x, position.y, heading)
}

/// Shift `heading` by multiples of 2PI until it is within PI of `reference`.
pub fn unwrap_heading(heading: f64, reference: f64) -> f64 {
    let mut heading = heading;
    while heading < reference - PI {
        heading += 2.0 * PI;
    }
    while heading > reference + PI {
        heading -= 2.0 * PI;
    }
    heading
}

/// Apply `second` after `first`.
pub fn compose(second: &Isometry2<f64>, first: &Isometry2<f64>) -> Isometry2<f64> {
    second * first
}

pub fn invert(transform: &Isometry2<f64>) -> Isometry2<f64> {
    transform.inverse()
}

/// Convert a trajectory to poses, keeping headings continuous along it.
///
/// The first heading is unwrapped against zero.
pub fn transforms_to_poses(trajectory: &[Isometry2<f64>]) -> Vec<Pose> {
    let mut prev_heading = 0.0;
    trajectory
        .iter()
        .map(|tf| {
            let pose = transform_to_pose(tf, prev_heading);
            prev_heading = pose.heading;
            pose
        })
        .collect()
}
