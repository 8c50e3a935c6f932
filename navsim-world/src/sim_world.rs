use std::{f64::consts::PI, sync::Mutex};

use nalgebra::{Isometry2, Point2, Vector2};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    traits::{Localization, MotionCommand, ObstacleSensor},
    transform::{pose_to_transform, transform_rotate_first, transform_to_pose, Pose},
};

/// Straight wall segment in the world frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Wall {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

impl Wall {
    pub fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        Self { start, end }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SimWorldConfig {
    /// Number of lidar rays spread evenly over a full turn. `0` disables the lidar.
    #[serde(default = "default_lidar_num_rays")]
    pub lidar_num_rays: usize,
    #[serde(default = "default_lidar_max_range")]
    pub lidar_max_range: f64,
    /// Landmarks further away than this are not reported.
    #[serde(default = "default_landmark_range")]
    pub landmark_range: f64,
    /// Standard deviation of the odometry error, relative to the commanded motion.
    #[serde(default = "default_odom_noise")]
    pub odom_noise: f64,
    /// Standard deviation of the GPS-like pose estimate (meters and radians).
    #[serde(default = "default_gps_noise")]
    pub gps_noise: f64,
    /// Standard deviation of lidar and landmark readings (meters).
    #[serde(default = "default_sensor_noise")]
    pub sensor_noise: f64,
    #[serde(default)]
    pub seed: u64,
    /// Point landmarks in the world frame.
    #[serde(default = "default_landmarks")]
    pub landmarks: Vec<[f64; 2]>,
    /// Ground truth pose at time zero, in the world frame.
    #[serde(default)]
    pub initial_pose: Pose,
    #[serde(default = "default_walls")]
    pub walls: Vec<Wall>,
}

fn default_landmarks() -> Vec<[f64; 2]> {
    vec![[20.0, 3.0]]
}

fn default_walls() -> Vec<Wall> {
    vec![
        Wall::new([3.0, -1.0], [3.0, 2.5]),
        Wall::new([6.0, 3.5], [6.0, 8.0]),
        Wall::new([6.0, 3.5], [8.0, 3.5]),
    ]
}

fn default_lidar_num_rays() -> usize {
    72
}

fn default_lidar_max_range() -> f64 {
    4.0
}

fn default_landmark_range() -> f64 {
    30.0
}

fn default_odom_noise() -> f64 {
    0.02
}

fn default_gps_noise() -> f64 {
    0.0
}

fn default_sensor_noise() -> f64 {
    0.0
}

impl Default for SimWorldConfig {
    fn default() -> Self {
        Self {
            initial_pose: Pose::default(),
            landmarks: default_landmarks(),
            walls: default_walls(),
            lidar_num_rays: default_lidar_num_rays(),
            lidar_max_range: default_lidar_max_range(),
            landmark_range: default_landmark_range(),
            odom_noise: default_odom_noise(),
            gps_noise: default_gps_noise(),
            sensor_noise: default_sensor_noise(),
            seed: 0,
        }
    }
}

fn normal(name: &str, std_dev: f64) -> Result<Normal<f64>> {
    if std_dev < 0.0 || std_dev.is_nan() {
        return Err(Error::InvalidConfig(format!(
            "{name} must not be negative but {std_dev}"
        )));
    }
    Normal::new(0.0, std_dev)
        .map_err(|e| Error::InvalidConfig(format!("{name}={std_dev} ({e})")))
}

#[derive(Debug)]
struct Noise {
    odom: Normal<f64>,
    gps: Normal<f64>,
    sensor: Normal<f64>,
}

#[derive(Debug)]
struct SimState {
    rng: StdRng,
    landmarks: Vec<Point2<f64>>,
    truth: Vec<Isometry2<f64>>,
    odom: Vec<Isometry2<f64>>,
    gps: Vec<Isometry2<f64>>,
    landmark_bag: Vec<Vec<Point2<f64>>>,
    lidar_bag: Vec<Vec<Point2<f64>>>,
}

/// Simulated robot in a 2D world of walls and point landmarks.
///
/// Every call to [`MotionCommand::move_robot`] advances the simulation by one
/// step and takes a new set of sensor readings.
#[derive(Debug)]
pub struct SimWorld {
    config: SimWorldConfig,
    noise: Noise,
    state: Mutex<SimState>,
}

impl SimWorld {
    pub fn new(config: SimWorldConfig) -> Result<Self> {
        if config.lidar_max_range <= 0.0 || config.lidar_max_range.is_nan() {
            return Err(Error::InvalidConfig(format!(
                "lidar_max_range must be positive but {}",
                config.lidar_max_range
            )));
        }
        if config.landmark_range < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "landmark_range must not be negative but {}",
                config.landmark_range
            )));
        }
        let noise = Noise {
            odom: normal("odom_noise", config.odom_noise)?,
            gps: normal("gps_noise", config.gps_noise)?,
            sensor: normal("sensor_noise", config.sensor_noise)?,
        };
        let start = pose_to_transform(&config.initial_pose);
        let state = SimState {
            rng: StdRng::seed_from_u64(config.seed),
            landmarks: config
                .landmarks
                .iter()
                .map(|p| Point2::new(p[0], p[1]))
                .collect(),
            truth: vec![start],
            odom: vec![start],
            gps: vec![],
            landmark_bag: vec![],
            lidar_bag: vec![],
        };
        let world = Self {
            config,
            noise,
            state: Mutex::new(state),
        };
        world.read_sensors(&mut world.state.lock().unwrap());
        Ok(world)
    }

    pub fn config(&self) -> &SimWorldConfig {
        &self.config
    }

    /// Add a landmark. It shows up in the readings from the next step on.
    pub fn add_landmark(&self, x: f64, y: f64) {
        self.state.lock().unwrap().landmarks.push(Point2::new(x, y));
    }

    pub fn landmarks(&self) -> Vec<Point2<f64>> {
        self.state.lock().unwrap().landmarks.clone()
    }

    /// Number of motion steps simulated so far.
    pub fn num_steps(&self) -> usize {
        self.state.lock().unwrap().truth.len() - 1
    }

    pub fn ground_truth(&self) -> Vec<Isometry2<f64>> {
        self.state.lock().unwrap().truth.clone()
    }

    pub fn odometry(&self) -> Vec<Isometry2<f64>> {
        self.state.lock().unwrap().odom.clone()
    }

    pub fn gps(&self) -> Vec<Isometry2<f64>> {
        self.state.lock().unwrap().gps.clone()
    }

    /// Ground truth pose of the robot in the world frame.
    pub fn true_pose(&self) -> Pose {
        let state = self.state.lock().unwrap();
        transform_to_pose(last(&state.truth), 0.0)
    }

    /// Landmark readings for every time step, in the robot frame of that step.
    pub fn landmark_bag(&self) -> Vec<Vec<Point2<f64>>> {
        self.state.lock().unwrap().landmark_bag.clone()
    }

    /// Lidar hit points for every time step, in the robot frame of that step.
    pub fn lidar_bag(&self) -> Vec<Vec<Point2<f64>>> {
        self.state.lock().unwrap().lidar_bag.clone()
    }

    fn read_sensors(&self, state: &mut SimState) {
        let truth = *last(&state.truth);

        let pose = transform_to_pose(&truth, 0.0);
        let noisy = Pose::new(
            pose.x + self.noise.gps.sample(&mut state.rng),
            pose.y + self.noise.gps.sample(&mut state.rng),
            pose.heading + self.noise.gps.sample(&mut state.rng),
        );
        state.gps.push(pose_to_transform(&noisy));

        let mut landmark_readings = vec![];
        for landmark in &state.landmarks {
            let reading = truth * landmark;
            if reading.coords.norm() <= self.config.landmark_range {
                landmark_readings.push(reading);
            }
        }
        for reading in &mut landmark_readings {
            reading.x += self.noise.sensor.sample(&mut state.rng);
            reading.y += self.noise.sensor.sample(&mut state.rng);
        }
        state.landmark_bag.push(landmark_readings);

        let mut scan = self.lidar_scan(&truth);
        for hit in &mut scan {
            hit.x += self.noise.sensor.sample(&mut state.rng);
            hit.y += self.noise.sensor.sample(&mut state.rng);
        }
        state.lidar_bag.push(scan);
    }

    /// Cast the lidar rays from the robot at `truth` against all walls.
    fn lidar_scan(&self, truth: &Isometry2<f64>) -> Vec<Point2<f64>> {
        let num_rays = self.config.lidar_num_rays;
        let origin = truth.inverse_transform_point(&Point2::origin());
        let mut hits = vec![];
        for i in 0..num_rays {
            let angle = 2.0 * PI * i as f64 / num_rays as f64;
            let direction =
                truth.inverse_transform_vector(&Vector2::new(angle.cos(), angle.sin()));
            let nearest = self
                .config
                .walls
                .iter()
                .filter_map(|wall| ray_hits_wall(&origin, &direction, wall))
                .filter(|t| *t <= self.config.lidar_max_range)
                .min_by(|a, b| a.total_cmp(b));
            if let Some(t) = nearest {
                hits.push(truth * (origin + direction * t));
            }
        }
        hits
    }
}

fn last(history: &[Isometry2<f64>]) -> &Isometry2<f64> {
    // histories are created non-empty and only grow
    &history[history.len() - 1]
}

/// Distance along the unit `direction` at which the ray meets `wall`.
fn ray_hits_wall(origin: &Point2<f64>, direction: &Vector2<f64>, wall: &Wall) -> Option<f64> {
    let a = Point2::new(wall.start[0], wall.start[1]);
    let edge = Point2::new(wall.end[0], wall.end[1]) - a;
    let denom = direction.perp(&edge);
    if denom.abs() < 1e-12 {
        return None;
    }
    let to_start = a - origin;
    let t = to_start.perp(&edge) / denom;
    let s = to_start.perp(direction) / denom;
    (t >= 0.0 && (0.0..=1.0).contains(&s)).then_some(t)
}

impl Localization for SimWorld {
    fn current_transform(&self) -> Result<Isometry2<f64>> {
        let state = self.state.lock().unwrap();
        state.gps.last().copied().ok_or_else(|| Error::Uninitialized {
            message: "no pose estimate has been taken yet".to_owned(),
        })
    }
}

impl ObstacleSensor for SimWorld {
    fn latest_readings(&self) -> Result<Vec<Point2<f64>>> {
        let state = self.state.lock().unwrap();
        let mut readings = state.lidar_bag.last().cloned().unwrap_or_default();
        readings.extend(state.landmark_bag.last().into_iter().flatten());
        Ok(readings)
    }
}

impl MotionCommand for SimWorld {
    fn move_robot(&self, rotation: f64, translation: f64) -> Result<()> {
        let mut state = self.state.lock().unwrap();

        let truth = transform_rotate_first(translation, 0.0, rotation) * last(&state.truth);
        state.truth.push(truth);

        let odom_rotation = rotation + self.noise.odom.sample(&mut state.rng) * rotation.abs();
        let odom_translation =
            translation + self.noise.odom.sample(&mut state.rng) * translation.abs();
        let odom = transform_rotate_first(odom_translation, 0.0, odom_rotation) * last(&state.odom);
        state.odom.push(odom);

        self.read_sensors(&mut state);
        debug!(
            rotation,
            translation,
            step = state.truth.len() - 1,
            "moved simulated robot"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn quiet_config() -> SimWorldConfig {
        SimWorldConfig {
            odom_noise: 0.0,
            gps_noise: 0.0,
            sensor_noise: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_move_robot() {
        let world = SimWorld::new(SimWorldConfig {
            walls: vec![],
            ..quiet_config()
        })
        .unwrap();
        assert_eq!(world.num_steps(), 0);
        world.move_robot(FRAC_PI_2, 0.0).unwrap();
        world.move_robot(0.0, 1.0).unwrap();
        assert_eq!(world.num_steps(), 2);

        let pose = world.true_pose();
        assert_approx_eq!(pose.x, 0.0);
        assert_approx_eq!(pose.y, 1.0);
        assert_approx_eq!(pose.heading, FRAC_PI_2);

        let estimate = transform_to_pose(&world.current_transform().unwrap(), 0.0);
        assert_approx_eq!(estimate.x, pose.x);
        assert_approx_eq!(estimate.y, pose.y);
        assert_eq!(world.gps().len(), 3);
        assert_eq!(world.odometry().len(), 3);
    }

    #[test]
    fn test_landmark_readings_in_robot_frame() {
        let world = SimWorld::new(SimWorldConfig {
            landmarks: vec![[2.0, 0.0]],
            walls: vec![],
            initial_pose: Pose::new(0.0, 0.0, FRAC_PI_2),
            ..quiet_config()
        })
        .unwrap();
        let readings = world.latest_readings().unwrap();
        assert_eq!(readings.len(), 1);
        // the landmark is on the right hand side of the robot
        assert_approx_eq!(readings[0].x, 0.0);
        assert_approx_eq!(readings[0].y, -2.0);

        world.add_landmark(-1.0, 0.0);
        world.add_landmark(50.0, 0.0);
        assert_eq!(world.landmarks().len(), 3);
        assert_eq!(world.latest_readings().unwrap().len(), 1);
        world.move_robot(0.0, 0.0).unwrap();
        // the far one is out of landmark_range
        assert_eq!(world.latest_readings().unwrap().len(), 2);
    }

    #[test]
    fn test_lidar_hits_wall() {
        let world = SimWorld::new(SimWorldConfig {
            landmarks: vec![],
            walls: vec![Wall::new([1.0, -1.0], [1.0, 1.0])],
            lidar_num_rays: 4,
            ..quiet_config()
        })
        .unwrap();
        let readings = world.latest_readings().unwrap();
        assert_eq!(readings.len(), 1);
        assert_approx_eq!(readings[0].x, 1.0);
        assert_approx_eq!(readings[0].y, 0.0);

        world.move_robot(0.0, 0.5).unwrap();
        let readings = world.latest_readings().unwrap();
        assert_approx_eq!(readings[0].x, 0.5);
        assert_eq!(world.lidar_bag().len(), 2);
        assert_eq!(world.landmark_bag().len(), 2);
    }

    #[test]
    fn test_lidar_max_range() {
        let world = SimWorld::new(SimWorldConfig {
            landmarks: vec![],
            walls: vec![Wall::new([5.0, -1.0], [5.0, 1.0])],
            lidar_max_range: 4.0,
            ..quiet_config()
        })
        .unwrap();
        assert!(world.latest_readings().unwrap().is_empty());
    }

    #[test]
    fn test_ray_hits_wall() {
        let wall = Wall::new([2.0, -1.0], [2.0, 1.0]);
        let origin = Point2::origin();
        assert_approx_eq!(
            ray_hits_wall(&origin, &Vector2::new(1.0, 0.0), &wall).unwrap(),
            2.0
        );
        assert!(ray_hits_wall(&origin, &Vector2::new(-1.0, 0.0), &wall).is_none());
        assert!(ray_hits_wall(&origin, &Vector2::new(0.0, 1.0), &wall).is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(SimWorld::new(SimWorldConfig {
            odom_noise: -1.0,
            ..Default::default()
        })
        .is_err());
        assert!(SimWorld::new(SimWorldConfig {
            gps_noise: -0.1,
            ..Default::default()
        })
        .is_err());
        assert!(SimWorld::new(SimWorldConfig {
            sensor_noise: f64::NAN,
            ..Default::default()
        })
        .is_err());
        assert!(SimWorld::new(SimWorldConfig {
            odom_noise: 0.0,
            gps_noise: 0.0,
            sensor_noise: 0.0,
            ..Default::default()
        })
        .is_ok());
        assert!(SimWorld::new(SimWorldConfig {
            lidar_max_range: 0.0,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let config: SimWorldConfig = toml::from_str(
            r#"
seed = 3
landmarks = [[1.0, 2.0]]

[initial_pose]
x = 1.0
y = 2.0
"#,
        )
        .unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.landmarks, vec![[1.0, 2.0]]);
        assert_approx_eq!(config.initial_pose.heading, 0.0);
        assert_eq!(config.walls, default_walls());
        assert!(toml::from_str::<SimWorldConfig>("unknown = 1").is_err());
    }
}
