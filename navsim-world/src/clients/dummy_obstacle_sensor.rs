use std::sync::Mutex;

use nalgebra::Point2;

use crate::{error::Result, traits::ObstacleSensor};

/// Dummy ObstacleSensor returning a fixed set of readings.
#[derive(Debug, Default)]
pub struct DummyObstacleSensor {
    readings: Mutex<Vec<Point2<f64>>>,
}

impl DummyObstacleSensor {
    pub fn new(readings: Vec<Point2<f64>>) -> Self {
        Self {
            readings: Mutex::new(readings),
        }
    }

    pub fn set_readings(&self, readings: Vec<Point2<f64>>) {
        *self.readings.lock().unwrap() = readings;
    }
}

impl ObstacleSensor for DummyObstacleSensor {
    fn latest_readings(&self) -> Result<Vec<Point2<f64>>> {
        Ok(self.readings.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let sensor = DummyObstacleSensor::default();
        assert!(sensor.latest_readings().unwrap().is_empty());
        sensor.set_readings(vec![Point2::new(1.0, 2.0)]);
        assert_eq!(sensor.latest_readings().unwrap(), vec![Point2::new(1.0, 2.0)]);
    }
}
