use nalgebra::Isometry2;

use crate::{error::Result, traits::Localization};

/// Dummy Localization for debug or tests.
#[derive(Debug, Default)]
pub struct DummyLocalization {
    pub current_transform: Isometry2<f64>,
}

impl DummyLocalization {
    pub fn new() -> Self {
        Self {
            current_transform: Isometry2::identity(),
        }
    }
}

impl Localization for DummyLocalization {
    fn current_transform(&self) -> Result<Isometry2<f64>> {
        Ok(self.current_transform)
    }
}
