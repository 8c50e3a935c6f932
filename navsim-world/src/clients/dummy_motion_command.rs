use std::sync::Mutex;

use crate::{error::Result, traits::MotionCommand};

/// Dummy MotionCommand that records every command it receives.
#[derive(Debug, Default)]
pub struct DummyMotionCommand {
    commands: Mutex<Vec<(f64, f64)>>,
}

impl DummyMotionCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Received `(rotation, translation)` pairs in order.
    pub fn commands(&self) -> Vec<(f64, f64)> {
        self.commands.lock().unwrap().clone()
    }
}

impl MotionCommand for DummyMotionCommand {
    fn move_robot(&self, rotation: f64, translation: f64) -> Result<()> {
        self.commands.lock().unwrap().push((rotation, translation));
        Ok(())
    }
}
