//! Command line driver for navsim: configuration, tracing setup and the
//! plan/act loop on top of the simulated world.

mod error;
mod navigator;
mod navsim_config;
pub mod utils;

pub use crate::{error::*, navigator::*, navsim_config::*};
