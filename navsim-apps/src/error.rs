use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("navsim-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("navsim-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("navsim-apps: navsim-planner: {:?}", .0)]
    Planner(#[from] navsim_planner::Error),
    #[error("navsim-apps: navsim-world: {:?}", .0)]
    World(#[from] navsim_world::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
