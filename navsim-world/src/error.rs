use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("navsim-world: Uninitialized : {}", message)]
    Uninitialized { message: String },
    #[error("navsim-world: Invalid config : {}", .0)]
    InvalidConfig(String),
    #[error("navsim-world: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
