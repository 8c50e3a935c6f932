use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::{Error, NavSimConfig};

const NAVSIM_CONFIG_ENV_NAME: &str = "NAVSIM_CONFIG_PATH";
const DEFAULT_LOG_DIRECTIVES: &str = "navsim=info,navsim_apps=info,navsim_planner=info,navsim_world=info";

/// Get config path from input or env NAVSIM_CONFIG_PATH
pub fn get_navsim_config_path(config_path: Option<PathBuf>) -> Option<PathBuf> {
    if config_path.is_some() {
        config_path
    } else {
        std::env::var(NAVSIM_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {s} is used ###");
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Load the config file if any, defaults otherwise.
pub fn resolve_navsim_config(config_path: Option<PathBuf>) -> Result<NavSimConfig, Error> {
    match get_navsim_config_path(config_path) {
        Some(path) => NavSimConfig::try_new(path),
        None => Ok(NavSimConfig::default()),
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES)),
        )
        .init();
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_get_navsim_config_path() {
        let path = get_navsim_config_path(Some(PathBuf::from("a.toml")));
        assert_eq!(path.unwrap(), PathBuf::from("a.toml"));

        std::env::set_var(NAVSIM_CONFIG_ENV_NAME, "b.toml");
        let path = get_navsim_config_path(Some(PathBuf::from("a.toml")));
        assert_eq!(path.unwrap(), PathBuf::from("a.toml"));
        let path = get_navsim_config_path(None);
        assert_eq!(path.unwrap(), PathBuf::from("b.toml"));
        std::env::remove_var(NAVSIM_CONFIG_ENV_NAME);

        let path = get_navsim_config_path(None);
        assert!(path.is_none());
    }

    #[test]
    fn test_resolve_navsim_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[run]\nmax_steps = 7").unwrap();
        let config = resolve_navsim_config(Some(file.path().to_owned())).unwrap();
        assert_eq!(config.run.max_steps, 7);
    }
}
