//! Game configuration with environment overrides.
use std::{env, path::PathBuf};

use crate::{
    fov::DEFAULT_VIEW_RADIUS,
    map::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub view_radius: i32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Key script to replay headless instead of opening a terminal.
    pub script: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            view_radius: DEFAULT_VIEW_RADIUS,
            seed: None,
            script: None,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl GameConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DELVE_SEED` - RNG seed (default: random)
    /// - `DELVE_MAP_WIDTH` / `DELVE_MAP_HEIGHT` - map size (default: 80x44)
    /// - `DELVE_VIEW_RADIUS` - visibility radius (default: 10)
    /// - `DELVE_SCRIPT` - key script path for a headless replay
    /// - `DELVE_LOG_DIR` - log directory (default: `logs`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("DELVE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(width) = read_env::<i32>("DELVE_MAP_WIDTH") {
            config.map_width = width;
        }
        if let Some(height) = read_env::<i32>("DELVE_MAP_HEIGHT") {
            config.map_height = height;
        }
        if let Some(radius) = read_env::<i32>("DELVE_VIEW_RADIUS") {
            config.view_radius = radius.max(0);
        }
        if let Some(script) = read_env::<PathBuf>("DELVE_SCRIPT") {
            config.script = Some(script);
        }
        if let Some(dir) = read_env::<PathBuf>("DELVE_LOG_DIR") {
            config.log_dir = dir;
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_floor() {
        let config = GameConfig::default();
        assert_eq!((config.map_width, config.map_height), (80, 44));
        assert_eq!(config.view_radius, 10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn unset_variables_leave_defaults() {
        assert_eq!(read_env::<u64>("DELVE_TEST_UNSET_VARIABLE"), None);
        assert_eq!(GameConfig::default().with_seed(9).seed, Some(9));
    }
}
