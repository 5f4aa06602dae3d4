use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::grid::DEFAULT_MONTH_EVENT_CAP;
use crate::provider::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "HERON_CONFIG_FILE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub name: Option<String>,
    pub path: PathBuf,
}

fn default_month_event_cap() -> usize {
    DEFAULT_MONTH_EVENT_CAP
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collections: Vec<CollectionSpec>,
    #[serde(default = "default_month_event_cap")]
    pub month_event_cap: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            collections: Vec::new(),
            month_event_cap: DEFAULT_MONTH_EVENT_CAP,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::new(ErrorKind::ConfigParse, &e.to_string()))
    }
}

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("heron").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".heron.toml"));
    }

    locations
}

/// Loads the explicitly given config file, or the first one found in the
/// usual locations. No config file at all is not an error; defaults apply.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    for location in find_configfile_locations() {
        if location.is_file() {
            return Config::load(&location);
        }
    }

    Ok(Config::default())
}
