use {
    log::LevelFilter,
    serde::Deserialize,
    std::{io, path::Path},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read the config file")]
    Read(#[source] io::Error),
    #[error("Could not parse the config file")]
    Parse(#[source] serde_json::Error),
    #[error("`{0}` must be at least 1")]
    ZeroLimit(&'static str),
}

/// Server settings that affect the two managers.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_level: LevelFilter,
    /// Whether the `swc_background_manager` global is advertised.
    pub background_manager: bool,
    /// Whether the `swc_screenshot_manager` global is advertised.
    pub screenshot_manager: bool,
    pub max_objects_per_client: usize,
    pub max_backgrounds_per_client: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            background_manager: true,
            screenshot_manager: true,
            max_objects_per_client: 0x10000,
            max_backgrounds_per_client: 64,
        }
    }
}

impl Config {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(s).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Self::parse(&s)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_objects_per_client == 0 {
            return Err(ConfigError::ZeroLimit("max_objects_per_client"));
        }
        if self.max_backgrounds_per_client == 0 {
            return Err(ConfigError::ZeroLimit("max_backgrounds_per_client"));
        }
        Ok(())
    }
}
