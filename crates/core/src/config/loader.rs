use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        Self::load_with_vault(config_path, profile_override, None)
    }

    /// Load configuration, letting `vault_override` replace the profile's
    /// vault root.
    ///
    /// The override is shell-expanded like profile roots. With an override a
    /// missing config file is not an error and the selected profile need not
    /// exist; logging settings still come from the file when there is one.
    pub fn load_with_vault(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
        vault_override: Option<&Path>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        let active = |cf: Option<&ConfigFile>| {
            profile_override
                .map(ToOwned::to_owned)
                .or_else(|| cf.and_then(|cf| cf.profile.clone()))
                .unwrap_or_else(|| "default".to_string())
        };

        let vault_override = vault_override.map(|v| expand_path(&v.to_string_lossy())).transpose()?;

        if !path.exists() {
            return match vault_override {
                Some(vault_root) => Ok(ResolvedConfig {
                    active_profile: active(None),
                    vault_root,
                    logging: LoggingConfig::default(),
                }),
                None => Err(ConfigError::NotFound(path.display().to_string())),
            };
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        let active = active(Some(&cf));

        let vault_root = match vault_override {
            Some(vault_root) => vault_root,
            None => {
                if cf.profiles.is_empty() {
                    return Err(ConfigError::NoProfiles);
                }
                let prof = cf
                    .profiles
                    .get(&active)
                    .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;
                expand_path(&prof.vault_root)?
            }
        };

        let logging = Self::resolve_logging(&cf.logging, &vault_root)?;

        Ok(ResolvedConfig { active_profile: active, vault_root, logging })
    }

    fn resolve_logging(
        log_cfg: &LoggingConfig,
        vault_root: &Path,
    ) -> Result<LoggingConfig, ConfigError> {
        let Some(ref file) = log_cfg.file else {
            return Ok(log_cfg.clone());
        };

        let sub = file.to_string_lossy().replace("{{vault_root}}", &vault_root.to_string_lossy());
        Ok(LoggingConfig {
            level: log_cfg.level.clone(),
            file_level: log_cfg.file_level.clone(),
            file: Some(expand_path(&sub)?),
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("notevault").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("notevault").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
