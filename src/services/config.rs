//! Configuration service for fishscope

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::models::config::FishscopeConfig;

pub trait ConfigService: Send + Sync {
    fn load(&self, global_only: bool) -> Result<FishscopeConfig, ConfigError>;
    fn config_path(&self, global: bool) -> PathBuf;
    fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError>;
}

pub struct DefaultConfigService {
    root: PathBuf,
    global_path: PathBuf,
}

impl DefaultConfigService {
    pub fn new(root: &Path) -> Self {
        Self::with_global_path(root, Self::global_config_path())
    }

    pub fn with_global_path(root: &Path, global_path: PathBuf) -> Self {
        Self {
            root: root.to_path_buf(),
            global_path,
        }
    }

    fn global_config_path() -> PathBuf {
        // XDG standard: ~/.config/fishscope/config.toml
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fishscope")
            .join("config.toml")
    }

    fn project_config_path(&self) -> PathBuf {
        self.root.join(".fishscope").join("config.toml")
    }

    fn load_from_path(path: &Path) -> Result<Option<FishscopeConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    fn write_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let config = FishscopeConfig::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ConfigService for DefaultConfigService {
    fn load(&self, global_only: bool) -> Result<FishscopeConfig, ConfigError> {
        let global = Self::load_from_path(&self.global_path)?;
        if global_only {
            return Ok(global.unwrap_or_default());
        }

        let project = Self::load_from_path(&self.project_config_path())?;
        let config = match (global, project) {
            (Some(base), Some(overlay)) => merge_config(base, overlay),
            (base, overlay) => overlay.or(base).unwrap_or_default(),
        };
        apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    fn config_path(&self, global: bool) -> PathBuf {
        if global {
            self.global_path.clone()
        } else {
            self.project_config_path()
        }
    }

    fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError> {
        let path = self.config_path(global);

        if path.exists() && !force {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                message: format!(
                    "Config already exists: {}. Use --force to overwrite.",
                    path.display()
                ),
            });
        }

        Self::write_default_config(&path)?;
        Ok(path)
    }
}

/// Project settings win, except builtins which accumulate
fn merge_config(base: FishscopeConfig, overlay: FishscopeConfig) -> FishscopeConfig {
    let mut extra_builtins = base.analysis.extra_builtins;
    for name in overlay.analysis.extra_builtins {
        if !extra_builtins.contains(&name) {
            extra_builtins.push(name);
        }
    }

    FishscopeConfig {
        analysis: crate::models::config::AnalysisConfig { extra_builtins },
        paths: overlay.paths,
        output: overlay.output,
    }
}

fn apply_env_overrides<F>(mut config: FishscopeConfig, var: F) -> Result<FishscopeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = var("FISHSCOPE_OUTPUT_PRETTY") {
        config.output.pretty = parse_bool("FISHSCOPE_OUTPUT_PRETTY", &val)?;
    }
    if let Some(val) = var("FISHSCOPE_INCLUDE_ENV_PATH") {
        config.paths.include_env_path = parse_bool("FISHSCOPE_INCLUDE_ENV_PATH", &val)?;
    }
    if let Some(val) = var("FISHSCOPE_FUNCTION_PATHS") {
        config.paths.function_paths = std::env::split_paths(&val)
            .map(|p| p.display().to_string())
            .collect();
    }
    if let Some(val) = var("FISHSCOPE_EXTRA_BUILTINS") {
        config.analysis.extra_builtins = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }
    Ok(config)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{}'", value),
        }),
    }
}
