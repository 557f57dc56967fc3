//! Configuration model for fishscope

use serde::{Deserialize, Serialize};

/// fishscope configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FishscopeConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Resolver settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AnalysisConfig {
    /// Names treated as builtins on top of fish's own builtin list
    #[serde(default)]
    pub extra_builtins: Vec<String>,
}

/// Function search path settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// Directories searched for `<name>.fish` when a command is not local
    #[serde(default = "defaults::function_paths")]
    pub function_paths: Vec<String>,

    /// Also search `$PATH`
    #[serde(default = "defaults::include_env_path")]
    pub include_env_path: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            function_paths: defaults::function_paths(),
            include_env_path: defaults::include_env_path(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "defaults::pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: defaults::pretty(),
        }
    }
}

mod defaults {
    // Paths
    pub fn function_paths() -> Vec<String> {
        vec![
            "~/.config/fish/functions".to_string(),
            "/usr/share/fish/functions".to_string(),
        ]
    }
    pub fn include_env_path() -> bool {
        false
    }

    // Output
    pub fn pretty() -> bool {
        false
    }
}
