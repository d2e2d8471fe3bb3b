//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

/// Layered configuration loaded from defaults, the user config file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub acme: Acme,
    #[serde(default)]
    pub tool: Tool,
}

/// Where to find Acme and the current window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Acme {
    #[serde(default)]
    mount: Option<PathBuf>,
    #[serde(default)]
    window_env: Option<String>,
}

impl Acme {
    fn default_mount() -> PathBuf {
        PathBuf::from("/mnt/acme")
    }

    fn default_window_env() -> &'static str {
        "winid"
    }

    pub fn mount(&self) -> PathBuf {
        self.mount.clone().unwrap_or_else(Self::default_mount)
    }

    pub fn window_env(&self) -> String {
        self.window_env
            .clone()
            .unwrap_or_else(|| Self::default_window_env().to_owned())
    }
}

/// The analysis tool Guru hands the selection to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tool {
    #[serde(default)]
    program: Option<String>,
}

impl Tool {
    fn default_program() -> &'static str {
        "oracle"
    }

    pub fn program(&self) -> String {
        self.program
            .clone()
            .unwrap_or_else(|| Self::default_program().to_owned())
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    tool: Option<String>,
    mount: Option<PathBuf>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            tool: env::var("GURU_TOOL").ok().filter(|value| !value.is_empty()),
            mount: env::var_os("GURU_ACME_MOUNT")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
        }
    }

    #[cfg(test)]
    fn for_tests(tool: &str, mount: &str) -> Self {
        Self {
            tool: Some(tool.to_owned()),
            mount: Some(PathBuf::from(mount)),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the user config file, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        Self::load_with_layers(global_config_path(), env)
    }

    fn load_with_layers(global: Option<PathBuf>, env_overrides: EnvOverrides) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading user config");
            layers.push(Self::from_file(&global_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            acme: merge_acme(self.acme, other.acme),
            tool: merge_tool(self.tool, other.tool),
        }
    }
}

fn merge_acme(mut base: Acme, overlay: Acme) -> Acme {
    if let Some(value) = overlay.mount {
        base.mount = Some(value);
    }
    if let Some(value) = overlay.window_env {
        base.window_env = Some(value);
    }
    base
}

fn merge_tool(mut base: Tool, overlay: Tool) -> Tool {
    if let Some(value) = overlay.program {
        base.program = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("guru/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(tool) = env.tool {
        config.tool.program = Some(tool);
    }
    if let Some(mount) = env.mount {
        config.acme.mount = Some(mount);
    }
    config
}
