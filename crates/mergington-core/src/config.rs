use crate::catalog::{self, Catalog};
use crate::error::Result;
use crate::registry::{CapacityPolicy, Registry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "mergington.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ---------------------------------------------------------------------------
// RegistryConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub enforce_capacity: bool,
    /// YAML seed catalog; the built-in catalog is used when unset.
    /// Relative paths resolve against the config file's directory.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerConfig::default(),
            registry: RegistryConfig::default(),
            base_dir: None,
        }
    }
}

impl Config {
    /// Load the config at `path`, falling back to defaults when the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&data)?;
        cfg.base_dir = path.parent().map(Path::to_path_buf);
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        let path = self.registry.catalog.as_ref()?;
        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path.clone()),
        }
    }

    /// The seed catalog this config selects.
    pub fn catalog(&self) -> Result<Catalog> {
        match self.catalog_path() {
            Some(path) => catalog::load(&path),
            None => Ok(catalog::default_catalog()),
        }
    }

    /// Fresh registry seeded from the configured catalog.
    pub fn build_registry(&self) -> Result<Registry> {
        let registry = Registry::new(self.catalog()?).with_capacity_policy(
            CapacityPolicy::from_enforce_flag(self.registry.enforce_capacity),
        );
        Ok(registry)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "server.port is 0: the OS will pick a free port".to_string(),
            });
        }

        if let Some(path) = self.catalog_path() {
            if !path.exists() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("registry.catalog not found: {}", path.display()),
                });
                return warnings;
            }
        }

        match self.catalog() {
            Ok(catalog) => {
                if catalog.is_empty() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: "catalog has no activities".to_string(),
                    });
                }
                if self.registry.enforce_capacity {
                    for (name, activity) in &catalog {
                        if activity.participants.len() > activity.max_participants as usize {
                            warnings.push(ConfigWarning {
                                level: WarnLevel::Warning,
                                message: format!(
                                    "'{name}' is seeded over capacity ({}/{})",
                                    activity.participants.len(),
                                    activity.max_participants
                                ),
                            });
                        }
                    }
                }
            }
            Err(e) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("catalog: {e}"),
            }),
        }

        warnings
    }
}
