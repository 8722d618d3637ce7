use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

static DEFAULT_SETTINGS_NAME: &str = "company.json";
static ENV_SETTINGS_PATH: &str = "LINECOLS_SETTINGS";
static FALLBACK_DIR_NAME: &str = ".linecols";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "linecols", "linecols"));

#[derive(Debug, Clone)]
pub struct AppConfig {
    settings_path: PathBuf,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the company settings path using the provided
    /// override, environment variables, and platform defaults. Nothing is created on disk.
    pub fn discover(settings_override: Option<PathBuf>) -> Result<Self> {
        let settings_path = resolve_settings_path(settings_override)?;
        Ok(Self::from_settings_path(settings_path))
    }

    /// Construct [`AppConfig`] directly from a known settings document path.
    pub fn from_settings_path(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }
}

fn resolve_settings_path(settings_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = settings_override {
        return Ok(path);
    }

    if let Ok(env_path) = env::var(ENV_SETTINGS_PATH) {
        if !env_path.trim().is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.config_dir().join(DEFAULT_SETTINGS_NAME));
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base
            .home_dir()
            .join(FALLBACK_DIR_NAME)
            .join(DEFAULT_SETTINGS_NAME));
    }

    Ok(env::current_dir()?
        .join(FALLBACK_DIR_NAME)
        .join(DEFAULT_SETTINGS_NAME))
}
