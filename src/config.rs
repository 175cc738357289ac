use crate::error::BootstrapError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the project root when `--config` is not given.
pub const CONFIG_FILE: &str = "bootstrap.toml";

/// Configuration for the bootstrap run
///
/// Every section is optional in `bootstrap.toml`; missing fields keep the
/// defaults below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    pub dependency: DependencyConfig,
    pub env_file: EnvFileConfig,
    pub compose: ComposeConfig,
    pub git: GitConfig,
}

/// The sparse checkout of the third-party repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependencyConfig {
    pub url: String,
    /// Checkout directory, relative to the project root
    pub dir: String,
    /// The only subdirectory materialized by sparse checkout
    pub sparse_path: String,
    pub branch: String,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            url: "https://github.com/supabase/supabase.git".to_string(),
            dir: "supabase".to_string(),
            sparse_path: "docker".to_string(),
            branch: "master".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvFileConfig {
    pub source: String,
    /// Defaults to `<dependency.dir>/<dependency.sparse_path>/.env`
    pub destination: Option<String>,
}

impl Default for EnvFileConfig {
    fn default() -> Self {
        Self {
            source: ".env".to_string(),
            destination: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    pub program: String,
    pub file: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            program: "docker".to_string(),
            file: "docker-compose.yml".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

/// Absolute paths the run touches, resolved against the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub checkout_dir: PathBuf,
    pub env_source: PathBuf,
    pub env_destination: PathBuf,
    /// Passed to compose as given; compose runs from `root`
    pub compose_file: String,
}

impl BootstrapConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `<root>/bootstrap.toml` is
    /// used when present and the defaults otherwise.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, root.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml(&content).map_err(|message| BootstrapError::Config {
            path: path.clone(),
            message,
        })?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.message().to_string())
    }

    /// Resolve configured paths against `root`, expanding `~` and `$VAR`.
    ///
    /// A relative `root` is made absolute against the current directory.
    pub fn layout(&self, root: &Path) -> Result<Layout> {
        let root = &std::path::absolute(root)
            .with_context(|| format!("Failed to resolve project root {}", root.display()))?;
        let checkout_dir = resolve(root, &self.dependency.dir)?;
        let env_source = resolve(root, &self.env_file.source)?;
        let env_destination = match &self.env_file.destination {
            Some(dest) => resolve(root, dest)?,
            None => checkout_dir.join(&self.dependency.sparse_path).join(".env"),
        };
        let compose_file = expand(&self.compose.file)?;

        Ok(Layout {
            root: root.to_path_buf(),
            checkout_dir,
            env_source,
            env_destination,
            compose_file,
        })
    }
}

fn expand(raw: &str) -> Result<String> {
    shellexpand::full(raw)
        .map(|s| s.into_owned())
        .with_context(|| format!("Failed to expand path '{}'", raw))
}

fn resolve(root: &Path, raw: &str) -> Result<PathBuf> {
    let expanded = PathBuf::from(expand(raw)?);
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(root.join(expanded))
    }
}
