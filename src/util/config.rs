//! Configuration file support for imageref.
//!
//! The configuration is read from (first match wins):
//! - The path given with `--config`
//! - `imageref.toml` in the working directory
//! - Built-in defaults
//!
//! Everything the page needs besides the contracts themselves lives here:
//! link templates, architecture section headers, excluded devices and the
//! per-architecture tag overrides.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::resolver::MatchMode;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "imageref.toml";

/// Default contract repository.
pub const DEFAULT_CONTRACTS_URL: &str = "https://github.com/balena-io/contracts";

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`urls.{field}` is not a valid URL: `{value}`")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no architecture headers configured")]
    NoHeaders,

    #[error("architecture `{0}` has more than one header")]
    DuplicateHeader(String),
}

/// imageref configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How identifiers are looked up in raw contract text
    pub match_mode: MatchMode,

    /// Devices that never appear on the page
    pub exclude: Vec<String>,

    /// Contract repository location
    pub repository: RepositoryConfig,

    /// Page front matter
    pub page: PageConfig,

    /// Link templates
    pub urls: UrlConfig,

    /// Page sections, one per architecture, in output order
    pub headers: Vec<ArchHeader>,

    /// Explicit enumeration lists
    pub catalog: CatalogConfig,

    /// Tags to drop per architecture and OS (`arch -> os -> tag`)
    pub incompatible: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            match_mode: MatchMode::default(),
            exclude: Vec::new(),
            repository: RepositoryConfig::default(),
            page: PageConfig::default(),
            urls: UrlConfig::default(),
            headers: default_headers(),
            catalog: CatalogConfig::default(),
            incompatible: BTreeMap::new(),
        }
    }
}

/// Where the contract repository lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository root (the directory containing `contracts/`)
    pub path: PathBuf,

    /// Git remote used by `imageref fetch`
    pub url: String,

    /// Branch checked out by `imageref fetch`
    pub branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            path: PathBuf::from("contracts"),
            url: DEFAULT_CONTRACTS_URL.to_string(),
            branch: "master".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub excerpt: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            title: "Base Image List".to_string(),
            excerpt: "List of available base images and tags".to_string(),
        }
    }
}

/// Prefixes the image names and links are built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    /// Docker image name prefix (e.g. `balenalib/`)
    pub image_base: String,

    /// Docker Hub repository prefix
    pub docker_base: String,

    /// GitHub tree for device base images
    pub device_base: String,

    /// GitHub tree for language images
    pub lang_base: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        UrlConfig {
            image_base: "balenalib/".to_string(),
            docker_base: "https://hub.docker.com/r/balenalib/".to_string(),
            device_base: "https://github.com/balena-io-library/base-images/tree/master/balena-base-images/device-base/".to_string(),
            lang_base: "https://github.com/balena-io-library/base-images/tree/master/balena-base-images/".to_string(),
        }
    }
}

/// A page section heading for one architecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchHeader {
    pub arch: String,
    pub label: String,
}

impl ArchHeader {
    pub fn new(arch: impl Into<String>, label: impl Into<String>) -> Self {
        ArchHeader {
            arch: arch.into(),
            label: label.into(),
        }
    }
}

/// Explicit lists; `None` means discover from the contract repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub devices: Option<Vec<String>>,
    pub architectures: Option<Vec<String>>,
    pub operating_systems: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
}

fn default_headers() -> Vec<ArchHeader> {
    vec![
        ArchHeader::new("aarch64", "ARM v8"),
        ArchHeader::new("armv7hf", "ARM v7"),
        ArchHeader::new("rpi", "ARM v6"),
        ArchHeader::new("amd64", "x86-64"),
        ArchHeader::new("i386", "x86"),
    ]
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Parse and validate configuration text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Locate and load the configuration.
    ///
    /// An explicit path must exist; otherwise `imageref.toml` in `cwd` is
    /// used when present, and the defaults when it is not.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let project = cwd.join(CONFIG_FILE);
        if project.exists() {
            tracing::debug!("using config {}", project.display());
            Self::load(&project)
        } else {
            tracing::debug!("no {} found, using defaults", CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Check the parts of the configuration that cannot be typed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.headers.is_empty() {
            return Err(ConfigError::NoHeaders);
        }

        let mut seen = std::collections::BTreeSet::new();
        for header in &self.headers {
            if !seen.insert(header.arch.as_str()) {
                return Err(ConfigError::DuplicateHeader(header.arch.clone()));
            }
        }

        // image_base is a docker image prefix, not a URL
        for (field, value) in [
            ("docker_base", &self.urls.docker_base),
            ("device_base", &self.urls.device_base),
            ("lang_base", &self.urls.lang_base),
        ] {
            if value.starts_with("http://") || value.starts_with("https://") {
                Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
                    field,
                    value: value.clone(),
                    source,
                })?;
            }
        }

        Ok(())
    }

    /// Architectures with a page section, in output order.
    pub fn header_arches(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|h| h.arch.as_str())
    }

    pub fn is_excluded(&self, device: &str) -> bool {
        self.exclude.iter().any(|d| d == device)
    }

    /// Tag to drop for `os` images on `arch`, if any.
    pub fn tag_override(&self, arch: &str, os: &str) -> Option<&str> {
        self.incompatible
            .get(arch)
            .and_then(|by_os| by_os.get(os))
            .map(String::as_str)
    }
}
