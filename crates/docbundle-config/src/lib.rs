//! Configuration management for docbundle.
//!
//! Parses `docbundle.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `bundle.primary_branch`
//! - `repository.origin`
//! - `repository.branch`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Write the bundle to this exact path instead of the branch-derived name.
    pub output_file: Option<PathBuf>,
    /// Override the remote origin URL.
    pub origin: Option<String>,
    /// Override the branch name.
    pub branch: Option<String>,
    /// Override pretty-printed output.
    pub pretty: Option<bool>,
    /// Override placement of entries missing from a manifest.
    pub unlisted: Option<UnlistedOrder>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docbundle.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Bundle output configuration (paths are relative strings from TOML).
    bundle: BundleConfigRaw,
    /// Manifest ordering configuration.
    pub order: OrderConfig,
    /// Repository overrides.
    pub repository: RepositoryConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved bundle configuration (set after loading).
    #[serde(skip)]
    pub bundle_resolved: BundleConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    manifest: Option<String>,
    extension: Option<String>,
    entry_folder: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Root directory of the documentation tree.
    pub source_dir: PathBuf,
    /// Filename of per-directory ordering manifests.
    pub manifest: String,
    /// Extension (without dot) marking a file as a document.
    pub extension: String,
    /// URL segment for the docs root inside the hosted repository tree.
    ///
    /// `None` means "derive from `source_dir` relative to the repository root".
    pub entry_folder: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            manifest: DEFAULT_MANIFEST.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
            entry_folder: None,
        }
    }
}

const DEFAULT_MANIFEST: &str = "_order.yml";
const DEFAULT_EXTENSION: &str = "md";
const DEFAULT_PRIMARY_BRANCH: &str = "master";
const DEFAULT_RELEASE_NAME: &str = "bundle.json";
const DEFAULT_DEV_NAME: &str = "bundleDev.json";

/// Raw bundle configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BundleConfigRaw {
    output_dir: Option<String>,
    primary_branch: Option<String>,
    release_name: Option<String>,
    dev_name: Option<String>,
    pretty: Option<bool>,
}

/// Resolved bundle output configuration.
#[derive(Debug)]
pub struct BundleConfig {
    /// Directory the bundle is written into.
    pub output_dir: PathBuf,
    /// Exact output path, bypassing branch-derived naming.
    pub output_file: Option<PathBuf>,
    /// Branch that produces the release bundle.
    pub primary_branch: String,
    /// Bundle filename on the primary branch.
    pub release_name: String,
    /// Bundle filename on any other branch.
    pub dev_name: String,
    /// Pretty-print the JSON.
    pub pretty: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            output_file: None,
            primary_branch: DEFAULT_PRIMARY_BRANCH.to_owned(),
            release_name: DEFAULT_RELEASE_NAME.to_owned(),
            dev_name: DEFAULT_DEV_NAME.to_owned(),
            pretty: false,
        }
    }
}

impl BundleConfig {
    /// Path of the bundle file for the given branch.
    #[must_use]
    pub fn output_path(&self, branch: &str) -> PathBuf {
        if let Some(file) = &self.output_file {
            return file.clone();
        }
        let name = if branch == self.primary_branch {
            &self.release_name
        } else {
            &self.dev_name
        };
        self.output_dir.join(name)
    }
}

/// Where entries missing from a manifest are placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlistedOrder {
    /// Before all listed entries.
    #[default]
    First,
    /// After all listed entries.
    Last,
}

/// Manifest ordering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Placement of entries a manifest does not list.
    pub unlisted: UnlistedOrder,
}

/// Repository overrides.
///
/// When unset, values are looked up from the git repository.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Remote origin URL.
    pub origin: Option<String>,
    /// Current branch name.
    pub branch: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`repository.origin`").
        field: String,
        /// Error message (e.g., "${`CI_BRANCH`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a field to be a bare filename.
fn require_file_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{field} must be a file name, not a path"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docbundle.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Blank origin and branch overrides count as unset.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_file) = &settings.output_file {
            self.bundle_resolved.output_file = Some(output_file.clone());
        }
        if let Some(origin) = settings.origin.as_deref().and_then(expand::non_blank) {
            self.repository.origin = Some(origin);
        }
        if let Some(branch) = settings.branch.as_deref().and_then(expand::non_blank) {
            self.repository.branch = Some(branch);
        }
        if let Some(pretty) = settings.pretty {
            self.bundle_resolved.pretty = pretty;
        }
        if let Some(unlisted) = settings.unlisted {
            self.order.unlisted = unlisted;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            bundle: BundleConfigRaw::default(),
            order: OrderConfig::default(),
            repository: RepositoryConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                ..DocsConfig::default()
            },
            bundle_resolved: BundleConfig {
                output_dir: base.to_path_buf(),
                ..BundleConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_bundle()?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        require_file_name(&self.docs_resolved.manifest, "docs.manifest")?;
        let extension = &self.docs_resolved.extension;
        require_non_empty(extension, "docs.extension")?;
        if extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "docs.extension must not start with '.'".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_bundle(&self) -> Result<(), ConfigError> {
        let bundle = &self.bundle_resolved;
        require_non_empty(&bundle.primary_branch, "bundle.primary_branch")?;
        require_file_name(&bundle.release_name, "bundle.release_name")?;
        require_file_name(&bundle.dev_name, "bundle.dev_name")?;
        if bundle.release_name == bundle.dev_name {
            return Err(ConfigError::Validation(
                "bundle.release_name and bundle.dev_name must differ".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref branch) = self.bundle.primary_branch {
            self.bundle.primary_branch =
                Some(expand::expand_env(branch, "bundle.primary_branch")?);
        }

        self.repository.origin =
            expand::expand_optional(self.repository.origin.as_deref(), "repository.origin")?;
        self.repository.branch =
            expand::expand_optional(self.repository.branch.as_deref(), "repository.branch")?;

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            manifest: self
                .docs
                .manifest
                .clone()
                .unwrap_or_else(|| DEFAULT_MANIFEST.to_owned()),
            extension: self
                .docs
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
            entry_folder: self
                .docs
                .entry_folder
                .as_deref()
                .map(|f| f.trim_matches('/').to_owned()),
        };

        let bundle = &self.bundle;
        self.bundle_resolved = BundleConfig {
            output_dir: resolve(bundle.output_dir.as_deref(), "."),
            output_file: None,
            primary_branch: bundle
                .primary_branch
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIMARY_BRANCH.to_owned()),
            release_name: bundle
                .release_name
                .clone()
                .unwrap_or_else(|| DEFAULT_RELEASE_NAME.to_owned()),
            dev_name: bundle
                .dev_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DEV_NAME.to_owned()),
            pretty: bundle.pretty.unwrap_or(false),
        };
    }
}
