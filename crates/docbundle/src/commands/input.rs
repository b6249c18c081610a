//! Input arguments and startup shared by all commands.
//!
//! Startup runs in a fixed order: load config, resolve the origin URL,
//! resolve the branch, then build the compiler from those plain values.

use std::path::{Component, Path, PathBuf};

use clap::{Args, ValueEnum};
use docbundle_config::{CliSettings, Config, UnlistedOrder};
use docbundle_tree::{CompileOptions, Compiler, UnlistedPlacement, UrlBuilder};
use docbundle_vcs::{Repository, VcsError, normalize_origin};

use crate::error::CliError;

/// Entry folder used when it can't be derived from the repository layout.
const DEFAULT_ENTRY_FOLDER: &str = "docs";

/// Placement of entries missing from a manifest.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum UnlistedArg {
    /// Before listed entries.
    First,
    /// After listed entries.
    Last,
}

impl From<UnlistedArg> for UnlistedOrder {
    fn from(arg: UnlistedArg) -> Self {
        match arg {
            UnlistedArg::First => Self::First,
            UnlistedArg::Last => Self::Last,
        }
    }
}

/// Arguments selecting and describing the docs tree.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Remote origin URL (default: `origin` remote of the repository).
    #[arg(long, env = "DOCBUNDLE_ORIGIN")]
    origin: Option<String>,

    /// Branch name (default: current branch of the repository).
    #[arg(long, env = "DOCBUNDLE_BRANCH")]
    branch: Option<String>,

    /// Placement of entries missing from a manifest.
    #[arg(long, value_enum)]
    unlisted: Option<UnlistedArg>,

    /// Path to configuration file (default: auto-discover docbundle.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Everything a command needs after startup.
pub(crate) struct Prepared {
    pub config: Config,
    pub branch: String,
    pub compiler: Compiler,
}

impl Prepared {
    pub(crate) fn source_dir(&self) -> &Path {
        &self.config.docs_resolved.source_dir
    }
}

impl InputArgs {
    /// Load config, look up the repository and build the compiler.
    ///
    /// `settings` carries command-specific overrides; the input flags are
    /// merged into it.
    pub(crate) fn prepare(self, settings: CliSettings) -> Result<Prepared, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            origin: self.origin,
            branch: self.branch,
            unlisted: self.unlisted.map(UnlistedOrder::from),
            ..settings
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        match &config.config_path {
            Some(path) => tracing::debug!(path = %path.display(), "Loaded config"),
            None => tracing::debug!("No config file found, using defaults"),
        }
        let source_dir = config.docs_resolved.source_dir.clone();

        let mut repo = None;
        let origin = match &config.repository.origin {
            Some(origin) => origin.clone(),
            None => open_repository(&mut repo, &source_dir)?.origin_url()?,
        };
        let branch = match &config.repository.branch {
            Some(branch) => branch.clone(),
            None => open_repository(&mut repo, &source_dir)?.branch()?,
        };
        let entry_folder = match &config.docs_resolved.entry_folder {
            Some(folder) => folder.clone(),
            None => derive_entry_folder(repo.as_ref(), &source_dir),
        };

        let origin_base = normalize_origin(&origin);
        tracing::info!(origin = %origin_base, branch = %branch, entry_folder = %entry_folder, "Resolved repository");

        let options = CompileOptions {
            manifest_name: config.docs_resolved.manifest.clone(),
            extension: config.docs_resolved.extension.clone(),
            unlisted: placement(config.order.unlisted),
        };
        let urls = UrlBuilder::new(&origin_base, &branch, &entry_folder);

        Ok(Prepared {
            config,
            branch,
            compiler: Compiler::new(options, urls),
        })
    }
}

#[cfg(test)]
impl InputArgs {
    /// Arguments reading `config`, with optional repository overrides.
    pub(crate) fn for_config(config: PathBuf, origin: Option<&str>, branch: Option<&str>) -> Self {
        Self {
            source_dir: None,
            origin: origin.map(str::to_owned),
            branch: branch.map(str::to_owned),
            unlisted: None,
            config: Some(config),
        }
    }
}

fn placement(order: UnlistedOrder) -> UnlistedPlacement {
    match order {
        UnlistedOrder::First => UnlistedPlacement::First,
        UnlistedOrder::Last => UnlistedPlacement::Last,
    }
}

/// Discover the repository on first use and keep it in `slot`.
fn open_repository<'a>(
    slot: &'a mut Option<Repository>,
    source_dir: &Path,
) -> Result<&'a Repository, VcsError> {
    let repo = match slot.take() {
        Some(repo) => repo,
        None => Repository::discover(existing_ancestor(source_dir))?,
    };
    Ok(slot.insert(repo))
}

/// Nearest existing directory at or above `path`.
fn existing_ancestor(path: &Path) -> &Path {
    path.ancestors()
        .find(|p| p.is_dir())
        .unwrap_or(Path::new("."))
}

/// URL segment of `source_dir` inside the repository working tree.
///
/// Falls back to the directory name, then to `docs`, when the source
/// directory is outside the repository or no repository was opened.
fn derive_entry_folder(repo: Option<&Repository>, source_dir: &Path) -> String {
    let relative = repo
        .and_then(Repository::workdir)
        .and_then(|workdir| relative_to(workdir, source_dir));
    if let Some(relative) = relative {
        return relative;
    }
    source_dir
        .file_name()
        .map_or_else(|| DEFAULT_ENTRY_FOLDER.to_owned(), |n| n.to_string_lossy().into_owned())
}

/// `/`-joined path of `path` below `base`, comparing canonical forms.
fn relative_to(base: &Path, path: &Path) -> Option<String> {
    let base = base.canonicalize().ok()?;
    let path = path.canonicalize().ok()?;
    let relative = path.strip_prefix(&base).ok()?;
    let segments: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(segments.join("/"))
}
