use crate::error::{AppError, Result};
use crate::output_formats::BundleFormat;
use log;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};

/// Literal substrings; a relative path containing any of them is excluded.
pub type IgnoreSet = BTreeSet<String>;
/// File suffixes including the leading dot, e.g. `.go`.
pub type ExtensionSet = BTreeSet<String>;

pub const DEFAULT_TEXT_OUTPUT: &str = "project_context.txt";
pub const DEFAULT_DATA_OUTPUT: &str = "project_dump.py";

const DEFAULT_EXTENSIONS: &[&str] = &[
    ".go", ".mod", ".sum", ".json", ".yaml", ".yml", ".md", ".sql", ".proto",
];

const DEFAULT_IGNORE: &[&str] = &[
    // VCS and editors
    ".git",
    ".svn",
    ".hg",
    ".idea",
    ".vscode",
    ".kilocode",
    // Dependencies
    "vendor",
    "node_modules",
    ".venv",
    "mcp-server",
    // Build output and caches
    "bin",
    "dist",
    "build",
    "_build",
    "ftp_cache",
    "tmp",
    ".cache",
    // Packer artifacts
    "2pack_go_files.py",
    "project_dump.py",
    "project_dump.txt",
];

const DEFAULT_HIDDEN_ALLOW: &[&str] = &[".env", ".env.example", ".gitignore"];

const DEFAULT_PRIORITY_FILES: &[&str] = &[
    "go.mod",
    "go.sum",
    "README.md",
    "main.go",
    "config.yaml",
    "config.json",
];

const DEFAULT_DIR_PRIORITIES: &[(&str, u32)] = &[("cmd", 1), ("internal", 2), ("pkg", 3), ("api", 4)];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub format: BundleFormat,
    #[serde(default = "default_true")]
    pub include_stats: bool,
    #[serde(default)]
    pub skip_hidden: bool,
    #[serde(default = "default_extensions")]
    pub extensions: ExtensionSet,
    #[serde(default = "default_ignore")]
    pub ignore: IgnoreSet,
    #[serde(default = "default_hidden_allow")]
    pub hidden_allow: BTreeSet<String>,
    #[serde(default)]
    pub sort: SortConfig,
}

/// Priority buckets for ordering files in the bundle.
///
/// Root-level files always land in bucket 0. A file below a directory listed in
/// `dir_priorities` takes that bucket, anything else takes `other_dir_priority`.
/// Within a bucket, files named in `priority_files` come first in list order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SortConfig {
    #[serde(default = "default_priority_files")]
    pub priority_files: Vec<String>,
    #[serde(default = "default_unknown_file_priority")]
    pub unknown_file_priority: u32,
    #[serde(default = "default_other_dir_priority")]
    pub other_dir_priority: u32,
    #[serde(default = "default_dir_priorities")]
    pub dir_priorities: Vec<DirPriority>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DirPriority {
    pub dir: String,
    pub priority: u32,
}

fn default_true() -> bool {
    true
}
fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
fn default_extensions() -> ExtensionSet {
    to_set(DEFAULT_EXTENSIONS)
}
fn default_ignore() -> IgnoreSet {
    to_set(DEFAULT_IGNORE)
}
fn default_hidden_allow() -> BTreeSet<String> {
    to_set(DEFAULT_HIDDEN_ALLOW)
}
fn default_priority_files() -> Vec<String> {
    DEFAULT_PRIORITY_FILES.iter().map(|s| s.to_string()).collect()
}
fn default_unknown_file_priority() -> u32 {
    100
}
fn default_other_dir_priority() -> u32 {
    10
}
fn default_dir_priorities() -> Vec<DirPriority> {
    DEFAULT_DIR_PRIORITIES
        .iter()
        .map(|(dir, priority)| DirPriority {
            dir: dir.to_string(),
            priority: *priority,
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: BundleFormat::default(),
            include_stats: default_true(),
            skip_hidden: false,
            extensions: default_extensions(),
            ignore: default_ignore(),
            hidden_allow: default_hidden_allow(),
            sort: SortConfig::default(),
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            priority_files: default_priority_files(),
            unknown_file_priority: default_unknown_file_priority(),
            other_dir_priority: default_other_dir_priority(),
            dir_priorities: default_dir_priorities(),
        }
    }
}

impl Config {
    /// Defaults for a formatter variant. The data variant hides dotfiles.
    pub fn for_format(format: BundleFormat) -> Self {
        Self {
            format,
            skip_hidden: format == BundleFormat::Data,
            ..Self::default()
        }
    }

    /// Replaces the extension allow-list. Tokens without a leading dot get one.
    pub fn with_extensions<I, S>(self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: ExtensionSet = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        log::trace!("Extension allow-list replaced: {:?}", extensions);
        Self { extensions, ..self }
    }

    /// Appends ignore tokens to the current set. Empty tokens are dropped.
    pub fn with_extra_ignores<I, S>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ignore = self.ignore.clone();
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                log::warn!("Ignoring empty ignore token; it would exclude every path.");
                continue;
            }
            ignore.insert(token.replace('\\', "/"));
        }
        Self { ignore, ..self }
    }

    pub fn with_stats(self, include_stats: bool) -> Self {
        Self {
            include_stats,
            ..self
        }
    }

    pub fn with_skip_hidden(self, skip_hidden: bool) -> Self {
        Self {
            skip_hidden,
            ..self
        }
    }

    pub fn default_output(&self) -> &'static str {
        match self.format {
            BundleFormat::Text => DEFAULT_TEXT_OUTPUT,
            BundleFormat::Data => DEFAULT_DATA_OUTPUT,
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(AppError::TomlSerialize)
    }

    /// Resolves the scan root: expands `~`, canonicalizes, and requires a directory.
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let path_to_resolve = match cli_project_root {
            Some(p) => PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).as_ref()),
            None => env::current_dir().map_err(AppError::Io)?,
        };

        let resolved = path_to_resolve.canonicalize().map_err(|e| {
            log::debug!(
                "Failed to canonicalize project root '{}': {}",
                path_to_resolve.display(),
                e
            );
            AppError::InvalidRoot(path_to_resolve.clone())
        })?;

        if !resolved.is_dir() {
            return Err(AppError::InvalidRoot(resolved));
        }
        Ok(resolved)
    }

    pub fn get_effective_project_name(project_root: &Path) -> String {
        project_root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "UnknownProject".to_string())
    }
}

fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('.') {
        Some(trimmed.to_string())
    } else {
        Some(format!(".{}", trimmed))
    }
}
