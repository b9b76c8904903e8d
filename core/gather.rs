use crate::config::ExtensionSet;
use crate::filter::{PathFilter, make_relative};
use log;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Content of a collected file, or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Unreadable(String),
}

#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub relative_path: String,
    pub content: FileContent,
}

impl FileRecord {
    /// Reads the whole file; invalid UTF-8 is replaced, read errors are kept
    /// as `FileContent::Unreadable` rather than returned.
    pub fn load(path: &Path, root: &Path) -> Self {
        let relative_path = make_relative(path, root)
            .unwrap_or_else(|| path.to_string_lossy().replace('\\', "/"));

        let content = match fs::read(path) {
            Ok(bytes) => FileContent::Text(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                FileContent::Unreadable(e.to_string())
            }
        };

        Self {
            path: path.to_path_buf(),
            relative_path,
            content,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(text) => Some(text),
            FileContent::Unreadable(_) => None,
        }
    }

    /// Newline count plus one; zero for unreadable files.
    pub fn line_count(&self) -> usize {
        self.text()
            .map(|text| text.matches('\n').count() + 1)
            .unwrap_or(0)
    }

    pub fn size(&self) -> usize {
        self.text().map(str::len).unwrap_or(0)
    }
}

/// Suffix of the final path component including the dot (`.go`), matching
/// the extension allow-list format. Dotfiles like `.env` have no suffix.
pub fn file_suffix(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

pub fn has_allowed_suffix(path: &Path, extensions: &ExtensionSet) -> bool {
    file_suffix(path).is_some_and(|suffix| extensions.contains(&suffix))
}

/// Sibling order shared by every walk: directories first, then
/// case-insensitive name, exact name as the tie-break.
fn entry_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    let key = |entry: &DirEntry| {
        let name = entry.file_name().to_string_lossy().into_owned();
        (!entry.file_type().is_dir(), name.to_lowercase(), name)
    };
    key(a).cmp(&key(b))
}

/// Pre-order walk of `root` without following directory links. Entries the
/// filter rejects are pruned before descent; unreadable entries are logged
/// and skipped, which drops only their own subtree.
pub(crate) fn walk_project<'a>(
    root: &'a Path,
    filter: &'a PathFilter,
) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(entry_order)
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            match entry.path().strip_prefix(root) {
                Ok(relative) => !filter.should_ignore(relative),
                Err(_) => false,
            }
        })
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
}

/// Regular files, plus links that resolve to one. Directory links are not
/// treated as files or descended into.
pub(crate) fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Walks `root` and returns every regular file with an allowed suffix whose
/// relative path is not excluded.
pub fn collect_files(root: &Path, extensions: &ExtensionSet, filter: &PathFilter) -> Vec<PathBuf> {
    log::info!("Walking project directory: {}", root.display());

    let mut files = Vec::new();
    for entry in walk_project(root, filter) {
        if !is_regular_file(&entry) {
            continue;
        }
        if !has_allowed_suffix(entry.path(), extensions) {
            log::trace!("Suffix not allowed: {}", entry.path().display());
            continue;
        }
        log::trace!("Collected: {}", entry.path().display());
        files.push(entry.into_path());
    }

    log::info!("Directory walk complete. Collected {} files.", files.len());
    files
}

/// Reads every path into a `FileRecord`, preserving order.
pub fn load_records(paths: &[PathBuf], root: &Path) -> Vec<FileRecord> {
    log::debug!("Reading content for {} files...", paths.len());
    paths.iter().map(|path| FileRecord::load(path, root)).collect()
}
