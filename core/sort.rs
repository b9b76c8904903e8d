use crate::config::SortConfig;
use crate::filter::normalize_path;
use log;
use std::path::{Component, Path, PathBuf};

/// Sort key: (directory bucket, filename priority, relative path).
pub type SortKey = (u32, u32, String);

pub fn sort_key(path: &Path, root: &Path, config: &SortConfig) -> SortKey {
    let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    let components: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let dir_priority = match components.as_slice() {
        [] | [_] => 0,
        [top, ..] => config
            .dir_priorities
            .iter()
            .find(|bucket| &bucket.dir == top)
            .map(|bucket| bucket.priority)
            .unwrap_or(config.other_dir_priority),
    };

    let file_name = components.last().map(String::as_str).unwrap_or_default();
    let name_priority = config
        .priority_files
        .iter()
        .position(|known| known == file_name)
        .map(|idx| idx as u32)
        .unwrap_or(config.unknown_file_priority);

    (dir_priority, name_priority, normalize_path(&relative))
}

/// Orders files for reading: root files, then the configured directory
/// buckets, well-known filenames first within a bucket, ties broken by path.
pub fn sort_files(files: Vec<PathBuf>, root: &Path, config: &SortConfig) -> Vec<PathBuf> {
    log::debug!("Sorting {} files by priority buckets...", files.len());
    let mut keyed: Vec<(SortKey, PathBuf)> = files
        .into_iter()
        .map(|path| (sort_key(&path, root, config), path))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, path)| path).collect()
}
