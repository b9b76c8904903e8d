use crate::config::Config;
use crate::error::{AppError, Result};
use crate::filter::PathFilter;
use crate::gather::{self, FileRecord};
use crate::sort;
use crate::tree;
use log;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BundleStats {
    pub files: usize,
    pub lines: usize,
    pub bytes: usize,
}

impl BundleStats {
    pub fn from_records(records: &[FileRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, record| Self {
            files: acc.files + 1,
            lines: acc.lines + record.line_count(),
            bytes: acc.bytes + record.size(),
        })
    }

    pub fn kilobytes(&self) -> usize {
        self.bytes / 1024
    }
}

/// Everything a formatter needs: sorted file records, the rendered tree and,
/// when requested, aggregate stats. Built once per run and never persisted.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub project_name: String,
    pub project_root: PathBuf,
    pub tree: String,
    pub files: Vec<FileRecord>,
    pub stats: Option<BundleStats>,
}

impl Bundle {
    pub fn build(project_root: &Path, tree: String, files: Vec<FileRecord>, include_stats: bool) -> Self {
        let stats = if include_stats {
            let stats = BundleStats::from_records(&files);
            log::debug!("Bundle stats: {:?}", stats);
            Some(stats)
        } else {
            log::trace!("Stats header disabled.");
            None
        };

        Self {
            project_name: Config::get_effective_project_name(project_root),
            project_root: project_root.to_path_buf(),
            tree,
            files,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Runs discovery, ordering, tree rendering and file loading for `project_root`.
pub fn pack_project(project_root: &Path, config: &Config) -> Result<Bundle> {
    if !project_root.is_dir() {
        return Err(AppError::InvalidRoot(project_root.to_path_buf()));
    }
    log::info!("Packing project at: {}", project_root.display());

    let filter = PathFilter::from_config(config);

    let files = gather::collect_files(project_root, &config.extensions, &filter);
    let files = sort::sort_files(files, project_root, &config.sort);

    let tree = tree::render(project_root, &filter, &config.extensions);
    let records = gather::load_records(&files, project_root);

    Ok(Bundle::build(project_root, tree, records, config.include_stats))
}
