pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod gather;
pub mod output_formats;
pub mod sort;
pub mod tree;

pub use config::{Config, DirPriority, ExtensionSet, IgnoreSet, SortConfig};
pub use context::{Bundle, BundleStats, pack_project};
pub use error::{AppError, Result};
pub use filter::{PathFilter, should_ignore};
pub use gather::{FileContent, FileRecord, collect_files};
pub use output_formats::{BundleFormat, BundleFormatter, DataFormatter, TextFormatter, formatter_for};
pub use sort::sort_files;
pub use tree::{TreeNode, build_tree, render_tree};
