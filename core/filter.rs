//! Path exclusion rules shared by file collection and tree rendering.
//!
//! Matching is plain substring search over the normalized relative path, not
//! per-segment matching: an ignore token `api` also excludes `apiary/`.

use crate::config::{Config, IgnoreSet};
use log;
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Converts a path to a `/`-separated string.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Makes `path` relative to `root` and normalizes separators.
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    pathdiff::diff_paths(path, root).map(|rel| normalize_path(&rel))
}

/// Returns true if any ignore token occurs anywhere in `relative_path`.
pub fn should_ignore(relative_path: &str, ignore_set: &IgnoreSet) -> bool {
    ignore_set
        .iter()
        .any(|token| relative_path.contains(token.as_str()))
}

#[derive(Debug, Clone)]
pub struct PathFilter {
    ignore: IgnoreSet,
    skip_hidden: bool,
    hidden_allow: BTreeSet<String>,
}

impl PathFilter {
    pub fn new(ignore: IgnoreSet, skip_hidden: bool, hidden_allow: BTreeSet<String>) -> Self {
        Self {
            ignore,
            skip_hidden,
            hidden_allow,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.ignore.clone(),
            config.skip_hidden,
            config.hidden_allow.clone(),
        )
    }

    /// Decides whether a root-relative path is excluded.
    pub fn should_ignore(&self, relative_path: &Path) -> bool {
        let normalized = normalize_path(relative_path);
        if should_ignore(&normalized, &self.ignore) {
            log::trace!("Ignored by token match: {}", normalized);
            return true;
        }
        if self.skip_hidden && self.has_hidden_component(relative_path) {
            log::trace!("Ignored as hidden entry: {}", normalized);
            return true;
        }
        false
    }

    fn has_hidden_component(&self, relative_path: &Path) -> bool {
        relative_path.components().any(|component| match component {
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                name.starts_with('.') && !self.hidden_allow.contains(name.as_ref())
            }
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> IgnoreSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn token_matches_anywhere_in_path() {
        let set = tokens(&["vendor", "tmp"]);
        assert!(should_ignore("vendor/lib.go", &set));
        assert!(should_ignore("internal/vendored/x.go", &set));
        assert!(should_ignore("a/b/tmpfile.go", &set));
        assert!(!should_ignore("internal/service.go", &set));
    }

    #[test]
    fn short_tokens_match_unrelated_directories() {
        let set = tokens(&["api"]);
        assert!(should_ignore("apiary/hive.go", &set));
        assert!(should_ignore("pkg/rapid.go", &set));
    }

    #[test]
    fn empty_set_ignores_nothing() {
        assert!(!should_ignore("anything/at/all.go", &IgnoreSet::new()));
    }

    #[test]
    fn filter_normalizes_before_matching() {
        let filter = PathFilter::new(tokens(&["a/b"]), false, BTreeSet::new());
        assert!(filter.should_ignore(Path::new("x/a/b/c.go")));
        assert!(!filter.should_ignore(Path::new("x/a/c.go")));
    }

    #[test]
    fn hidden_entries_skipped_only_when_enabled() {
        let allow = tokens(&[".env", ".gitignore"]);
        let lenient = PathFilter::new(IgnoreSet::new(), false, allow.clone());
        let strict = PathFilter::new(IgnoreSet::new(), true, allow);

        assert!(!lenient.should_ignore(Path::new(".github/workflows/ci.yaml")));
        assert!(strict.should_ignore(Path::new(".github/workflows/ci.yaml")));
        assert!(strict.should_ignore(Path::new("deploy/.secret.json")));
    }

    #[test]
    fn allow_listed_dotfiles_survive_hidden_rule() {
        let allow = tokens(&[".env", ".env.example", ".gitignore"]);
        let strict = PathFilter::new(IgnoreSet::new(), true, allow);
        assert!(!strict.should_ignore(Path::new(".env")));
        assert!(!strict.should_ignore(Path::new("deploy/.env.example")));
        assert!(!strict.should_ignore(Path::new(".gitignore")));
        assert!(strict.should_ignore(Path::new(".envrc")));
    }

    #[test]
    fn make_relative_strips_root() {
        let root = Path::new("/project");
        assert_eq!(
            make_relative(Path::new("/project/cmd/app/main.go"), root),
            Some("cmd/app/main.go".to_string())
        );
    }
}
