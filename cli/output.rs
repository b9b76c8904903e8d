use anyhow::{Context, Result};
use colored::*;
use srcpack_core::AppError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Where the finished bundle goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget<'a> {
    Stdout,
    File(&'a Path),
}

impl OutputTarget<'_> {
    fn label(&self) -> String {
        match self {
            OutputTarget::Stdout => "<stdout>".to_string(),
            OutputTarget::File(path) => path.display().to_string(),
        }
    }
}

pub fn emit_bundle(content: &str, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => write_to_stdout(content),
        OutputTarget::File(path) => write_to_file(path, content),
    }
}

/// One-line summary on stderr so piped stdout stays untouched.
pub fn print_confirmation(file_count: usize, content: &str, target: &OutputTarget) {
    eprintln!(
        "{} Packed {} files → {} ({}KB, {} bytes)",
        "✓".green(),
        file_count,
        target.label().blue(),
        content.len() / 1024,
        content.len()
    );
}

pub fn print_empty_warning() {
    eprintln!(
        "{} no files matched the extension and ignore filters",
        "Warning:".yellow().bold()
    );
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> AppError + '_ {
    move |source| AppError::FileWrite {
        path: path.to_path_buf(),
        source,
    }
}

pub fn write_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(write_error(parent))
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let mut file = File::create(path)
        .map_err(write_error(path))
        .with_context(|| format!("Failed to create file {}", path.display()))?;
    file.write_all(content.as_bytes())
        .map_err(write_error(path))
        .with_context(|| format!("Failed to write to file {}", path.display()))?;
    Ok(())
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .map_err(AppError::Io)
        .context("Failed to write to stdout")?;
    handle
        .flush()
        .map_err(AppError::Io)
        .context("Failed to flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_target_creates_missing_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out/nested/bundle.txt");
        emit_bundle("<tree>\n.\n</tree>\n", &OutputTarget::File(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<tree>\n.\n</tree>\n");
    }

    #[test]
    fn target_labels() {
        assert_eq!(OutputTarget::Stdout.label(), "<stdout>");
        assert_eq!(
            OutputTarget::File(Path::new("ctx.txt")).label(),
            "ctx.txt"
        );
    }

    #[test]
    fn write_failure_carries_file_write_error() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("ctx.txt");

        let err = write_to_file(&path, "content").unwrap_err();
        match err.downcast_ref::<AppError>() {
            Some(AppError::FileWrite { path: failed, .. }) => assert_eq!(failed, &blocker),
            other => panic!("expected FileWrite, got {:?}", other),
        }
    }
}
