use crate::context::Bundle;
use crate::error::{AppError, Result};
use crate::gather::FileContent;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleFormat {
    /// Flat annotated text with `<tree>` and `<file path="...">` blocks.
    #[default]
    Text,
    /// Python module holding the tree and a path-to-content mapping.
    Data,
}

impl BundleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleFormat::Text => "text",
            BundleFormat::Data => "data",
        }
    }
}

impl fmt::Display for BundleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BundleFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(BundleFormat::Text),
            "data" | "py" => Ok(BundleFormat::Data),
            other => Err(AppError::InvalidArgument(format!(
                "Unknown bundle format \"{}\" (expected text or data)",
                other
            ))),
        }
    }
}

pub trait BundleFormatter {
    fn format(&self, bundle: &Bundle) -> Result<String>;
}

pub fn formatter_for(format: BundleFormat) -> Box<dyn BundleFormatter> {
    match format {
        BundleFormat::Text => Box::new(TextFormatter),
        BundleFormat::Data => Box::new(DataFormatter),
    }
}

fn placeholder(reason: &str) -> String {
    format!("<!-- Error reading file: {} -->", reason)
}

/// Annotated text bundle. File contents are emitted verbatim with trailing
/// whitespace trimmed, so the output is readable without unescaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl BundleFormatter for TextFormatter {
    fn format(&self, bundle: &Bundle) -> Result<String> {
        let mut parts: Vec<String> = Vec::new();

        if let Some(stats) = &bundle.stats {
            parts.push(format!("<!-- Project: {} -->", bundle.project_name));
            parts.push(format!(
                "<!-- Files: {}, Lines: {}, Size: {}KB -->",
                stats.files,
                stats.lines,
                stats.kilobytes()
            ));
            parts.push(String::new());
        }

        parts.push("<tree>".to_string());
        parts.push(bundle.tree.clone());
        parts.push("</tree>".to_string());
        parts.push(String::new());

        for record in &bundle.files {
            let content = match &record.content {
                FileContent::Text(text) => text.trim_end().to_string(),
                FileContent::Unreadable(reason) => placeholder(reason),
            };
            parts.push(format!("<file path=\"{}\">", record.relative_path));
            parts.push(content);
            parts.push("</file>".to_string());
            parts.push(String::new());
        }

        Ok(parts.join("\n"))
    }
}

/// Python module bundle: `TREE` and an ordered `FILES` mapping whose values
/// are JSON string literals (valid Python literals, reversible with any JSON
/// decoder). Running the module prints the tree and the file keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataFormatter;

impl DataFormatter {
    fn file_map(bundle: &Bundle) -> IndexMap<&str, String> {
        bundle
            .files
            .iter()
            .map(|record| {
                let content = match &record.content {
                    FileContent::Text(text) => text.clone(),
                    FileContent::Unreadable(reason) => placeholder(reason),
                };
                (record.relative_path.as_str(), content)
            })
            .collect()
    }
}

impl BundleFormatter for DataFormatter {
    fn format(&self, bundle: &Bundle) -> Result<String> {
        let mut lines: Vec<String> = vec!["# -*- coding: utf-8 -*-".to_string()];

        if let Some(stats) = &bundle.stats {
            lines.push(format!("# Project: {}", bundle.project_name));
            lines.push(format!(
                "# Files: {}, Lines: {}, Size: {}KB",
                stats.files,
                stats.lines,
                stats.kilobytes()
            ));
        }
        lines.push(String::new());

        lines.push(format!("TREE = {}", serde_json::to_string(&bundle.tree)?));
        lines.push(String::new());

        let files = Self::file_map(bundle);
        if files.is_empty() {
            lines.push("FILES = {}".to_string());
        } else {
            lines.push("FILES = {".to_string());
            for (path, content) in &files {
                lines.push(format!(
                    "    {}: {},",
                    serde_json::to_string(path)?,
                    serde_json::to_string(content)?
                ));
            }
            lines.push("}".to_string());
        }
        lines.push(String::new());

        lines.push("if __name__ == \"__main__\":".to_string());
        lines.push("    print(TREE)".to_string());
        lines.push("    print()".to_string());
        lines.push("    for path in FILES:".to_string());
        lines.push("        print(path)".to_string());
        lines.push(String::new());

        Ok(lines.join("\n"))
    }
}
