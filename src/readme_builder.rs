//! README assembly from documentation fragments
//!
//! Each element names a markdown file under the docs directory and, optionally,
//! a pair of markers. With markers, only the text between them is kept.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Element {
    /// File stem under the docs directory (`home` → `home.md`)
    pub name: String,
    #[serde(default)]
    pub start_marker: String,
    #[serde(default)]
    pub end_marker: String,
}

impl Element {
    pub fn whole(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start_marker: String::new(),
            end_marker: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_elements")]
    pub elements: Vec<Element>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            output: default_output(),
            elements: default_elements(),
        }
    }
}

fn default_docs_dir() -> PathBuf { PathBuf::from("./docs/source/") }
fn default_output() -> PathBuf { PathBuf::from("README.md") }
fn default_elements() -> Vec<Element> {
    vec![Element::whole("badges"), Element::whole("home"), Element::whole("guides")]
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }
}

/// Cut `content` down to the text between the markers.
///
/// Markers are only honored when at least one is non-empty and both are found;
/// otherwise the content is returned unchanged.
pub fn extract_content(content: &str, start_marker: &str, end_marker: &str) -> String {
    if start_marker.is_empty() && end_marker.is_empty() {
        return content.to_string();
    }

    match (content.find(start_marker), content.find(end_marker)) {
        (Some(start), Some(end)) => {
            let from = start + start_marker.len();
            // an end marker ahead of the start marker selects nothing
            content.get(from..end).unwrap_or("").trim().to_string()
        }
        _ => content.to_string(),
    }
}

/// Assemble the README text from the manifest's fragments
pub fn assemble(manifest: &Manifest) -> Result<String> {
    let mut parts = Vec::with_capacity(manifest.elements.len());

    for element in &manifest.elements {
        let path = manifest.docs_dir.join(format!("{}.md", element.name));
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read documentation fragment: {}", path.display()))?;
        parts.push(extract_content(&content, &element.start_marker, &element.end_marker));
        tracing::debug!("Added fragment {}", path.display());
    }

    Ok(parts.join("\n"))
}

/// Assemble and write the README, returning where it was written
pub fn generate_readme(manifest: &Manifest) -> Result<PathBuf> {
    let readme = assemble(manifest)?;
    fs::write(&manifest.output, readme)
        .with_context(|| format!("Failed to write {}", manifest.output.display()))?;
    Ok(manifest.output.clone())
}
