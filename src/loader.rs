//! Corpus loading.
//!
//! Two layouts are accepted, both producing records in a stable order:
//! - a JSON export: an array of `{"name": ..., "code": ...}` objects;
//! - a directory of script files, read recursively and sorted by path, each
//!   file named after its stem.
use crate::repository::ScriptRepository;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ExportedScript {
    name: String,
    #[serde(default)]
    code: String,
}

pub fn load_corpus(path: &Path) -> Result<ScriptRepository> {
    let repository = if path.is_dir() {
        load_directory(path)?
    } else if path.is_file() {
        load_export(path)?
    } else {
        return Err(anyhow!("corpus not found at {}", path.display()));
    };
    tracing::info!(
        path = %path.display(),
        scripts = repository.len(),
        "loaded script corpus"
    );
    Ok(repository)
}

fn load_export(path: &Path) -> Result<ScriptRepository> {
    let bytes = fs::read(path).with_context(|| format!("read corpus {}", path.display()))?;
    let scripts: Vec<ExportedScript> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse corpus JSON {}", path.display()))?;
    Ok(ScriptRepository::from_pairs(
        scripts.into_iter().map(|script| (script.name, script.code)),
    ))
}

fn load_directory(root: &Path) -> Result<ScriptRepository> {
    let mut pairs = Vec::new();
    for path in collect_script_files(root)? {
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        pairs.push((name, String::from_utf8_lossy(&bytes).into_owned()));
    }
    Ok(ScriptRepository::from_pairs(pairs))
}

/// Regular files under `root`, depth first, sorted per directory. Hidden
/// entries and symlinked directories are skipped.
fn collect_script_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("read {}", root.display()))? {
        let entry = entry?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if !hidden {
            let file_type = entry
                .file_type()
                .with_context(|| format!("inspect {}", path.display()))?;
            entries.push((path, file_type));
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut files = Vec::new();
    for (path, file_type) in entries {
        if file_type.is_dir() {
            files.extend(collect_script_files(&path)?);
        } else if path.is_file() {
            files.push(path);
        } else if file_type.is_symlink() {
            tracing::debug!(path = %path.display(), "skipping symlink");
        }
    }
    Ok(files)
}
