//! Builds an in-memory index from files on disk for the CLI.

use crate::index::store::TrigramIndex;
use crate::index::types::{DocId, IndexConfig};
use crate::utils::is_binary;
use crate::utils::progress::{ProgressBar, ProgressStyle};
use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// An index together with the path behind each document id
pub struct Corpus {
    pub index: TrigramIndex,
    paths: Vec<PathBuf>,
}

impl Corpus {
    /// Path of a document, if the id was assigned by this corpus
    pub fn path(&self, doc_id: DocId) -> Option<&Path> {
        let idx = usize::try_from(doc_id).ok()?.checked_sub(1)?;
        self.paths.get(idx).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Options controlling which files become documents
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Only files whose path matches this glob are loaded
    pub glob: Option<String>,
    /// Suppress the progress spinner
    pub silent: bool,
}

/// Walk `roots` (honouring .gitignore) and add every eligible file as a document.
///
/// Files are added in sorted path order so ids are stable across runs.
pub fn load_corpus(
    roots: &[PathBuf],
    config: IndexConfig,
    options: &LoadOptions,
) -> Result<Corpus> {
    let matcher = options
        .glob
        .as_deref()
        .map(|g| Glob::new(g).map(|g| g.compile_matcher()))
        .transpose()
        .context("Invalid glob pattern")?;

    let spinner = if !options.silent {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("Invalid progress template")?,
        );
        spinner.set_message("Discovering files...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Some(spinner)
    } else {
        None
    };

    let mut files = collect_files(roots, matcher.as_ref())?;
    files.sort();
    files.dedup();

    let max_size = config.max_document_size;
    let skip_binary = config.skip_binary;
    let loaded: Vec<(PathBuf, Vec<u8>)> = files
        .into_par_iter()
        .filter_map(|path| {
            let content = match fs::read(&path) {
                Ok(c) => c,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read file");
                    return None;
                }
            };
            if content.len() as u64 > max_size {
                debug!(
                    path = %path.display(),
                    size = content.len(),
                    "skipping oversized file"
                );
                return None;
            }
            if skip_binary && is_binary(&content) {
                debug!(path = %path.display(), "skipping binary file");
                return None;
            }
            Some((path, content))
        })
        .collect();

    let (paths, contents): (Vec<PathBuf>, Vec<Vec<u8>>) = loaded.into_iter().unzip();

    let mut index = TrigramIndex::with_config(config);
    index.add_batch(&contents);

    if let Some(spinner) = spinner {
        spinner.finish_with_message(format!("Indexed {} files", paths.len()));
    }
    info!(
        documents = index.doc_count(),
        trigrams = index.trigram_count(),
        "corpus loaded"
    );

    Ok(Corpus { index, paths })
}

fn collect_files(roots: &[PathBuf], matcher: Option<&GlobMatcher>) -> Result<Vec<PathBuf>> {
    let Some((first, rest)) = roots.split_first() else {
        return Ok(Vec::new());
    };

    let mut builder = WalkBuilder::new(first);
    for root in rest {
        builder.add(root);
    }
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !matches!(name.as_ref(), ".git" | "node_modules" | "target")
        });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "walk error");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(m) = matcher {
            let name_matches = entry.file_name().to_str().is_some_and(|n| m.is_match(n));
            if !m.is_match(path) && !name_matches {
                continue;
            }
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}
