//! Discovers `.cru` files under a data directory and parses them
//! concurrently. Parses share nothing, so each file goes to its own blocking
//! task.

use std::path::{Path, PathBuf};

use cru_core::{ParseOptions, ParseResult, parse};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read directory entry: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Parse task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type LoaderResult<T> = Result<T, LoaderError>;

#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub result: ParseResult,
}

/// Every `*.cru` file below `data_dir`, sorted by path.
pub fn discover(data_dir: &Path) -> LoaderResult<Vec<PathBuf>> {
    let pattern = data_dir.join("**").join("*.cru");
    let mut paths = glob::glob(&pattern.to_string_lossy())?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    debug!(count = paths.len(), dir = %data_dir.display(), "discovered cru files");
    Ok(paths)
}

pub fn load_file(path: &Path, options: &ParseOptions) -> LoaderResult<ParseResult> {
    let text = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&text, options))
}

/// Parses `paths` concurrently. Results come back in the order of `paths`.
pub async fn load_all(paths: Vec<PathBuf>, options: ParseOptions) -> LoaderResult<Vec<LoadedFile>> {
    let mut tasks = JoinSet::new();
    for (order, path) in paths.into_iter().enumerate() {
        tasks.spawn_blocking(move || {
            let result = load_file(&path, &options);
            (order, path, result)
        });
    }

    let mut loaded = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (order, path, result) = joined?;
        debug!(path = %path.display(), "parsed file");
        loaded.push((order, LoadedFile { path, result: result? }));
    }
    loaded.sort_by_key(|(order, _)| *order);
    Ok(loaded.into_iter().map(|(_, file)| file).collect())
}

pub async fn load_dir(data_dir: &Path, options: ParseOptions) -> LoaderResult<Vec<LoadedFile>> {
    load_all(discover(data_dir)?, options).await
}
