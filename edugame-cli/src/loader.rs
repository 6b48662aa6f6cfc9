use std::fs;
use std::path::{Path, PathBuf};

use edugame_catalog::{CatalogData, CatalogLoader, ResolveRequest};

#[derive(Debug, thiserror::Error)]
pub enum FileLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Catalog data read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    path: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogLoader for FileCatalogLoader {
    type Error = FileLoadError;

    fn load_catalog(&self) -> Result<CatalogData, Self::Error> {
        let json = read(&self.path)?;
        CatalogData::from_json(&json).map_err(|source| FileLoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read a JSON array of resolve requests.
pub fn load_requests(path: &Path) -> Result<Vec<ResolveRequest>, FileLoadError> {
    let json = read(path)?;
    serde_json::from_str(&json).map_err(|source| FileLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, FileLoadError> {
    fs::read_to_string(path).map_err(|source| FileLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
