//! Boundary traits for the layout engine and the tree data source
//!
//! These traits abstract the third-party and I/O sides of the pipeline, allowing
//! services to be tested with mock implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::TreeData;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::layout::LayoutGraph;

/// Deterministic layered layout engine.
///
/// Implementations return the input graph with `x`/`y` set on every child. This
/// is the only place a concrete layout algorithm is substitutable.
#[async_trait]
pub trait LayoutEngine: Send + Sync {
    async fn layout(&self, graph: LayoutGraph) -> InfraResult<LayoutGraph>;
}

/// Supplier of relational tree data.
pub trait TreeSource: Send + Sync {
    fn load(&self) -> InfraResult<TreeData>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Tree data stored as a JSON document.
pub struct JsonFileSource {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TreeSource for JsonFileSource {
    fn load(&self) -> InfraResult<TreeData> {
        if !self.fs.is_file(&self.path) {
            return Err(InfraError::io(
                format!("tree data not found: {}", self.path.display()),
                io::Error::new(io::ErrorKind::NotFound, "not a file"),
            ));
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| InfraError::io(format!("read {}", self.path.display()), e))?;
        let data: TreeData = serde_json::from_str(&content).map_err(|e| InfraError::Json {
            context: self.path.display().to_string(),
            source: e,
        })?;
        debug!(
            "loaded {}: {} persons, {} unions",
            self.path.display(),
            data.persons.len(),
            data.unions.len()
        );
        Ok(data)
    }
}

/// In-memory source, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub TreeData);

impl TreeSource for StaticSource {
    fn load(&self) -> InfraResult<TreeData> {
        Ok(self.0.clone())
    }
}
