//! Artifact writer - places rendered artifacts under an output directory
//!
//! Creates parent directories as needed. Artifact paths are relative to the writer's root.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::RenderedArtifact;

/// Error writing an artifact
#[derive(Debug, Error)]
#[error("cannot write '{}': {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Writes rendered artifacts below a root directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final location of an artifact path
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Write one file, creating its parent directories. Returns the written path.
    pub fn write(&self, path: &Path, source: &str) -> Result<PathBuf, WriteError> {
        let target = self.resolve(path);
        let wrap = |e: std::io::Error| WriteError {
            path: target.clone(),
            source: e,
        };
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
        fs::write(&target, source).map_err(wrap)?;
        tracing::info!(path = %target.display(), "wrote artifact");
        Ok(target)
    }

    /// Write every artifact, in order. Stops at the first failure.
    pub fn write_all(&self, artifacts: &[RenderedArtifact]) -> Result<Vec<PathBuf>, WriteError> {
        artifacts
            .iter()
            .map(|artifact| self.write(&artifact.path, &artifact.source))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::process;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("convgen_output_{}_{}", tag, process::id()))
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let root = temp_root("nested");
        let writer = ArtifactWriter::new(&root);
        let written = writer
            .write(Path::new("gen/grpc/adder/server/types.rs"), "// adder\n")
            .unwrap();
        assert_eq!(written, root.join("gen/grpc/adder/server/types.rs"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "// adder\n");
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_write_all_in_order() {
        let root = temp_root("all");
        let writer = ArtifactWriter::new(&root);
        let artifacts = vec![
            RenderedArtifact {
                service: "A".to_string(),
                path: PathBuf::from("a/types.rs"),
                source: "// a\n".to_string(),
            },
            RenderedArtifact {
                service: "B".to_string(),
                path: PathBuf::from("b/types.rs"),
                source: "// b\n".to_string(),
            },
        ];
        let written = writer.write_all(&artifacts).unwrap();
        assert_eq!(written, vec![root.join("a/types.rs"), root.join("b/types.rs")]);
        let _ = fs::remove_dir_all(&root);
    }
}
