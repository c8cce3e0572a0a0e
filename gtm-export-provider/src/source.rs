use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ProviderError, ProviderResult};

/// Where the export document comes from.
#[derive(Debug, Clone)]
pub enum ExportSource {
    /// A file on the local file system.
    Path(PathBuf),
    /// A document already held in memory.
    Bytes(Vec<u8>),
}

impl ExportSource {
    /// Reads the whole document. The file handle is closed before returning.
    pub(crate) async fn read(&self, limit: Option<u64>) -> ProviderResult<Cow<'_, [u8]>> {
        match self {
            Self::Bytes(bytes) => {
                check_size(bytes.len() as u64, limit)?;
                Ok(Cow::Borrowed(bytes))
            }
            Self::Path(path) => {
                let unavailable = |source| ProviderError::SourceUnavailable {
                    path: path.clone(),
                    source,
                };
                if let Some(limit) = limit {
                    let meta = tokio::fs::metadata(path).await.map_err(unavailable)?;
                    check_size(meta.len(), Some(limit))?;
                }
                let bytes = tokio::fs::read(path).await.map_err(unavailable)?;
                debug!(path = %path.display(), bytes = bytes.len(), "Read export source");
                Ok(Cow::Owned(bytes))
            }
        }
    }
}

fn check_size(size: u64, limit: Option<u64>) -> ProviderResult<()> {
    match limit {
        Some(limit) if size > limit => Err(ProviderError::SourceTooLarge { size, limit }),
        _ => Ok(()),
    }
}

impl From<PathBuf> for ExportSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ExportSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ExportSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
