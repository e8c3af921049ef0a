use std::path::PathBuf;

use crate::error::SourceError;
use crate::ranking::Platform;

use super::RankingSource;

/// Reads `<dir>/<platform>_top10.csv` from the local filesystem
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, platform: Platform) -> PathBuf {
        self.dir.join(platform.resource_name())
    }
}

impl RankingSource for DirSource {
    async fn fetch_text(&self, platform: Platform) -> Result<String, SourceError> {
        let path = self.path_for(platform);
        tracing::debug!(%platform, path = %path.display(), "reading rankings");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io { path, source })
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
