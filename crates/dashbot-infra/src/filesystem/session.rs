//! JSON file implementation of `SessionRepository`.
//!
//! The file holds either `{}` (no session) or the session record. Writes go
//! to a sibling temp file which is synced and then renamed over the target,
//! so a crash mid-write leaves the previous contents intact.

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;

use dashbot_core::repository::session::SessionRepository;
use dashbot_types::error::StoreError;
use dashbot_types::session::{SessionRecord, StoredSession};

pub struct JsonFileSessionRepository {
    path: PathBuf,
}

impl JsonFileSessionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionRepository for JsonFileSessionRepository {
    async fn load(&self) -> Result<Option<SessionRecord>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no session file, starting empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredSession = serde_json::from_str(&content).map_err(|e| {
            StoreError::Corrupt(format!("{}: {e}", self.path.display()))
        })?;
        Ok(stored.into_record())
    }

    async fn save(&self, record: Option<&SessionRecord>) -> Result<(), StoreError> {
        let json = match record {
            Some(record) => serde_json::to_vec_pretty(record)
                .map_err(|e| StoreError::Io(format!("failed to serialize session: {e}")))?,
            None => b"{}".to_vec(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            active = record.is_some(),
            "session file written"
        );
        Ok(())
    }
}
