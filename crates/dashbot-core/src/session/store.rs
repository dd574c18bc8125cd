//! In-process owner of the session record.
//!
//! `SessionStore` holds the live record and its durable repository. The
//! in-memory copy only changes after the repository write succeeds, so it
//! always mirrors what is on disk. Readers get clones, never a reference
//! into the live record.

use dashbot_types::error::StoreError;
use dashbot_types::session::SessionRecord;

use crate::repository::session::SessionRepository;

pub struct SessionStore<R> {
    repo: R,
    current: Option<SessionRecord>,
}

impl<R: SessionRepository> SessionStore<R> {
    /// Load the durable record once at startup. Nothing stored means no session.
    pub async fn load(repo: R) -> Result<Self, StoreError> {
        let current = repo.load().await?;
        match &current {
            Some(record) => tracing::info!(
                link = %record.link,
                start_time = %record.start_time,
                "restored active session"
            ),
            None => tracing::debug!("no stored session"),
        }
        Ok(Self { repo, current })
    }

    /// Snapshot of the current record.
    pub fn current(&self) -> Option<SessionRecord> {
        self.current.clone()
    }

    /// Persist `record` durably, then make it current.
    ///
    /// On error the in-memory record is left unchanged.
    pub async fn save(&mut self, record: Option<SessionRecord>) -> Result<(), StoreError> {
        self.repo.save(record.as_ref()).await?;
        self.current = record;
        Ok(())
    }

    /// Access the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemorySessionRepository, sample_record};

    #[tokio::test]
    async fn test_load_empty_is_absent() {
        let store = SessionStore::load(MemorySessionRepository::new()).await.unwrap();
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_load_restores_record() {
        let repo = MemorySessionRepository::with_record(sample_record());
        let store = SessionStore::load(repo).await.unwrap();
        assert_eq!(store.current(), Some(sample_record()));
    }

    #[tokio::test]
    async fn test_save_writes_through() {
        let mut store = SessionStore::load(MemorySessionRepository::new()).await.unwrap();
        store.save(Some(sample_record())).await.unwrap();

        assert_eq!(store.current(), Some(sample_record()));
        assert_eq!(store.repository().stored(), Some(sample_record()));
        assert_eq!(store.repository().save_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_record() {
        let repo = MemorySessionRepository::with_record(sample_record());
        let mut store = SessionStore::load(repo).await.unwrap();
        store.repository().fail_saves(true);

        assert!(store.save(None).await.is_err());
        assert_eq!(store.current(), Some(sample_record()));
        assert_eq!(store.repository().stored(), Some(sample_record()));
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let mut store = SessionStore::load(MemorySessionRepository::with_record(sample_record()))
            .await
            .unwrap();
        let mut snapshot = store.current().unwrap();
        snapshot.participants.push("mallory".to_string());

        assert_eq!(store.current(), Some(sample_record()));
        store.save(None).await.unwrap();
        assert_eq!(snapshot.participants.len(), 2);
    }
}
