//! Durable session record storage trait.

use dashbot_types::error::StoreError;
use dashbot_types::session::SessionRecord;

/// Durable backing for the single session slot.
///
/// `save` must replace the stored record atomically: a concurrent or later
/// `load` sees either the old record or the new one, never a partial write.
pub trait SessionRepository: Send + Sync {
    /// Read the stored record. Returns `None` when nothing is stored.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<SessionRecord>, StoreError>> + Send;

    /// Overwrite the stored record; `None` stores the empty state.
    fn save(
        &self,
        record: Option<&SessionRecord>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
