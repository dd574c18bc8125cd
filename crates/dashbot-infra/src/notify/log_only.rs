//! Log-only dispatcher, used when no Discord token is configured.

use dashbot_core::notify::NotificationDispatcher;
use dashbot_types::error::DispatchError;
use dashbot_types::session::{AnnouncementRef, SessionClosure, SessionRecord};
use dashbot_types::webhook::PushNotificationIntent;

/// Emits each notification as a structured `tracing` event.
///
/// Never returns an announcement handle, so there is nothing to retract.
#[derive(Debug, Default, Clone)]
pub struct LogDispatcher;

impl LogDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationDispatcher for LogDispatcher {
    async fn push_received(&self, intent: &PushNotificationIntent) -> Result<(), DispatchError> {
        tracing::info!(
            repo = %intent.repo_name,
            branch = %intent.branch,
            author = %intent.commit_author,
            commit = %intent.commit_message,
            url = %intent.commit_url,
            "github push"
        );
        Ok(())
    }

    async fn session_started(
        &self,
        record: &SessionRecord,
    ) -> Result<Option<AnnouncementRef>, DispatchError> {
        tracing::info!(
            starter = record.starter().unwrap_or("-"),
            start_time = %record.start_time,
            link = %record.link,
            "live share session started"
        );
        Ok(None)
    }

    async fn session_ended(&self, closure: &SessionClosure) -> Result<(), DispatchError> {
        tracing::info!(
            start_time = %closure.start_time,
            end_time = %closure.end_time,
            duration = %closure.duration,
            participants = %closure.participants.join(", "),
            "live share session ended"
        );
        Ok(())
    }

    async fn retract_announcement(
        &self,
        announcement: AnnouncementRef,
        _session: &SessionRecord,
    ) -> Result<(), DispatchError> {
        tracing::debug!(%announcement, "no announcement surface; nothing to retract");
        Ok(())
    }
}
