//! Outbound notification port.
//!
//! The core never renders or sends anything itself: it produces push
//! intents and session transition summaries and hands them to a
//! [`NotificationDispatcher`]. Failures are reported back only so they can
//! be logged; no caller acts on them beyond that.

pub mod queue;

pub use queue::{EnqueueError, NotificationQueue};

use dashbot_types::error::DispatchError;
use dashbot_types::session::{AnnouncementRef, SessionClosure, SessionRecord};
use dashbot_types::webhook::PushNotificationIntent;

/// Renders notifications onto the target surface (a chat channel).
pub trait NotificationDispatcher: Send + Sync + 'static {
    /// Announce a push to a branch.
    fn push_received(
        &self,
        intent: &PushNotificationIntent,
    ) -> impl std::future::Future<Output = Result<(), DispatchError>> + Send;

    /// Post the public announcement for a newly started session.
    ///
    /// Returns a handle to the announcement when the surface supports
    /// retracting it later.
    fn session_started(
        &self,
        record: &SessionRecord,
    ) -> impl std::future::Future<Output = Result<Option<AnnouncementRef>, DispatchError>> + Send;

    /// Post the closing summary of a session.
    fn session_ended(
        &self,
        closure: &SessionClosure,
    ) -> impl std::future::Future<Output = Result<(), DispatchError>> + Send;

    /// Remove the interactive controls from an earlier announcement of
    /// `session`, marking it finished.
    ///
    /// Returns [`DispatchError::AnnouncementNotFound`] when the announcement
    /// no longer exists; callers tolerate that.
    fn retract_announcement(
        &self,
        announcement: AnnouncementRef,
        session: &SessionRecord,
    ) -> impl std::future::Future<Output = Result<(), DispatchError>> + Send;
}
