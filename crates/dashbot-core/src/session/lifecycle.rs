//! Session state machine: `Absent` <-> `Active`.
//!
//! `SessionLifecycle` is the only writer of the session record. Every
//! mutation is persisted before the call returns. The store sits behind a
//! `tokio::sync::Mutex`, so `start`, `end`, and `attach_announcement` are
//! serialized: of two concurrent `end` calls exactly one observes the active
//! session and the other gets `NoActiveSession`.
//!
//! Each successful `start` is issued a [`StartToken`]. An announcement is
//! attached only while the session that produced it is still the active
//! one, which the token decides; record contents cannot, since two starts
//! within the same second with the same link are indistinguishable.

use tokio::sync::Mutex;
use tracing::{info, warn};

use dashbot_types::error::SessionError;
use dashbot_types::session::{
    AnnouncementRef, DurationOutcome, SessionClosure, SessionRecord, StartOutcome, StartToken,
};

use crate::clock::{Clock, format_session_time, measure_duration};
use crate::repository::session::SessionRepository;
use crate::session::store::SessionStore;

pub struct SessionLifecycle<R, C> {
    slot: Mutex<Slot<R>>,
    clock: C,
}

struct Slot<R> {
    store: SessionStore<R>,
    /// Token of the start that produced the active record. `None` for a
    /// record restored from disk, or when no session is active.
    active: Option<StartToken>,
    issued: u64,
}

impl<R: SessionRepository, C: Clock> SessionLifecycle<R, C> {
    pub fn new(store: SessionStore<R>, clock: C) -> Self {
        Self {
            slot: Mutex::new(Slot {
                store,
                active: None,
                issued: 0,
            }),
            clock,
        }
    }

    /// Start a session with `actor` as its sole participant.
    ///
    /// An already-active session is overwritten; it is returned in
    /// [`StartOutcome::displaced`] so its announcement can still be retracted.
    pub async fn start(&self, actor: &str, link: &str) -> Result<StartOutcome, SessionError> {
        let link = link.trim();
        if link.is_empty() {
            return Err(SessionError::MissingLink);
        }

        let mut slot = self.slot.lock().await;
        let displaced = slot.store.current();
        if let Some(previous) = &displaced {
            warn!(
                previous_link = %previous.link,
                previous_start = %previous.start_time,
                "starting a session while one is active; overwriting it"
            );
        }

        let record = SessionRecord {
            link: link.to_string(),
            participants: vec![actor.to_string()],
            start_time: format_session_time(self.clock.now()),
            end_time: None,
            last_message_id: None,
        };
        slot.store.save(Some(record.clone())).await?;

        slot.issued += 1;
        let token = StartToken::new(slot.issued);
        slot.active = Some(token);

        info!(actor, link, start_time = %record.start_time, "session started");
        Ok(StartOutcome {
            record,
            displaced,
            token,
        })
    }

    /// Record the public announcement for the session started under `token`.
    ///
    /// Returns `false` without writing if that session is no longer the
    /// active one (it was ended or replaced while the announcement was
    /// being posted).
    pub async fn attach_announcement(
        &self,
        token: StartToken,
        announcement: AnnouncementRef,
    ) -> Result<bool, SessionError> {
        let mut slot = self.slot.lock().await;
        if slot.active != Some(token) {
            return Ok(false);
        }
        let Some(mut current) = slot.store.current() else {
            return Ok(false);
        };

        current.last_message_id = Some(announcement);
        slot.store.save(Some(current)).await?;
        Ok(true)
    }

    /// Snapshot of the active session.
    pub async fn status(&self) -> Result<SessionRecord, SessionError> {
        self.slot
            .lock()
            .await
            .store
            .current()
            .ok_or(SessionError::NoActiveSession)
    }

    /// Close the active session and clear the store.
    ///
    /// The record is cleared even when the duration cannot be trusted; the
    /// closure then carries `InvalidTimeRange` or `Unparseable`.
    pub async fn end(&self) -> Result<SessionClosure, SessionError> {
        let mut slot = self.slot.lock().await;
        let record = slot.store.current().ok_or(SessionError::NoActiveSession)?;

        let end_time = format_session_time(self.clock.now());
        let duration = measure_duration(&record.start_time, &end_time);
        match &duration {
            DurationOutcome::Measured(_) => {}
            DurationOutcome::InvalidTimeRange => warn!(
                start_time = %record.start_time,
                end_time = %end_time,
                "session ends before it started"
            ),
            DurationOutcome::Unparseable { reason } => warn!(
                reason = %reason,
                "could not compute session duration"
            ),
        }

        slot.store.save(None).await?;
        slot.active = None;

        info!(link = %record.link, duration = %duration, "session ended");
        Ok(SessionClosure {
            start_time: record.start_time,
            end_time,
            duration,
            link: record.link,
            participants: record.participants,
            last_message_id: record.last_message_id,
        })
    }
}
