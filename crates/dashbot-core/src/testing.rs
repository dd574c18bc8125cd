//! In-memory fakes for the core ports, shared by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use dashbot_types::error::{DispatchError, StoreError};
use dashbot_types::session::{AnnouncementRef, SessionClosure, SessionRecord};
use dashbot_types::webhook::PushNotificationIntent;

use crate::clock::Clock;
use crate::notify::NotificationDispatcher;
use crate::repository::session::SessionRepository;

pub fn sample_record() -> SessionRecord {
    SessionRecord {
        link: "https://liveshare.example/join?abc".to_string(),
        participants: vec!["alice".to_string()],
        start_time: "2024-01-01 10:00:00".to_string(),
        end_time: None,
        last_message_id: None,
    }
}

pub fn sample_intent() -> PushNotificationIntent {
    PushNotificationIntent {
        repo_name: "dashboard".to_string(),
        branch: "main".to_string(),
        commit_message: "Initial commit".to_string(),
        commit_author: "Alice".to_string(),
        commit_url: "https://github.com/acme/dashboard/commit/1".to_string(),
        repo_url: "https://github.com/acme/dashboard".to_string(),
    }
}

pub fn at(date: (i32, u32, u32), time: (u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(time.0, time.1, time.2)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemorySessionRepository {
    stored: Mutex<Option<SessionRecord>>,
    saves: AtomicUsize,
    fail: AtomicBool,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: SessionRecord) -> Self {
        let repo = Self::default();
        *repo.stored.lock().unwrap() = Some(record);
        repo
    }

    pub fn stored(&self) -> Option<SessionRecord> {
        self.stored.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl SessionRepository for MemorySessionRepository {
    async fn load(&self) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.stored())
    }

    async fn save(&self, record: Option<&SessionRecord>) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Io("disk full".to_string()));
        }
        *self.stored.lock().unwrap() = record.cloned();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

impl Clock for std::sync::Arc<FixedClock> {
    fn now(&self) -> NaiveDateTime {
        self.as_ref().now()
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    Push(PushNotificationIntent),
    Started(SessionRecord),
    Ended(SessionClosure),
    Retracted(AnnouncementRef, SessionRecord),
}

#[derive(Default)]
pub struct RecordingDispatcher {
    calls: Mutex<Vec<Dispatched>>,
    announcement: Mutex<Option<AnnouncementRef>>,
    fail: AtomicBool,
    missing_announcements: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announcement handle returned from `session_started`.
    pub fn announce_as(&self, announcement: AnnouncementRef) {
        *self.announcement.lock().unwrap() = Some(announcement);
    }

    pub fn fail_all(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn lose_announcements(&self, lost: bool) {
        self.missing_announcements.store(lost, Ordering::SeqCst);
    }

    pub fn delay_by(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<Dispatched> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Dispatched) -> Result<(), DispatchError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DispatchError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    async fn push_received(&self, intent: &PushNotificationIntent) -> Result<(), DispatchError> {
        self.record(Dispatched::Push(intent.clone())).await
    }

    async fn session_started(
        &self,
        record: &SessionRecord,
    ) -> Result<Option<AnnouncementRef>, DispatchError> {
        self.record(Dispatched::Started(record.clone())).await?;
        Ok(*self.announcement.lock().unwrap())
    }

    async fn session_ended(&self, closure: &SessionClosure) -> Result<(), DispatchError> {
        self.record(Dispatched::Ended(closure.clone())).await
    }

    async fn retract_announcement(
        &self,
        announcement: AnnouncementRef,
        session: &SessionRecord,
    ) -> Result<(), DispatchError> {
        self.record(Dispatched::Retracted(announcement, session.clone()))
            .await?;
        if self.missing_announcements.load(Ordering::SeqCst) {
            return Err(DispatchError::AnnouncementNotFound(announcement));
        }
        Ok(())
    }
}
