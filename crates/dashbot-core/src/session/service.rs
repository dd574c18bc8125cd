//! Session command front door.
//!
//! `SessionService` accepts commands only from the configured dashboard
//! channel, drives [`SessionLifecycle`], and announces transitions through
//! the [`NotificationDispatcher`]. Announcements are best-effort: a failed
//! or slow dispatch is logged and never changes the command's result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use dashbot_types::error::{DispatchError, SessionError};
use dashbot_types::session::{
    AnnouncementRef, ChannelId, CommandContext, CommandOutput, SessionClosure, SessionCommand,
    SessionRecord, StartOutcome,
};

use crate::clock::Clock;
use crate::notify::NotificationDispatcher;
use crate::repository::session::SessionRepository;
use crate::session::lifecycle::SessionLifecycle;

pub struct SessionService<R, C, D> {
    lifecycle: SessionLifecycle<R, C>,
    dispatcher: Arc<D>,
    channel_id: ChannelId,
    dispatch_timeout: Duration,
}

impl<R, C, D> SessionService<R, C, D>
where
    R: SessionRepository,
    C: Clock,
    D: NotificationDispatcher,
{
    pub fn new(
        lifecycle: SessionLifecycle<R, C>,
        dispatcher: Arc<D>,
        channel_id: ChannelId,
        dispatch_timeout: Duration,
    ) -> Self {
        Self {
            lifecycle,
            dispatcher,
            channel_id,
            dispatch_timeout,
        }
    }

    /// Run one session command on behalf of `ctx.actor`.
    pub async fn execute(
        &self,
        ctx: &CommandContext,
        command: SessionCommand,
    ) -> Result<CommandOutput, SessionError> {
        if ctx.channel_id != self.channel_id {
            debug!(
                expected = %self.channel_id,
                actual = %ctx.channel_id,
                actor = %ctx.actor,
                "session command from wrong channel"
            );
            return Err(SessionError::WrongChannel {
                expected: self.channel_id,
                actual: ctx.channel_id,
            });
        }

        match command {
            SessionCommand::Start { link } => {
                let link = link.unwrap_or_default();
                let outcome = self.start(&ctx.actor, &link).await?;
                Ok(CommandOutput::Start(outcome))
            }
            SessionCommand::Status => Ok(CommandOutput::Status(self.lifecycle.status().await?)),
            SessionCommand::End => Ok(CommandOutput::End(self.end().await?)),
        }
    }

    async fn start(&self, actor: &str, link: &str) -> Result<StartOutcome, SessionError> {
        let outcome = self.lifecycle.start(actor, link).await?;

        if let Some(previous) = &outcome.displaced {
            if let Some(announcement) = previous.last_message_id {
                self.retract(announcement, previous).await;
            }
        }

        let announced = self
            .dispatch("session_started", self.dispatcher.session_started(&outcome.record))
            .await
            .flatten();

        let mut outcome = outcome;
        if let Some(announcement) = announced {
            match self
                .lifecycle
                .attach_announcement(outcome.token, announcement)
                .await
            {
                Ok(true) => outcome.record.last_message_id = Some(announcement),
                Ok(false) => {
                    // Ended or replaced while the announcement was in flight.
                    info!(%announcement, "session changed before announcement was recorded");
                    self.retract(announcement, &outcome.record).await;
                }
                Err(e) => warn!(
                    %announcement,
                    error = %e,
                    "failed to record session announcement"
                ),
            }
        }

        Ok(outcome)
    }

    async fn end(&self) -> Result<SessionClosure, SessionError> {
        let closure = self.lifecycle.end().await?;

        self.dispatch("session_ended", self.dispatcher.session_ended(&closure))
            .await;
        if let Some(announcement) = closure.last_message_id {
            self.retract(announcement, &closure.record()).await;
        }

        Ok(closure)
    }

    async fn retract(&self, announcement: AnnouncementRef, session: &SessionRecord) {
        let result = tokio::time::timeout(
            self.dispatch_timeout,
            self.dispatcher.retract_announcement(announcement, session),
        )
        .await;

        match result {
            Ok(Ok(())) => debug!(%announcement, "announcement retracted"),
            Ok(Err(DispatchError::AnnouncementNotFound(_))) => {
                warn!(%announcement, "announcement already gone; nothing to retract")
            }
            Ok(Err(e)) => warn!(%announcement, error = %e, "failed to retract announcement"),
            Err(_) => warn!(
                %announcement,
                timeout = ?self.dispatch_timeout,
                "retracting announcement timed out"
            ),
        }
    }

    /// Await a dispatch under the configured timeout, logging any failure.
    async fn dispatch<T>(
        &self,
        what: &'static str,
        fut: impl Future<Output = Result<T, DispatchError>>,
    ) -> Option<T> {
        match tokio::time::timeout(self.dispatch_timeout, fut).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!(dispatch = what, error = %e, "notification failed");
                None
            }
            Err(_) => {
                warn!(
                    dispatch = what,
                    timeout = ?self.dispatch_timeout,
                    "notification timed out"
                );
                None
            }
        }
    }
}
