//! Live-share session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/session/start - Start (or replace) the session
//! - GET  /api/v1/session       - Current session status
//! - POST /api/v1/session/end   - End the session and report its duration
//!
//! Every request names the channel it came from and the acting user;
//! commands from any channel but the dashboard are refused.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::Deserialize;

use dashbot_types::session::{ChannelId, CommandContext, CommandOutput, SessionCommand};

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Who is issuing the command, and from where.
#[derive(Debug, Deserialize)]
pub struct CommandOrigin {
    pub channel_id: ChannelId,
    pub actor: String,
}

impl From<CommandOrigin> for CommandContext {
    fn from(origin: CommandOrigin) -> Self {
        CommandContext {
            channel_id: origin.channel_id,
            actor: origin.actor,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    #[serde(flatten)]
    pub origin: CommandOrigin,
    #[serde(default)]
    pub link: Option<String>,
}

async fn run(
    state: &AppState,
    origin: CommandOrigin,
    command: SessionCommand,
) -> Result<Json<ApiResponse<CommandOutput>>, AppError> {
    let timer = RequestTimer::start();
    let ctx = CommandContext::from(origin);

    let output = state.session_service.execute(&ctx, command).await?;

    Ok(Json(
        ApiResponse::success(output, &timer).with_link("self", "/api/v1/session"),
    ))
}

/// POST /api/v1/session/start
pub async fn start_session(
    State(state): State<AppState>,
    body: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CommandOutput>>, AppError> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    run(
        &state,
        request.origin,
        SessionCommand::Start { link: request.link },
    )
    .await
}

/// GET /api/v1/session?channel_id=..&actor=..
pub async fn session_status(
    State(state): State<AppState>,
    query: Result<Query<CommandOrigin>, QueryRejection>,
) -> Result<Json<ApiResponse<CommandOutput>>, AppError> {
    let Query(origin) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    run(&state, origin, SessionCommand::Status).await
}

/// POST /api/v1/session/end
pub async fn end_session(
    State(state): State<AppState>,
    body: Result<Json<CommandOrigin>, JsonRejection>,
) -> Result<Json<ApiResponse<CommandOutput>>, AppError> {
    let Json(origin) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    run(&state, origin, SessionCommand::End).await
}
