//! HTTP layer for dashbot.
//!
//! `POST /webhook` speaks GitHub's plain-text contract (200/400/401). The
//! session API under `/api/v1/` uses the JSON envelope format.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
