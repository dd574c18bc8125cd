//! Filesystem adapters for dashbot.

pub mod session;

pub use session::JsonFileSessionRepository;
