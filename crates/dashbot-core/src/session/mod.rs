//! The single-slot collaboration session: storage owner, state machine, and
//! the command service that pairs transitions with notifications.

pub mod lifecycle;
pub mod service;
pub mod store;

pub use lifecycle::SessionLifecycle;
pub use service::SessionService;
pub use store::SessionStore;
