//! Inbound GitHub webhook support.

pub mod signature;

pub use signature::{SignatureVerifier, compute_signature};
