//! Email dispatch abstraction
//!
//! The core only knows how to hand a composed message to a sender; the
//! concrete transports (HTTP relay, log-only) live in the infrastructure
//! layer.

pub mod mock;
mod traits;

pub use traits::{EmailMessage, EmailService};
