//! Request and response types for the HTTP API
//!
//! All wire field names are camelCase to match the frontend contract; the
//! snake_case domain entities never serialize directly onto the wire.

pub mod auth;
pub mod chat;
pub mod enrollments;
pub mod flashcards;
pub mod programs;
