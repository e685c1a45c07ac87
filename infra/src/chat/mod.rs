//! Chat module - LLM gateway relay client
//!
//! The chatbot endpoints do not generate text; they forward a session's
//! turns to an external gateway and hand the streamed response back to the
//! caller untouched.

pub mod relay;

pub use relay::{ChatRelayClient, RelayMessage};
