//! # GrowTeens API
//!
//! HTTP layer for the GrowTeens backend: route handlers, DTOs, the bearer
//! authentication gate, and the Actix-web application factory. The binary in
//! `main.rs` wires this layer to the MySQL repositories and outbound clients
//! from `gt_infra`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
