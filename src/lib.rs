//! Trello card intake service for the CTO platform.
//!
//! This crate provides:
//! - Typed card-creation requests with strict validation
//! - Pluggable secret backends (Vault-style KV service or mounted files)
//! - REST client for the Trello API
//! - HTTP server exposing the card intake endpoint (standalone service)

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Many async API methods can fail

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod secrets;
pub mod server;

pub use client::TrelloClient;
pub use config::Config;
pub use error::IntakeError;
pub use models::*;
pub use secrets::{SecretStore, TrelloSecrets};
