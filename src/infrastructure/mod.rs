//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Webex)
//! - Http: Inbound webhook server

pub mod config;
pub mod adapters;
pub mod http;
