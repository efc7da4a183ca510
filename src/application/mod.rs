//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Command table and webhook reconciliation
//! - Errors: Domain-specific errors
//! - Messaging: Notification parsing and dispatching

pub mod errors;
pub mod services;
pub mod messaging;
