//! Message handling - Webhook notification processing

pub mod dispatcher;
pub mod parser;

pub use dispatcher::CommandDispatcher;
pub use parser::{extract_remainder, parse_notification};
