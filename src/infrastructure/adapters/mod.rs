//! Messaging platform adapters

pub mod spark;

pub use spark::SparkClient;
