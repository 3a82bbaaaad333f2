//! Secret Santa - coordinate a gift exchange inside a chat community
//!
//! This library provides:
//! - The derangement assignment engine (nobody draws themselves)
//! - The per-community event lifecycle with ordered guard checks
//! - A JSON-file event store and configuration loading
//! - The `Exchange` service with notification fan-out after `start`
//! - A CLI front end standing in for the chat command dispatcher

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod exchange;
pub mod fs;
pub mod schemas;
pub mod store;

// Re-export commonly used types
pub use errors::{DeliveryError, Result, SantaError};
pub use exchange::{Exchange, LogNotifier, Notifier, OutboxNotifier};
pub use schemas::{Config, Event, EventSnapshot, EventState, EventSummary, ParticipantCount, StartReport};
