//! Schema types for secret-santa
//!
//! `Event` and `DataStore` are persisted; the rest are returned to callers.

mod config;
mod event;
mod reports;
mod store;

pub use config::Config;
pub use event::{Event, EventState, Matches};
pub use reports::{AssignmentNotice, EventSnapshot, EventSummary, ParticipantCount, StartReport};
pub use store::DataStore;
