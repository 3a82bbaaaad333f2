//! CLI module for secret-santa
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Secret Santa - run a gift exchange for a community
#[derive(Parser, Debug)]
#[command(name = "secret-santa")]
#[command(version)]
#[command(about = "Run a Secret Santa gift exchange: people join, the organizer starts, everyone learns who to gift")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.json, the event document and the outbox
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

/// Who is acting, and where
#[derive(Args, Debug, Clone)]
pub struct Actor {
    /// Community (server/group) the event belongs to
    #[arg(long, default_value = "default")]
    pub community: String,

    /// Id of the user running the command
    #[arg(long)]
    pub user: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new Secret Santa event
    Create {
        /// Name of the Secret Santa event
        name: String,

        #[command(flatten)]
        actor: Actor,
    },

    /// Join the Secret Santa event
    Join {
        #[command(flatten)]
        actor: Actor,
    },

    /// Leave the Secret Santa event
    Leave {
        #[command(flatten)]
        actor: Actor,
    },

    /// Start the Secret Santa and assign matches (organizer only)
    Start {
        #[command(flatten)]
        actor: Actor,
    },

    /// View the current Secret Santa event status
    Status {
        #[command(flatten)]
        actor: Actor,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cancel the current Secret Santa event (organizer only)
    Cancel {
        #[command(flatten)]
        actor: Actor,
    },
}
