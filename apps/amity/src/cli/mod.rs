//! # Amity CLI Module
//!
//! This module implements the CLI interface for Amity.
//!
//! ## Available Commands
//!
//! - `add` - Register a member
//! - `send` - Send a friend request
//! - `accept` - Accept a pending friend request
//! - `reject` - Reject a pending friend request
//! - `unfriend` - Remove a friendship
//! - `block` / `unblock` - Manage block edges
//! - `status` - Show the derived relationship status for a pair
//! - `mutual` - Count mutual friends
//! - `recommend` - Ranked friend recommendations
//! - `info` - Show store statistics
//! - `compact` - Compact the database file

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::execute;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Amity - Relationship Engine
///
/// Maintains the social relationship graph between members of a network:
/// friendship lifecycle, blocking, and interest-based friend recommendation.
#[derive(Parser, Debug)]
#[command(name = "amity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the member database
    #[arg(short = 'D', long, global = true, default_value = "amity.redb")]
    pub database: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a member
    Add {
        /// Member id
        #[arg(short, long)]
        id: u64,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Interest tags (comma-separated)
        #[arg(short = 't', long, default_value = "")]
        interests: String,
    },

    /// Send a friend request
    Send {
        /// Sending member id
        #[arg(short, long)]
        from: u64,

        /// Receiving member id
        #[arg(short, long)]
        to: u64,
    },

    /// Accept a pending friend request
    Accept {
        /// Original sender id
        #[arg(short, long)]
        from: u64,

        /// Accepting receiver id
        #[arg(short, long)]
        to: u64,
    },

    /// Reject a pending friend request
    Reject {
        /// Original sender id
        #[arg(short, long)]
        from: u64,

        /// Rejecting receiver id
        #[arg(short, long)]
        to: u64,
    },

    /// Remove a friendship
    Unfriend {
        /// First member id
        #[arg(short, long)]
        a: u64,

        /// Second member id
        #[arg(short, long)]
        b: u64,
    },

    /// Block a member (purges any friendship or pending requests)
    Block {
        /// Blocking member id
        #[arg(long)]
        blocker: u64,

        /// Blocked member id
        #[arg(long)]
        blocked: u64,
    },

    /// Remove a block edge
    Unblock {
        /// Blocking member id
        #[arg(long)]
        blocker: u64,

        /// Previously blocked member id
        #[arg(long)]
        blocked: u64,
    },

    /// Show the derived relationship status for an ordered pair
    Status {
        /// Viewing member id
        #[arg(short, long)]
        viewer: u64,

        /// Subject member id
        #[arg(short, long)]
        subject: u64,
    },

    /// Count mutual friends between two members
    Mutual {
        /// First member id
        #[arg(short, long)]
        a: u64,

        /// Second member id
        #[arg(short, long)]
        b: u64,
    },

    /// Ranked friend recommendations for a member
    Recommend {
        /// Subject member id
        #[arg(short, long)]
        member: u64,

        /// Maximum number of candidates
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show store statistics
    Info,

    /// Compact the database file
    Compact,
}
