//! CLI module - Command-line interface for Quillpad
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quillpad - a tiny article board with a single administrator
#[derive(Parser)]
#[command(name = "quillpad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, env = "QUILLPAD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create the database schema
    Initdb {
        /// Drop every table first
        #[arg(long)]
        drop: bool,
    },

    /// Fill the database with sample articles
    Forge,

    /// Create or update the administrator account
    Admin {
        /// Login name (prompted when omitted)
        #[arg(long)]
        username: Option<String>,
        /// Login password (prompted twice when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Display name, at most 4 characters
        #[arg(long)]
        name: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
