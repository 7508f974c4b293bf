//! CLI module - Command-line interface for city-explorer
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// city-explorer - location, weather and events lookup backend
#[derive(Parser)]
#[command(name = "city-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Check configuration and database connectivity
    #[command(alias = "-c", alias = "--check")]
    Check,

    /// Look up a location through the cache and print it
    #[command(alias = "l")]
    Location {
        /// Free-text address
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
