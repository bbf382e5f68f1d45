//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for pinmark using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **add**: Save a new place at the given coordinates
//! - **list**: Show saved places, optionally filtered by a query (default)
//! - **show**: Select one place and print its full detail
//! - **edit**: Update fields of an existing place
//! - **remove**: Delete one place (asks for confirmation)
//! - **clear**: Delete every place (asks for confirmation)
//! - **export**: Write the collection to a JSON file
//! - **import**: Read places from a JSON file (replace or append)
//! - **open**: Open a place's link in the browser
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Global `--database` flag overriding the configured database path
//! - Command aliases (e.g., `ls` for `list`, `rm` for `remove`)
//! - Destructive commands accept `--yes` to skip the confirmation prompt

use crate::codec::ImportMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Import mode as exposed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportModeArg {
    /// Discard the existing collection and install the imported one
    Replace,
    /// Keep the existing collection and append the imported records
    #[default]
    Append,
}

impl From<ImportModeArg> for ImportMode {
    fn from(arg: ImportModeArg) -> Self {
        match arg {
            ImportModeArg::Replace => Self::Replace,
            ImportModeArg::Append => Self::Append,
        }
    }
}

/// Personal geo-bookmarking: save named map locations and browse them
#[derive(Parser, Debug)]
#[command(name = "pinmark", version, about)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use this database directory instead of the configured one
    #[arg(long, global = true, value_name = "DIR")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The requested command, defaulting to `list` with no query
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::List { query: None })
    }
}

/// All pinmark subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Save a new place
    #[command(visible_alias = "a")]
    Add {
        /// Title of the place
        title: String,
        /// Latitude
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude
        #[arg(allow_negative_numbers = true)]
        lng: f64,
        /// Link URL
        #[arg(short, long)]
        url: Option<String>,
        /// Photo URL (Google Drive share links are recognized)
        #[arg(short, long)]
        photo: Option<String>,
        /// Note text
        #[arg(short, long)]
        note: Option<String>,
        /// Open the link in the same tab instead of a new one
        #[arg(long)]
        same_tab: bool,
    },

    /// List saved places, newest first
    #[command(visible_alias = "ls")]
    List {
        /// Filter by a case-insensitive substring of title or note
        query: Option<String>,
    },

    /// Show full detail of one place
    #[command(visible_alias = "s")]
    Show {
        /// Id of the place
        id: String,
    },

    /// Edit fields of an existing place
    #[command(visible_alias = "e")]
    Edit {
        /// Id of the place
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        /// New longitude
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
        /// New link URL (empty string clears it)
        #[arg(long)]
        url: Option<String>,
        /// New photo URL (empty string clears it)
        #[arg(long)]
        photo: Option<String>,
        /// New note (empty string clears it)
        #[arg(long)]
        note: Option<String>,
        /// Open the link in the same tab instead of a new one
        #[arg(long)]
        same_tab: bool,
        /// Open the link in a new tab
        #[arg(long, conflicts_with = "same_tab")]
        new_tab: bool,
    },

    /// Delete one place
    #[command(visible_alias = "rm")]
    Remove {
        /// Id of the place
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every saved place
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the collection to a JSON file
    Export {
        /// Output file (defaults to places.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Import places from a JSON file
    Import {
        /// File containing a JSON array of places
        file: PathBuf,
        /// Whether imported places replace or extend the collection
        #[arg(short, long, value_enum, default_value = "append")]
        mode: ImportModeArg,
    },

    /// Open a place's link in the browser
    #[command(visible_alias = "o")]
    Open {
        /// Id of the place
        id: String,
    },
}
