use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AuthCommands, BlogCommands, ItineraryCommands, ReportCommands, StaffCommands};

/// Admin console for the Tembo safari backend
///
/// Sign in once and the session is kept between invocations. Itineraries,
/// blog posts and staff accounts can be listed and edited; updates send only
/// the fields that actually changed. Running `tembo` without a command shows
/// the business overview.
#[derive(Parser)]
#[command(version, about, name = "tembo")]
pub struct Args {
    /// Path to the config file. Defaults to
    /// $XDG_CONFIG_HOME/tembo/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the config file and TEMBO_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to the session file. Defaults to
    /// $XDG_STATE_HOME/tembo/session.json
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Tembo CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, sign out and registration
    #[command(alias = "a")]
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Manage itineraries
    #[command(alias = "i")]
    Itinerary {
        #[command(subcommand)]
        command: ItineraryCommands,
    },
    /// Manage blog posts
    #[command(alias = "b")]
    Blog {
        #[command(subcommand)]
        command: BlogCommands,
    },
    /// Manage staff accounts and your own profile
    #[command(alias = "s")]
    Staff {
        #[command(subcommand)]
        command: StaffCommands,
    },
    /// Overview reports
    #[command(alias = "r")]
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
}
