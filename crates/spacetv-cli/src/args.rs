use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spacetv")]
#[command(about = "Manage stored accounts and inspect listing data", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Data directory (defaults to the platform data dir)")]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },

    /// Print the active account
    Whoami,

    Videos {
        #[command(subcommand)]
        command: VideoCommand,
    },
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// List stored accounts; the active one is marked
    List,

    /// Store a new account (stands in for the login flow)
    Add {
        #[arg(long)]
        uid: i64,

        #[arg(long)]
        username: String,

        #[arg(long, default_value = "")]
        avatar: String,

        #[arg(long)]
        token: String,
    },

    /// Delete a stored account; the session falls back to the first
    /// remaining account, or logs out when none remain
    Remove { uid: i64 },

    /// Make a stored account the active session
    Switch { uid: i64 },

    /// Show the stored auth data for an account
    Show { uid: i64 },
}

#[derive(Subcommand)]
pub enum VideoCommand {
    /// Normalize a listing response file into canonical records
    Normalize {
        file: PathBuf,

        #[arg(long, value_enum)]
        shape: ListingShape,

        #[arg(long, help = "Emit JSON instead of a table")]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListingShape {
    /// Web endpoint shape ("MM:SS" durations)
    Web,
    /// App endpoint shape (string-typed ids)
    App,
}
