mod args;
mod commands;
pub mod context;
mod handlers;

pub use args::{AccountCommand, Cli, Commands, ListingShape, VideoCommand};
pub use commands::run;
