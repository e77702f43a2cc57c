// Local account storage
// One SQLite table of profiles, one TOML file for the active session

mod db;
mod error;
mod prefs;

// Public API
pub use db::{UserStore, SCHEMA_VERSION};
pub use error::{Error, Result};
pub use prefs::{ActivePrefs, PrefStore};
