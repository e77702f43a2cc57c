use log::debug;
use serde::{Deserialize, Serialize};
use spacetv_types::{UserProfile, LOGGED_OUT_UID};
use std::path::{Path, PathBuf};

use crate::Result;

fn default_uid() -> i64 {
    LOGGED_OUT_UID
}

/// Persisted active-session preferences.
///
/// A single TOML file holding the fields of the currently active
/// account. A missing file and a missing `uid` key both resolve to the
/// logged-out sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivePrefs {
    #[serde(default = "default_uid")]
    pub uid: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub auth_token: String,
}

impl Default for ActivePrefs {
    fn default() -> Self {
        Self {
            uid: LOGGED_OUT_UID,
            username: String::new(),
            avatar: String::new(),
            auth_token: String::new(),
        }
    }
}

impl ActivePrefs {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            uid: profile.uid,
            username: profile.username.clone(),
            avatar: profile.avatar.clone(),
            auth_token: profile.auth_token.clone(),
        }
    }

    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            uid: self.uid,
            username: self.username.clone(),
            avatar: self.avatar.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

/// File-backed preference store for the active session.
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ActivePrefs> {
        if !self.path.exists() {
            return Ok(ActivePrefs::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let prefs: ActivePrefs = toml::from_str(&content)?;
        Ok(prefs)
    }

    pub fn save(&self, prefs: &ActivePrefs) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(prefs)?;
        std::fs::write(&self.path, content)?;
        debug!("saved active session uid={}", prefs.uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = PrefStore::new(temp_dir.path().join("session.toml"));

        let loaded = prefs.load().unwrap();
        assert_eq!(loaded.uid, LOGGED_OUT_UID);
        assert!(loaded.to_profile().is_logged_out());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = PrefStore::new(temp_dir.path().join("session.toml"));

        let user = UserProfile::new(77, "name", "avatar", "token");
        prefs.save(&ActivePrefs::from_profile(&user)).unwrap();

        let loaded = prefs.load().unwrap();
        assert_eq!(loaded.to_profile(), user);
    }

    #[test]
    fn test_missing_uid_key_defaults_to_sentinel() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        std::fs::write(&path, "username = \"stale\"\n").unwrap();

        let loaded = PrefStore::new(path).load().unwrap();
        assert_eq!(loaded.uid, LOGGED_OUT_UID);
    }
}
