use log::info;
use spacetv_store::{ActivePrefs, PrefStore};
use spacetv_types::UserProfile;
use std::sync::{Arc, Mutex};

use crate::Result;

/// Exclusive owner of the active-session state.
///
/// Any component may read the current user through a clone of this
/// handle, but only the manager writes the underlying preference file.
/// `set_current` performs no validation against the user table; the
/// switch controller is responsible for only passing profiles that are
/// members of the stored set.
#[derive(Debug, Clone)]
pub struct SessionManager {
    prefs: Arc<Mutex<PrefStore>>,
}

impl SessionManager {
    pub fn new(prefs: PrefStore) -> Self {
        Self {
            prefs: Arc::new(Mutex::new(prefs)),
        }
    }

    /// The currently active profile, or the logged-out sentinel.
    pub fn current(&self) -> Result<UserProfile> {
        let prefs = self.prefs.lock().unwrap();
        Ok(prefs.load()?.to_profile())
    }

    /// Persist `profile` as the active session.
    pub fn set_current(&self, profile: &UserProfile) -> Result<()> {
        let prefs = self.prefs.lock().unwrap();
        prefs.save(&ActivePrefs::from_profile(profile))?;
        info!("active session switched to uid={}", profile.uid);
        Ok(())
    }

    /// Reset the active session to the logged-out sentinel.
    pub fn logout(&self) -> Result<()> {
        let prefs = self.prefs.lock().unwrap();
        prefs.save(&ActivePrefs::default())?;
        info!("active session logged out");
        Ok(())
    }
}
