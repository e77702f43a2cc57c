use anyhow::{Context as _, Result};
use spacetv_session::{SessionManager, UserSwitchController};
use spacetv_store::{PrefStore, UserStore};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. SPACETV_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.spacetv (fallback for systems without XDG)
pub fn resolve_data_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("SPACETV_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("spacetv"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".spacetv"));
    }

    anyhow::bail!("Could not determine data path: no HOME directory or XDG data directory found")
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Shared handles for one CLI invocation.
pub struct AppContext {
    pub store: Arc<Mutex<UserStore>>,
    pub session: SessionManager,
    pub controller: UserSwitchController,
}

impl AppContext {
    pub fn open(explicit_data_dir: Option<&str>) -> Result<Self> {
        let data_dir = resolve_data_path(explicit_data_dir)?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;

        let store = Arc::new(Mutex::new(
            UserStore::open(&data_dir.join("users.db"))
                .context("Failed to open account database")?,
        ));
        let session = SessionManager::new(PrefStore::new(data_dir.join("session.toml")));
        let controller = UserSwitchController::new(store.clone(), session.clone());

        Ok(Self {
            store,
            session,
            controller,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_data_path(Some("/tmp/spacetv-test")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/spacetv-test"));
    }

    #[test]
    fn test_tilde_expansion() {
        if std::env::var_os("HOME").is_some() {
            let path = resolve_data_path(Some("~/spacetv-test")).unwrap();
            assert!(!path.to_string_lossy().starts_with('~'));
        }
    }
}
