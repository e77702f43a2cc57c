use log::debug;
use spacetv_store::UserStore;
use spacetv_types::UserProfile;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::{Result, SessionManager};

/// In-memory projection of the switch/manage screen.
///
/// Rebuilt wholesale by `refresh`; readers never observe a list and a
/// current user from two different reads of the store.
#[derive(Debug, Clone)]
pub struct SwitchState {
    /// True until the first load of the profile list completes.
    pub loading: bool,
    /// Stored profiles, in insertion order.
    pub users: Vec<UserProfile>,
    /// Active profile, resolved against `users`; the logged-out
    /// sentinel when the active uid is absent from the stored set.
    pub current: UserProfile,
    /// Manage-accounts mode. UI-only; deletion is allowed regardless.
    pub managing: bool,
}

impl SwitchState {
    fn initial() -> Self {
        Self {
            loading: true,
            users: Vec::new(),
            current: UserProfile::logged_out(),
            managing: false,
        }
    }
}

/// Orchestrates the account store and the session manager for the
/// switch/manage screen.
///
/// Mutating operations (`refresh`, `switch_user`, `delete_user`) are
/// single-flight: a per-controller async mutex serializes them, so
/// concurrent callers queue instead of interleaving. The store's own
/// lock is only held for individual statements, never across an await.
pub struct UserSwitchController {
    store: Arc<Mutex<UserStore>>,
    session: SessionManager,
    state: watch::Sender<SwitchState>,
    op_lock: tokio::sync::Mutex<()>,
}

impl UserSwitchController {
    pub fn new(store: Arc<Mutex<UserStore>>, session: SessionManager) -> Self {
        let (state, _) = watch::channel(SwitchState::initial());
        Self {
            store,
            session,
            state,
            op_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Subscribe to projection updates. Each send replaces the whole
    /// state; a teardown mid-operation just drops the receiver and the
    /// in-flight mutation still runs to completion.
    pub fn subscribe(&self) -> watch::Receiver<SwitchState> {
        self.state.subscribe()
    }

    /// Snapshot of the current projection.
    pub fn state(&self) -> SwitchState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Re-read the profile list and recompute the active user.
    ///
    /// Also used as the initial load; clears the loading flag.
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        self.refresh_locked()?;
        Ok(())
    }

    /// Make `target` the active session.
    ///
    /// Precondition: `target` is a member of the current projection;
    /// selections come from the rendered list, so the controller does
    /// not re-check membership here.
    pub async fn switch_user(&self, target: &UserProfile) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        self.switch_locked(target)
    }

    /// Delete `target` and re-point the active session.
    ///
    /// Strictly ordered: the delete commits before the list is
    /// re-read, and the re-read completes before the fallback decision.
    /// Whatever profile was active, the session then switches to the
    /// first remaining profile, or logs out when none remain.
    pub async fn delete_user(&self, target: &UserProfile) -> Result<()> {
        let _guard = self.op_lock.lock().await;

        {
            let store = self.store.lock().unwrap();
            store.delete(target.uid)?;
        }

        let remaining = self.refresh_locked()?;

        match remaining.first() {
            Some(first) => self.switch_locked(first)?,
            None => {
                self.session.logout()?;
                self.state.send_modify(|s| {
                    s.current = UserProfile::logged_out();
                });
            }
        }

        debug!(
            "deleted uid={}, {} profile(s) remain",
            target.uid,
            remaining.len()
        );
        Ok(())
    }

    /// Toggle manage-accounts mode. Purely a projection flag.
    pub fn set_managing(&self, managing: bool) {
        self.state.send_modify(|s| s.managing = managing);
    }

    fn refresh_locked(&self) -> Result<Vec<UserProfile>> {
        let users = {
            let store = self.store.lock().unwrap();
            store.list_all()?
        };
        let active_uid = self.session.current()?.uid;
        let current = users
            .iter()
            .find(|u| u.uid == active_uid)
            .cloned()
            .unwrap_or_else(UserProfile::logged_out);

        // List and current land in one send, so observers never see a
        // half-updated projection.
        self.state.send_modify(|s| {
            s.loading = false;
            s.users = users.clone();
            s.current = current;
        });

        Ok(users)
    }

    fn switch_locked(&self, target: &UserProfile) -> Result<()> {
        self.session.set_current(target)?;
        self.state.send_modify(|s| s.current = target.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacetv_store::PrefStore;
    use tempfile::TempDir;

    fn profile(uid: i64) -> UserProfile {
        UserProfile::new(uid, format!("user-{}", uid), "", format!("tok-{}", uid))
    }

    fn controller(dir: &TempDir) -> (UserSwitchController, Arc<Mutex<UserStore>>) {
        let store = Arc::new(Mutex::new(UserStore::open_in_memory().unwrap()));
        let session = SessionManager::new(PrefStore::new(dir.path().join("session.toml")));
        (
            UserSwitchController::new(store.clone(), session),
            store,
        )
    }

    #[tokio::test]
    async fn test_starts_loading_then_ready() {
        let dir = TempDir::new().unwrap();
        let (controller, _store) = controller(&dir);

        assert!(controller.state().loading);
        controller.refresh().await.unwrap();
        assert!(!controller.state().loading);
    }

    #[tokio::test]
    async fn test_refresh_resolves_current_against_fresh_list() {
        let dir = TempDir::new().unwrap();
        let (controller, store) = controller(&dir);

        store.lock().unwrap().insert(&profile(1)).unwrap();
        controller.session().set_current(&profile(1)).unwrap();
        controller.refresh().await.unwrap();
        assert_eq!(controller.state().current.uid, 1);

        // Active profile deleted behind the controller's back
        store.lock().unwrap().delete(1).unwrap();
        controller.refresh().await.unwrap();
        assert!(controller.state().current.is_logged_out());
    }

    #[tokio::test]
    async fn test_managing_flag_independent_of_loading() {
        let dir = TempDir::new().unwrap();
        let (controller, _store) = controller(&dir);

        controller.set_managing(true);
        let state = controller.state();
        assert!(state.managing);
        assert!(state.loading);
    }
}
