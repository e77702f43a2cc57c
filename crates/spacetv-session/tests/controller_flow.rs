use spacetv_session::{SessionManager, UserSwitchController};
use spacetv_store::{PrefStore, UserStore};
use spacetv_types::UserProfile;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn profile(uid: i64) -> UserProfile {
    UserProfile::new(
        uid,
        format!("user-{}", uid),
        format!("https://example.com/{}.jpg", uid),
        format!("tok-{}", uid),
    )
}

fn setup(dir: &TempDir, uids: &[i64]) -> (Arc<UserSwitchController>, Arc<Mutex<UserStore>>) {
    let store = Arc::new(Mutex::new(UserStore::open_in_memory().unwrap()));
    for uid in uids {
        store.lock().unwrap().insert(&profile(*uid)).unwrap();
    }
    let session = SessionManager::new(PrefStore::new(dir.path().join("session.toml")));
    let controller = Arc::new(UserSwitchController::new(store.clone(), session));
    (controller, store)
}

#[tokio::test]
async fn deleting_sole_profile_logs_out() {
    let dir = TempDir::new().unwrap();
    let (controller, store) = setup(&dir, &[7]);

    controller.refresh().await.unwrap();
    controller.switch_user(&profile(7)).await.unwrap();

    controller.delete_user(&profile(7)).await.unwrap();

    assert!(store.lock().unwrap().list_all().unwrap().is_empty());
    assert!(controller.session().current().unwrap().is_logged_out());
    let state = controller.state();
    assert!(state.users.is_empty());
    assert!(state.current.is_logged_out());
}

#[tokio::test]
async fn deleting_non_active_profile_still_switches_to_first() {
    let dir = TempDir::new().unwrap();
    let (controller, _store) = setup(&dir, &[1, 2, 3]);

    controller.refresh().await.unwrap();
    controller.switch_user(&profile(2)).await.unwrap();

    // 3 was never active, yet the fallback policy re-points the
    // session at the first remaining profile.
    controller.delete_user(&profile(3)).await.unwrap();

    assert_eq!(controller.session().current().unwrap().uid, 1);
    assert_eq!(controller.state().current.uid, 1);
}

#[tokio::test]
async fn deleting_active_profile_falls_back_to_first_remaining() {
    let dir = TempDir::new().unwrap();
    let (controller, _store) = setup(&dir, &[1, 2, 3]);

    controller.refresh().await.unwrap();
    controller.switch_user(&profile(1)).await.unwrap();

    controller.delete_user(&profile(1)).await.unwrap();

    let state = controller.state();
    let uids: Vec<i64> = state.users.iter().map(|u| u.uid).collect();
    assert_eq!(uids, vec![2, 3]);
    assert_eq!(state.current.uid, 2);
    assert_eq!(controller.session().current().unwrap().uid, 2);
}

#[tokio::test]
async fn refresh_after_external_delete_of_active_profile() {
    let dir = TempDir::new().unwrap();
    let (controller, store) = setup(&dir, &[1, 2]);

    controller.refresh().await.unwrap();
    controller.switch_user(&profile(2)).await.unwrap();

    // Delete the active profile bypassing the controller entirely.
    store.lock().unwrap().delete(2).unwrap();
    controller.refresh().await.unwrap();

    // The stale uid resolves to the sentinel, not a ghost profile.
    assert!(controller.state().current.is_logged_out());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_serialize() {
    let dir = TempDir::new().unwrap();
    let (controller, store) = setup(&dir, &[1, 2, 3]);

    controller.refresh().await.unwrap();

    let a = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.delete_user(&profile(1)).await })
    };
    let b = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.delete_user(&profile(2)).await })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    // Both deletions took effect; neither read a stale list.
    let uids: Vec<i64> = store
        .lock()
        .unwrap()
        .list_all()
        .unwrap()
        .iter()
        .map(|u| u.uid)
        .collect();
    assert_eq!(uids, vec![3]);
    assert_eq!(controller.session().current().unwrap().uid, 3);
    assert_eq!(controller.state().current.uid, 3);
}

#[tokio::test]
async fn login_flow_contract_insert_then_refresh() {
    let dir = TempDir::new().unwrap();
    let (controller, store) = setup(&dir, &[1]);

    controller.refresh().await.unwrap();
    assert_eq!(controller.state().users.len(), 1);

    // The external login flow inserts durably, then the screen
    // refreshes on return.
    store.lock().unwrap().insert(&profile(9)).unwrap();
    controller.refresh().await.unwrap();

    let uids: Vec<i64> = controller.state().users.iter().map(|u| u.uid).collect();
    assert_eq!(uids, vec![1, 9]);
}

#[tokio::test]
async fn subscriber_sees_wholesale_projection_updates() {
    let dir = TempDir::new().unwrap();
    let (controller, _store) = setup(&dir, &[1, 2]);

    let mut rx = controller.subscribe();
    assert!(rx.borrow().loading);

    controller.refresh().await.unwrap();
    rx.changed().await.unwrap();

    let state = rx.borrow_and_update().clone();
    assert!(!state.loading);
    assert_eq!(state.users.len(), 2);
}
