use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use spacetv_types::UserProfile;
use std::path::Path;

use crate::{Error, Result};

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Account Table Design Rationale
//
// Why a separate `seq` column next to the `uid` key?
// - `uid INTEGER PRIMARY KEY` would alias SQLite's rowid, making
//   iteration order follow uid numerically rather than insertion
// - Callers render accounts in the order they were added, and the
//   delete-fallback policy picks "the first remaining profile", so
//   stable insertion order is part of the contract
//
// Why is delete a no-op for absent uids?
// - The controller re-reads the table after every mutation anyway
// - Idempotent deletes make the net-set convergence property trivial
//   and match the behavior of the platform DAO this replaces

/// Durable account table.
///
/// Owns every read and write of stored profiles; no other component
/// touches the backing table directly. The store imposes no exclusion
/// of its own; callers serialize access (see `spacetv-session`).
pub struct UserStore {
    conn: Connection,
}

impl UserStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let current_version: i32 =
            self.conn
                .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if current_version != 0 && current_version != SCHEMA_VERSION {
            self.conn.execute_batch("DROP TABLE IF EXISTS users;")?;
        }

        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                uid INTEGER NOT NULL UNIQUE,
                username TEXT NOT NULL,
                avatar TEXT NOT NULL,
                auth_token TEXT NOT NULL
            );
            "#,
        )?;

        self.conn
            .execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

        Ok(())
    }

    /// Insert a new profile. Fails with `DuplicateUid` if the uid is
    /// already present.
    pub fn insert(&self, profile: &UserProfile) -> Result<()> {
        let inserted = self.conn.execute(
            r#"
            INSERT INTO users (uid, username, avatar, auth_token)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                &profile.uid,
                &profile.username,
                &profile.avatar,
                &profile.auth_token
            ],
        );

        match inserted {
            Ok(_) => {
                debug!("inserted account uid={}", profile.uid);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::DuplicateUid(profile.uid))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove the profile with the given uid.
    ///
    /// Deleting an absent uid is a no-op; the returned count is 0.
    pub fn delete(&self, uid: i64) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM users WHERE uid = ?1", [uid])?;
        debug!("deleted account uid={} (removed {} rows)", uid, removed);
        Ok(removed)
    }

    /// All stored profiles, in insertion order.
    pub fn list_all(&self) -> Result<Vec<UserProfile>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT uid, username, avatar, auth_token
            FROM users
            ORDER BY seq ASC
            "#,
        )?;

        let users = stmt
            .query_map([], |row| {
                Ok(UserProfile {
                    uid: row.get(0)?,
                    username: row.get(1)?,
                    avatar: row.get(2)?,
                    auth_token: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    pub fn get(&self, uid: i64) -> Result<Option<UserProfile>> {
        let user = self
            .conn
            .query_row(
                r#"
            SELECT uid, username, avatar, auth_token
            FROM users
            WHERE uid = ?1
            "#,
                [uid],
                |row| {
                    Ok(UserProfile {
                        uid: row.get(0)?,
                        username: row.get(1)?,
                        avatar: row.get(2)?,
                        auth_token: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(user)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(uid: i64) -> UserProfile {
        UserProfile::new(
            uid,
            format!("user-{}", uid),
            format!("https://example.com/{}.jpg", uid),
            format!("token-{}", uid),
        )
    }

    #[test]
    fn test_schema_initialization() {
        let store = UserStore::open_in_memory().unwrap();
        assert_eq!(store.list_all().unwrap().len(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let store = UserStore::open_in_memory().unwrap();
        store.insert(&profile(10)).unwrap();

        let stored = store.get(10).unwrap().unwrap();
        assert_eq!(stored.username, "user-10");
        assert_eq!(stored.auth_token, "token-10");
        assert!(store.get(11).unwrap().is_none());
    }

    #[test]
    fn test_insert_duplicate_uid() {
        let store = UserStore::open_in_memory().unwrap();
        store.insert(&profile(10)).unwrap();

        let err = store.insert(&profile(10)).unwrap_err();
        assert!(matches!(err, Error::DuplicateUid(10)));

        // The first insert is untouched
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_absent_uid_is_noop() {
        let store = UserStore::open_in_memory().unwrap();
        assert_eq!(store.delete(42).unwrap(), 0);

        store.insert(&profile(42)).unwrap();
        assert_eq!(store.delete(42).unwrap(), 1);
        assert_eq!(store.delete(42).unwrap(), 0);
    }

    #[test]
    fn test_list_all_insertion_order() {
        let store = UserStore::open_in_memory().unwrap();

        // uids deliberately out of numeric order
        for uid in [30, 10, 20] {
            store.insert(&profile(uid)).unwrap();
        }

        let uids: Vec<i64> = store.list_all().unwrap().iter().map(|u| u.uid).collect();
        assert_eq!(uids, vec![30, 10, 20]);
    }

    #[test]
    fn test_net_set_after_insert_delete_sequence() {
        let store = UserStore::open_in_memory().unwrap();

        for uid in 1..=5 {
            store.insert(&profile(uid)).unwrap();
        }
        store.delete(2).unwrap();
        store.delete(4).unwrap();
        store.insert(&profile(6)).unwrap();
        store.delete(6).unwrap();
        store.delete(6).unwrap();

        let uids: Vec<i64> = store.list_all().unwrap().iter().map(|u| u.uid).collect();
        assert_eq!(uids, vec![1, 3, 5]);
    }

    #[test]
    fn test_reinserted_uid_moves_to_end() {
        let store = UserStore::open_in_memory().unwrap();

        for uid in [1, 2, 3] {
            store.insert(&profile(uid)).unwrap();
        }
        store.delete(1).unwrap();
        store.insert(&profile(1)).unwrap();

        let uids: Vec<i64> = store.list_all().unwrap().iter().map(|u| u.uid).collect();
        assert_eq!(uids, vec![2, 3, 1]);
    }
}
