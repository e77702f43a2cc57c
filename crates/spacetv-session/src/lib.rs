// NOTE: Session Ownership Rationale
//
// Why an explicit SessionManager instead of global preference reads?
// - The active session is process-wide state that several screens read
// - Routing every write through one injected handle keeps the
//   single-active-user invariant checkable and makes tests trivial
//
// Why a wholesale projection instead of incremental list patches?
// - The switch screen needs the list and the resolved current user to
//   come from the same read of the store
// - Rebuilding the whole SwitchState per mutation keeps intermediate
//   states unobservable at the cost of re-reading a list that is at
//   most a handful of accounts

mod controller;
mod error;
mod manager;

pub use controller::{SwitchState, UserSwitchController};
pub use error::{Error, Result};
pub use manager::SessionManager;
