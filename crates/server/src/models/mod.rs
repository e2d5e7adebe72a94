//! Domain types for the tracker.
//!
//! These are validated domain objects, distinct from the raw row types the
//! repositories deserialize; conversion happens at the repository boundary.

pub mod class;
pub mod progress;
pub mod session;
pub mod user;

pub use class::{Class, ClassStudent, ProgressSummary};
pub use progress::ProgressEntry;
pub use session::CurrentUser;
pub use user::User;
