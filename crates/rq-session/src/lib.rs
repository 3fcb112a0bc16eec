//! In-memory session store for extracted document text.
//!
//! Sessions map an opaque handle to one uploaded document's normalized
//! text, with fixed-window TTL expiry measured from creation.

pub mod session;
pub mod store;
pub mod sweeper;

pub use session::Session;
pub use store::{SessionStore, SessionUpdate};
pub use sweeper::spawn_sweeper;
