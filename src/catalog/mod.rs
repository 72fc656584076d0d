//! Client-side catalog logic.
//!
//! Filtering, aggregate statistics and form extraction are pure functions over the
//! collection; [`ClientSession`] ties them to a slot-backed repository the way the
//! browser client drives its local store.

mod filter;
mod form;
mod session;
mod stats;

pub use filter::*;
pub use form::*;
pub use session::*;
pub use stats::*;
