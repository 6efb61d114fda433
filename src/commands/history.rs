//! Moving through a session's history
//!
//! - back: Go back in history
//! - forward: Go forward in history
//!
//! Both are no-ops on the daemon side when there is nowhere to go.

pub mod back;
pub mod forward;
