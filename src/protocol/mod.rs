//! Payload values the factory turns into envelope items.
//!
//! These are finished values by the time they reach this crate: session
//! lifecycle, event capture, and feedback collection all happen upstream.

mod event;
mod feedback;
mod session;

pub use event::{Event, Level};
pub use feedback::UserFeedback;
pub use session::{Session, SessionStatus};
