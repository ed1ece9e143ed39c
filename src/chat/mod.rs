//! MediBot chat core.
//!
//! - `message` - turn model
//! - `log` - ordered per-session message log
//! - `responder` - rule table picking canned replies
//! - `session` - submission / delayed reply state machine

mod log;
mod message;
mod responder;
mod session;

pub use log::MessageLog;
pub use message::{Message, Role};
pub use responder::{ResponseSelector, Topic};
pub use session::{ChatSession, DEFAULT_REPLY_DELAY, PendingReply, SessionState, SubmitError};
