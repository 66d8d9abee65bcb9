//! Per-sender conversation sessions and the guided booking flow.

pub mod flow;
pub mod session;
pub mod store;

pub use flow::{advance, is_reset_command, start, Branch, Transition};
pub use session::{Session, SessionData, Step};
pub use store::{InMemorySessionStore, SessionStore};
