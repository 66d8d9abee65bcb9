//! AutoCita command router: classifies each inbound message and produces the
//! reply, driving the guided session flow and the backend as needed.

pub mod dispatcher;
pub mod intent;
pub mod reply;

pub use dispatcher::Dispatcher;
pub use intent::{classify, Intent};
pub use reply::Reply;

#[cfg(test)]
mod tests;
