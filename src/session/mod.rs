//! Session state machine.
//!
//! One actor task owns the input text, the validity flag, the operation state
//! and the result list. Callers talk to it through a [`SessionHandle`] and
//! observe it through [`SessionSnapshot`]s published on a watch channel.

pub mod actor;
pub mod handle;
pub mod state;


pub use actor::Session;
pub use handle::SessionHandle;
pub use state::{SessionConfig, SessionSnapshot};
