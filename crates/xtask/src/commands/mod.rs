//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod replay;
mod toggles;

pub use replay::Replay;
pub use toggles::Toggles;
