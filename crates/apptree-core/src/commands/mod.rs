//! High-level commands for apptree operations.
//!
//! Each command resolves its inputs, picks a source and persists the result.
//! They are the public API called by the CLI; prompting and remote access are
//! injected so frontends and tests can supply their own.

pub mod init;
pub mod pull;
pub mod push;

pub use init::{InitCommand, InitReport};
pub use pull::{PullCommand, PullReport};
pub use push::{PushCommand, PushReport};
