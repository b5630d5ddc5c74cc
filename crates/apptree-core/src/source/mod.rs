//! Source selection for init and pull.
//!
//! Decides where a project's content comes from:
//! - Scaffold: nothing given, write a fresh config
//! - Existing app: export a remote app and unpack it
//! - Template: recognized but not supported yet

mod selector;
mod spec;

pub use selector::{resolve_app_or_group, select_source};
pub use spec::{FromType, SourceSelection, classify};

#[cfg(test)]
mod tests;
