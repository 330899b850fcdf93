//! Interactive front end for termbank.
//!
//! The binary is a thin loop: read a line, look the command up in the
//! registry, run its handler against the session. All state lives in the
//! [`Session`] context object passed to every handler — there are no
//! globals and no static "is a dictionary loaded" flag.

pub mod commands;
pub mod session;

pub use commands::{split_words, CommandRegistry, Outcome};
pub use session::{Mode, Session};
