//! Core of the `lined` line editor: an in-memory line buffer, the
//! transcoding between that buffer and a text file, and the
//! menu-driven session that edits it.

pub mod command;
pub mod document;
pub mod error;
pub mod input;
pub mod session;
pub mod transcoder;

pub use command::{parse_command, MenuCommand};
pub use document::{Document, Line};
pub use error::{LinedError, Result};
pub use session::{Outcome, Prompt, Session, TextTarget};
pub use transcoder::{load, save};
