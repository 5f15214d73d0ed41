//! CLI support for the chatwire binary.
//!
//! - Argument parsing
//! - Version and usage text
//! - Line commands typed at the prompt

pub mod args;
pub mod repl;
pub mod version;

pub use args::{log_level, parse_args, CliCommand};
pub use repl::{parse_line, LineCommand, ReplyRenderer};
pub use version::{version_string, USAGE, VERSION};
