//! Parse a raw command-line string into a command name, a flag map and an
//! ordered list of positional arguments.
//!
//! ```
//! let cmd = argline::parse(r#"deploy "my app" -e prod --dry-run"#).unwrap();
//! assert_eq!(cmd.command(), "deploy");
//! assert_eq!(cmd.positionals(), ["my app"]);
//! assert_eq!(cmd.flag_value("e"), Some("prod"));
//! assert!(cmd.is_switch("dry-run"));
//! ```

pub mod classify;
pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod repl;
pub mod util;

pub use command::{FlagValue, ParsedCommand};
pub use error::{ParseError, Result};
pub use parser::{tokenize, Token};

pub fn parse(raw: &str) -> Result<ParsedCommand> {
    ParsedCommand::parse(raw)
}
