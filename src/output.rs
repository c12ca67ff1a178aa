// output.rs

use std::io::Write;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::command::{FlagValue, ParsedCommand};
use crate::config::OutputFormat;
use crate::util::writeln_ignore_broken_pipe;

pub fn render(cmd: &ParsedCommand, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(cmd).context("serializing parsed command"),
        OutputFormat::Plain => Ok(render_plain(cmd)),
    }
}

fn render_plain(cmd: &ParsedCommand) -> String {
    let flags = cmd.flags().iter().map(|(name, value)| match value {
        FlagValue::Switch => format!("flag: --{}", name),
        FlagValue::Value(v) => format!("flag: --{}={}", name, v),
    });
    let positionals = cmd.positionals().iter().map(|p| format!("arg: {}", p));
    std::iter::once(format!("command: {}", cmd.command()))
        .chain(flags)
        .chain(positionals)
        .join("\n")
}

pub fn print<W: Write>(w: W, cmd: &ParsedCommand, format: OutputFormat) -> Result<()> {
    let text = render(cmd, format)?;
    writeln_ignore_broken_pipe(w, text).context("writing parsed command")
}
