// command.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::classify::classify;
use crate::error::{ParseError, Result};
use crate::parser::{is_space, tokenize};

/// Key under which positionals appear in the merged JSON shape.
pub const POSITIONALS_KEY: &str = "_";
pub const COMMAND_KEY: &str = "command";

/// Value attached to a flag: bare presence (`true`) or a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagValue {
    Switch,
    Value(String),
}

impl FlagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Switch => None,
            FlagValue::Value(v) => Some(v),
        }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, FlagValue::Switch)
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Switch => f.write_str("true"),
            FlagValue::Value(v) => f.write_str(v),
        }
    }
}

impl Serialize for FlagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FlagValue::Switch => serializer.serialize_bool(true),
            FlagValue::Value(v) => serializer.serialize_str(v),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    raw: String,
    command: String,
    flags: BTreeMap<String, FlagValue>,
    positionals: Vec<String>,
}

impl ParsedCommand {
    /// Parses a raw command line. The first token is the command name; the
    /// rest is classified into flags and positionals.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let mut tokens = tokenize(raw).into_iter();
        let command = tokens.next().ok_or(ParseError::EmptyInput)?.into_string();
        let rest: Vec<_> = tokens.collect();
        let (flags, positionals) = classify(&rest);
        log::debug!(
            "parsed {:?}: {} flag(s), {} positional(s)",
            command,
            flags.len(),
            positionals.len()
        );
        Ok(Self { raw: raw.to_string(), command, flags, positionals })
    }

    /// Same as [`ParsedCommand::parse`], treating a missing input as empty.
    pub fn parse_opt(raw: Option<&str>) -> Result<Self> {
        raw.map_or(Err(ParseError::EmptyInput), Self::parse)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn flags(&self) -> &BTreeMap<String, FlagValue> {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// String value of a flag; `None` for switches and absent flags.
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.flag(name).and_then(FlagValue::as_str)
    }

    pub fn is_switch(&self, name: &str) -> bool {
        self.flag(name).is_some_and(FlagValue::is_switch)
    }

    /// Renders a command line that parses back to the same command,
    /// positionals and flags. Values containing `"` or runs of whitespace
    /// do not survive the trip, nor do names that start with `-` and
    /// contain `=`.
    pub fn to_command_line(&self) -> String {
        let head = std::iter::once(quote_word(&self.command, false));
        let positionals = self.positionals.iter().map(|p| quote_word(p, true));
        let flags = self.flags.iter().map(|(name, value)| render_flag(name, value));
        head.chain(positionals).chain(flags).join(" ")
    }
}

fn render_flag(name: &str, value: &FlagValue) -> String {
    // `--a=b` would split at the `=`, so such names go out in short form,
    // with the value quoted so it can never read as a flag.
    if name.contains('=') && !name.starts_with('-') {
        return match value {
            FlagValue::Switch => format!("-{}", name),
            FlagValue::Value(v) => format!("-{} {}", name, quote(v)),
        };
    }
    match value {
        FlagValue::Switch => format!("--{}", name),
        FlagValue::Value(v) if needs_quotes(v) || v.is_empty() => format!("--{}=\"{}\"", name, v),
        FlagValue::Value(v) => format!("--{}={}", name, v),
    }
}

fn needs_quotes(word: &str) -> bool {
    word.chars().any(|c| is_space(c) || c == '"' || c == '\'')
}

fn quote_word(word: &str, positional: bool) -> String {
    let hyphenated = positional && word.starts_with('-');
    if !(word.is_empty() || hyphenated || needs_quotes(word)) {
        return word.to_string();
    }
    quote(word)
}

fn quote(word: &str) -> String {
    if word.contains('"') {
        format!("'{}'", word)
    } else {
        format!("\"{}\"", word)
    }
}

impl FromStr for ParsedCommand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ParsedCommand {
    /// Flat shape: `command`, `_`, then one entry per flag. Flags whose
    /// names collide with the two fixed keys are left out.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let merged: Vec<_> = self
            .flags
            .iter()
            .filter(|(name, _)| {
                let reserved = name.as_str() == COMMAND_KEY || name.as_str() == POSITIONALS_KEY;
                if reserved {
                    log::warn!("flag {:?} shadows a fixed key, omitted from output", name);
                }
                !reserved
            })
            .collect();
        let mut map = serializer.serialize_map(Some(merged.len() + 2))?;
        map.serialize_entry(COMMAND_KEY, &self.command)?;
        map.serialize_entry(POSITIONALS_KEY, &self.positionals)?;
        for (name, value) in merged {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
