// repl.rs

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::command::ParsedCommand;
use crate::config::ReplConfig;
use crate::output;

pub fn start_repl(config: &ReplConfig) -> Result<()> {
    let mut rl = DefaultEditor::new().context("failed to create line editor")?;
    if let Some(path) = &config.history_file {
        // A missing history file is normal on first run.
        if let Err(err) = rl.load_history(path) {
            log::debug!("no history loaded from {}: {}", path.display(), err);
        }
    }
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match ParsedCommand::parse(&line) {
                    Ok(cmd) => output::print(std::io::stdout(), &cmd, config.format)?,
                    Err(err) => eprintln!("error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                return Err(err).context("reading input");
            }
        }
    }
    if let Some(path) = &config.history_file {
        if let Err(err) = rl.save_history(path) {
            log::warn!("could not save history to {}: {}", path.display(), err);
        }
    }
    Ok(())
}
