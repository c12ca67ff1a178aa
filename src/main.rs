use std::process::ExitCode;

use anyhow::Result;
use argline::config::ReplConfig;
use argline::{output, repl, ParsedCommand};

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = ReplConfig::from_env()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        repl::start_repl(&config)?;
        return Ok(ExitCode::SUCCESS);
    }

    match ParsedCommand::parse(&args.join(" ")) {
        Ok(cmd) => {
            output::print(std::io::stdout(), &cmd, config.format)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("argline: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
