use anyhow::{Context, Result};
use command_prompt::config::CONFIG_ENV;
use command_prompt::{DispatchError, ExitCode, Prompt, SessionConfig};
use rustyline::DefaultEditor;
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,command_prompt=debug"),
    )
    .init();

    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            log::error!("{:#}", err);
            1
        }
    };
    std::process::exit(code);
}

fn run() -> Result<ExitCode> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            log::info!("Loading configuration from {}", path.display());
            SessionConfig::load(&path)
                .with_context(|| format!("can't load config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    let mut editor = DefaultEditor::new()?;
    let mut prompt = Prompt::from_config(config);
    match prompt.start(&mut editor) {
        Ok(code) => Ok(code),
        Err(DispatchError::Interrupted) => {
            println!("Interrupted");
            Ok(DispatchError::Interrupted.exit_code())
        }
        Err(err) => Ok(err.exit_code()),
    }
}
