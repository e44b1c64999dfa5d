//! Config file commands.

use std::process::ExitCode;

use homeboard::config::default::create_default_config;
use homeboard::config::{xdg, ConfigLoader};

use super::CommandError;
use crate::ConfigAction;

pub(super) fn run(action: ConfigAction) -> Result<ExitCode, CommandError> {
    match action {
        ConfigAction::Init { force } => {
            let path = create_default_config(force)?;
            println!("Created configuration at {}", path.display());
        }
        ConfigAction::Path => println!("{}", xdg::config_path().display()),
        ConfigAction::Validate => {
            let path = xdg::config_path();
            if !path.exists() {
                println!(
                    "No configuration file at {}; built-in defaults apply",
                    path.display()
                );
                return Ok(ExitCode::SUCCESS);
            }
            let config = ConfigLoader::load_from_path(&path)?;
            config.validate()?;
            println!("Configuration is valid: {}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
