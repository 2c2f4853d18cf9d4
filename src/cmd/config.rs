//! Configuration view — `archivo config`.

use anyhow::Result;

use archivo::config::{ArchivoConfig, default_config_path};

use super::super::ConfigCommands;

pub fn cmd_config(config: &ArchivoConfig, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Archivo+ Configuration");
            println!("======================");
            println!();
            match &config.config_path {
                Some(path) => println!("Config file: {}", path.display()),
                None => match default_config_path() {
                    Some(path) => println!("No config file found (looked for {})", path.display()),
                    None => println!("No config file found"),
                },
            }
            println!();
            for line in effective_lines(config) {
                println!("  {}", line);
            }
            println!();
        }
    }
    Ok(())
}

/// `key = value` lines with secrets redacted.
pub fn effective_lines(config: &ArchivoConfig) -> Vec<String> {
    let redact = |v: &Option<String>| match v {
        Some(_) => "\"********\"".to_string(),
        None => "(unset)".to_string(),
    };
    vec![
        format!("api_base = \"{}\"", config.api_base),
        format!("token = {}", redact(&config.token)),
        format!(
            "email = {}",
            config
                .email
                .as_ref()
                .map_or("(unset)".to_string(), |e| format!("\"{}\"", e))
        ),
        format!("password = {}", redact(&config.password)),
        format!("remember_me = {}", config.remember_me),
        format!(
            "connect_timeout_secs = {}",
            config
                .connect_timeout
                .map_or("(default)".to_string(), |d| d.as_secs().to_string())
        ),
        format!("color = {}", config.color),
    ]
}
