use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{
    get_config_path, validate_config, Config, ServerConfig, StorageConfig, DEFAULT_CLIENT_ORIGIN,
    DEFAULT_PORT,
};
use crate::store::get_data_path;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
pub fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    Ok(parse_yes_no(&input, default_yes))
}

fn parse_yes_no(input: &str, default_yes: bool) -> bool {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        default_yes
    } else {
        input == "y" || input == "yes"
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

/// Serialize a config and write it, creating parent directories.
pub fn write_config(config_path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("Clash Cup Configuration Wizard");
    println!("==============================");
    println!();

    // 1. Server
    typewriter("The API server listens on a single port and answers browser requests from one client origin.");
    let port: u16 = loop {
        let input = prompt_with_default("Port", &DEFAULT_PORT.to_string())?;
        match input.parse::<u16>() {
            Ok(v) if v > 0 => break v,
            _ => println!("  Invalid: must be a number between 1 and 65535. Try again."),
        }
    };

    println!();
    typewriter("The client origin is the address of the web front end (used for CORS).");
    let client_origin = prompt_with_default("Client origin", DEFAULT_CLIENT_ORIGIN)?;

    // 2. Storage
    println!();
    typewriter("League data (leagues, players, rounds, weights and allocations) is kept in a single JSON file.");
    let default_data_path = get_data_path();
    let data_str = prompt_with_default(
        "League data file",
        &default_data_path.display().to_string(),
    )?;
    let data_path = PathBuf::from(&data_str);
    let storage_path = if data_path == default_data_path {
        None
    } else {
        Some(data_path)
    };

    let config = Config {
        server: ServerConfig {
            port,
            client_origin,
        },
        storage: StorageConfig { path: storage_path },
    };

    if let Err(errors) = validate_config(&config) {
        println!();
        println!("Configuration is invalid:");
        for error in &errors {
            println!("  - {}", error);
        }
        anyhow::bail!("Config not written");
    }

    // 3. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    typewriter("PORT, CLIENT_ORIGIN and DATABASE_PATH environment variables override these values at startup.");
    println!("Run `clash-cup serve` to get started.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("", true));
        assert!(!parse_yes_no("", false));
        assert!(parse_yes_no("Y", false));
        assert!(parse_yes_no(" yes ", false));
        assert!(!parse_yes_no("nope", true));
    }

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            server: ServerConfig {
                port: 9100,
                client_origin: "https://cup.example.com".to_string(),
            },
            storage: StorageConfig {
                path: Some(dir.path().join("league.json")),
            },
        };

        write_config(&path, &config).unwrap();
        assert_eq!(load_config(Some(path)).unwrap(), config);
    }
}
