use super::document::{Database, DOCUMENT_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default league data file path (~/.config/clash-cup/league.json)
pub fn get_data_path() -> PathBuf {
    crate::config::get_config_dir().join("league.json")
}

/// Load the league document from a JSON file
///
/// If the file doesn't exist, returns a new empty document.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_database(path: &Path) -> Result<Database> {
    if !path.exists() {
        return Ok(Database::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open league data file at {}", path.display()))?;

    let database: Database =
        serde_json::from_reader(file).context("Failed to load league data")?;

    if database.version != DOCUMENT_VERSION {
        anyhow::bail!("Unsupported league data version: {}", database.version);
    }

    Ok(database)
}

/// Save the league document to a JSON file atomically
///
/// The file is either fully replaced or left as it was.
/// Creates the parent directory if it doesn't exist.
pub fn save_database(path: &Path, database: &Database) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, database)
        .context("Failed to serialize league data")?;

    file.commit().context("Failed to save league data")?;

    Ok(())
}
