//! Init command - create the starter configuration
//!
//! Writes the default config template with a freshly generated API key.
//! Never overwrites an existing file unless `--force` is given.
//!
//! Path resolution priority:
//! 1. `--path <custom>` (explicit CLI argument)
//! 2. `RELAYCTL_CONFIG` environment variable
//! 3. `~/relayctl/relayctl.toml` (default)

use anyhow::{Context, Result};
use relayctl_config::{resolve_config_path, write_default_config};
use std::path::PathBuf;

/// Run init command
pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let (config_path, _source) = resolve_config_path(path.as_deref());

    if config_path.exists() && !force {
        println!("Configuration file already exists at:");
        println!("  {}", config_path.display());
        println!();
        println!("Use --force to overwrite with a fresh configuration.");
        return Ok(());
    }

    if config_path.exists() && force {
        std::fs::remove_file(&config_path).with_context(|| {
            format!(
                "Failed to remove existing config at {}",
                config_path.display()
            )
        })?;
        println!("Removed existing configuration file.");
    }

    let api_key = generate_api_key();
    let created_path = write_default_config(&config_path, &api_key)
        .with_context(|| format!("Failed to create config at {}", config_path.display()))?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Created configuration file:");
    println!(
        "     {}",
        created_path
            .canonicalize()
            .unwrap_or_else(|_| created_path.clone())
            .display()
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("A random API key was written to the [bridge] section.");
    println!("Point [daemon].command at your proxy daemon binary, then:");
    println!("  relayctl daemon start");
    println!("  relayctl serve");

    Ok(())
}

/// Generate a random API key for the starter config.
///
/// 64 hex characters, 256 bits of entropy.
fn generate_api_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    (0..32)
        .map(|_| format!("{:02x}", rng.random::<u8>()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_api_key_is_64_hex_chars() {
        let key = generate_api_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_init_creates_config_with_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relayctl.toml");

        run(Some(path.clone()), false).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[bridge]"));
        assert!(
            !contents.contains("{{api_key}}"),
            "placeholder must be replaced"
        );

        let config = relayctl_config::load_config_from_str(&contents).unwrap();
        assert_eq!(config.bridge.api_key.len(), 64);
    }

    #[test]
    fn test_init_without_force_keeps_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relayctl.toml");

        run(Some(path.clone()), false).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        run(Some(path.clone()), false).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_init_with_force_regenerates_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relayctl.toml");

        run(Some(path.clone()), false).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        run(Some(path.clone()), true).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_ne!(first, second, "a forced init generates a new key");
    }
}
