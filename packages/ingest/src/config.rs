//! Layout configuration loading.

use std::path::{Path, PathBuf};

use cartogram_layout_models::LayoutConfig;

use crate::IngestError;

/// Environment variable consulted when no config path is given.
pub const CONFIG_ENV_VAR: &str = "CARTOGRAM_CONFIG";

/// Parses and validates a TOML layout config. Missing keys keep their
/// defaults.
///
/// # Errors
///
/// Returns [`IngestError::Toml`] for malformed TOML or unknown keys and
/// [`IngestError::Config`] if the constants fail validation.
pub fn parse_config(toml_str: &str) -> Result<LayoutConfig, IngestError> {
    let config: LayoutConfig = toml::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
}

/// Resolves the layout config from the `--config` path, falling back to the
/// `CARTOGRAM_CONFIG` environment variable, then to the defaults.
///
/// # Errors
///
/// Returns [`IngestError`] if a config file is named but cannot be read,
/// parsed, or validated.
pub fn load_config(cli_path: Option<&Path>) -> Result<LayoutConfig, IngestError> {
    let path = cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    let Some(path) = path else {
        log::debug!("No layout config given; using defaults");
        return Ok(LayoutConfig::default());
    };

    let config = parse_config(&crate::read_file(&path)?)?;
    log::info!("Loaded layout config from {}", path.display());
    Ok(config)
}
