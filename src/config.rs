//! Loading generation parameters from a JSON file.

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use crate::error::{Result, TerrainError};
use crate::params::GenerationParams;

/// Read parameters from `path`. Missing fields take their defaults.
pub fn load_params(path: &Path) -> Result<GenerationParams> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TerrainError::Config(format!("{} not found", path.display())));
        }
        Err(e) => return Err(e.into()),
    };
    info!("found config at {}", path.display());
    let params = serde_json::from_str(&data)?;
    Ok(params)
}

/// Write parameters to `path` as pretty JSON.
pub fn save_params(params: &GenerationParams, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(params)?;
    fs::write(path, json)?;
    info!("wrote config to {}", path.display());
    Ok(())
}
