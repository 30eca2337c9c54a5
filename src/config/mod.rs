// src/config/mod.rs
mod cli;
mod models;

pub use cli::{normalize_args, Settings};
pub use models::*;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("service catalog not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read service catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse service catalog {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// Load the service catalog from a file (YAML or JSON)
pub async fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, ConfigError> {
    let path = path.as_ref();
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::Missing(path.to_path_buf()))
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let extension = path.extension().and_then(|s| s.to_str());
    let catalog: Catalog = if extension == Some("yaml") || extension == Some("yml") {
        serde_yaml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
    } else {
        serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
    };

    Ok(catalog)
}
