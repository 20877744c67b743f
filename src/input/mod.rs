use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod markets;
pub mod prices;

pub use markets::{load_markets, parse_markets};
pub use prices::{load_prices, parse_prices, PriceDataset};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input in {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type InputResult<T> = Result<T, InputError>;

/// Reads and deserializes a whole JSON document. The file is closed before parsing.
fn read_json<T: DeserializeOwned>(path: &Path) -> InputResult<T> {
    let contents = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| InputError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}
