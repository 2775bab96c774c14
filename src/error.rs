use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is empty")]
    Empty { path: PathBuf },
    #[error("{path} has no 'x' or 'o' cells")]
    NoMarkers { path: PathBuf },
    #[error("file stem {stem:?} of {path} is not an integer id")]
    BadIdentifier { path: PathBuf, stem: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("card {card} does not fit inside the {width}x{height} stage")]
    OutOfBounds { card: u32, width: i32, height: i32 },
    #[error("card {card} overlaps {cells} occupied cell(s)")]
    Overlap { card: u32, cells: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {name}={value:?} is not valid: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("environment variable {name} is required")]
    Missing { name: &'static str },
}
