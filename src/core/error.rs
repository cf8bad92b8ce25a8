use thiserror::Error;

#[derive(Error, Debug)]
pub enum MusterError {
    #[error("Unknown race: {0}")]
    UnknownRace(crate::core::types::RaceId),

    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MusterError>;
