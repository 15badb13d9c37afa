use crate::entities::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{kind} identifier cannot be empty")]
    EmptyId { kind: EntityKind },
    #[error("{kind} '{id}': {field} has leading or trailing whitespace")]
    UntrimmedValue {
        kind: EntityKind,
        id: String,
        field: &'static str,
    },
    #[error("{kind} with identifier '{id}' already exists")]
    DuplicateId { kind: EntityKind, id: String },
    #[error("failed to read data directory {}: {source}", .path.display())]
    DataDirRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to write delimited data: {0}")]
    Csv(#[from] csv::Error),
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
