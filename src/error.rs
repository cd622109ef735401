//! Error types for the training and prediction pipeline.

use std::fmt;
use std::path::PathBuf;

/// Error type shared by the trainer, predictor and data loading code.
#[derive(Debug)]
pub enum Error {
    /// Requested feature/target columns absent from the dataset.
    MissingColumns(Vec<String>),
    /// `train` or `evaluate` called before `prepare_data`.
    DataNotPrepared,
    /// `save` or `evaluate` called before a successful `train`.
    ModelNotTrained,
    /// `predict` called before `load_model` succeeded.
    ModelNotLoaded,
    /// No artifact file at the given path.
    ArtifactNotFound(PathBuf),
    /// Artifact bytes could not be encoded or decoded.
    Serialization(String),
    /// I/O error during file operations.
    Io(String),
    /// Empty data provided where non-empty was required.
    EmptyData(String),
    /// Input width differs from the trained feature schema.
    FeatureMismatch { expected: usize, got: usize },
    /// Non-numeric or missing cell in a required column.
    InvalidValue { column: String, row: usize },
    /// Invalid hyperparameter value.
    InvalidParameter(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingColumns(cols) => {
                write!(f, "Columns not found in dataset: {}", cols.join(", "))
            }
            Error::DataNotPrepared => {
                write!(f, "Training data not prepared; call prepare_data first")
            }
            Error::ModelNotTrained => {
                write!(f, "Model not trained; call train first")
            }
            Error::ModelNotLoaded => {
                write!(f, "Model not loaded; call load_model first")
            }
            Error::ArtifactNotFound(path) => {
                write!(f, "Model artifact not found at: {}", path.display())
            }
            Error::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            Error::Io(msg) => {
                write!(f, "I/O error: {}", msg)
            }
            Error::EmptyData(msg) => {
                write!(f, "Empty data: {}", msg)
            }
            Error::FeatureMismatch { expected, got } => {
                write!(
                    f,
                    "Feature mismatch: expected {} features, got {}",
                    expected, got
                )
            }
            Error::InvalidValue { column, row } => {
                write!(
                    f,
                    "Invalid value in column '{}' at row {}: expected a number",
                    column, row
                )
            }
            Error::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Io(err.to_string())
    }
}
