use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profile file {path}: {source}")]
    ProfileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile file: {0}")]
    ProfileFileParse(#[from] serde_yaml::Error),

    #[error("profile validation failed: {0}")]
    Validation(String),
}

/// Failures that abort a dataset load entirely.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid JSON or not a top-level array.
    #[error("dataset is not a JSON array of hospital records: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Why a single record was dropped from the working set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("record has no cmsId")]
    MissingCmsId,

    #[error("unknown stroke certification type '{0}'")]
    UnknownTier(String),

    #[error("duplicate cmsId '{0}'")]
    DuplicateCmsId(String),
}
