//! Domain error types.

/// A line-scoped record parse error. Any variant excludes the whole source
/// file from the snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("unknown record kind: {kind}")]
    UnknownKind { kind: String },

    #[error("{kind} record has {found} fields, expected {expected}")]
    FieldCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("cannot parse {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("bad format for date: {value}")]
    DateFormat { value: String },

    #[error("date out of range: {value}")]
    DateOutOfRange { value: String },
}

/// Top-level error type for tradescan.
#[derive(Debug, thiserror::Error)]
pub enum TradescanError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TradescanError> for std::process::ExitCode {
    fn from(err: &TradescanError) -> Self {
        let code: u8 = match err {
            TradescanError::Io(_) => 1,
            TradescanError::ConfigParse { .. }
            | TradescanError::ConfigMissing { .. }
            | TradescanError::ConfigInvalid { .. } => 2,
            TradescanError::Record(_) => 3,
        };
        std::process::ExitCode::from(code)
    }
}
