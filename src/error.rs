use thiserror::Error;

/// Failures of a single provider call. Both kinds end the current run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{operation} request failed: {reason}")]
    Transport {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation} response has unexpected shape: {reason}")]
    Schema {
        operation: &'static str,
        reason: String,
    },
}

impl FetchError {
    pub fn transport(operation: &'static str, reason: impl Into<String>) -> Self {
        FetchError::Transport {
            operation,
            reason: reason.into(),
        }
    }

    pub fn schema(operation: &'static str, reason: impl Into<String>) -> Self {
        FetchError::Schema {
            operation,
            reason: reason.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, FetchError::Schema { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no fixtures available for tournament '{slug}'")]
    NoFixturesAvailable { slug: String },

    #[error("no fixture named '{0}'")]
    UnknownFixture(String),

    #[error("fixture '{0}' has no event id")]
    MissingEventId(String),

    #[error("fixture prompt failed: {0}")]
    Prompt(String),
}

impl From<dialoguer::Error> for SelectionError {
    fn from(err: dialoguer::Error) -> Self {
        SelectionError::Prompt(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to build spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
