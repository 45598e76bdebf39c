use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Invalid argument `{field}` ({value}): {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Item '{name}' not found in inventory")]
    NotFound { name: String },

    #[error("IO error on {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Format error in {origin}: {message}")]
    FormatError { origin: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Missing,
    Io,
    Format,
    Config,
}

impl InventoryError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        InventoryError::IoError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            InventoryError::InvalidArgument { .. } => ErrorCategory::Input,
            InventoryError::NotFound { .. } => ErrorCategory::Missing,
            InventoryError::IoError { .. } => ErrorCategory::Io,
            InventoryError::FormatError { .. } => ErrorCategory::Format,
            InventoryError::ConfigError { .. } => ErrorCategory::Config,
        }
    }

    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Missing => 1,
            ErrorCategory::Input => 2,
            ErrorCategory::Io => 3,
            ErrorCategory::Format => 4,
            ErrorCategory::Config => 5,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the item name and pass the quantity as a whole number",
            ErrorCategory::Missing => "List the current items with the `report` command",
            ErrorCategory::Io => "Check that the data file path exists and is readable/writable",
            ErrorCategory::Format => {
                "The data file must hold one JSON object mapping item names to integers"
            }
            ErrorCategory::Config => "Fix the settings file or pass the value on the command line",
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
