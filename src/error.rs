use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopLinesError {
    #[error("Unknown pop mode: {mode}")]
    InvalidMode { mode: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("No such file or directory: {path}")]
    NotFound { path: String },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Unable to read from file: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write to file: {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PopLinesError {
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        PopLinesError::InvalidParameter {
            message: message.into(),
        }
    }

    /// Parameter errors are raised before the file is opened.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            PopLinesError::InvalidMode { .. } | PopLinesError::InvalidParameter { .. }
        )
    }

    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            PopLinesError::NotFound { .. }
                | PopLinesError::NotAFile { .. }
                | PopLinesError::Read { .. }
                | PopLinesError::Write { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            PopLinesError::InvalidMode { .. } | PopLinesError::InvalidParameter { .. } => 2,
            PopLinesError::NotFound { .. } => 3,
            PopLinesError::NotAFile { .. } => 4,
            PopLinesError::Read { .. } => 5,
            PopLinesError::Write { .. } => 6,
            PopLinesError::Config { .. } => 7,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for PopLinesError {
    fn user_message(&self) -> String {
        match self {
            PopLinesError::InvalidMode { mode } => {
                format!(
                    "Given pop mode '{}' does not match available modes: ( {} )",
                    mode,
                    crate::selection::PopMode::NAMES.join(", ")
                )
            }
            PopLinesError::Read { path, source } => {
                format!("Unable to read from file: {} ({})", path, source)
            }
            PopLinesError::Write { path, source } => {
                format!("Unable to write to {} ({})", path, source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            PopLinesError::InvalidMode { .. } => Some(
                "Use one of the subcommands: head, tail, random, range, these".to_string()
            ),
            PopLinesError::InvalidParameter { .. } => Some(
                "Line numbers are 1-origin; see `poplines help <mode>` for the accepted values.".to_string()
            ),
            PopLinesError::NotFound { .. } => Some(
                "Check the path, or create the file first (an empty file is a valid empty queue).".to_string()
            ),
            PopLinesError::Write { .. } => Some(
                "Ensure you have write permission for the file and its directory. Use --in-place if the directory is not writable.".to_string()
            ),
            PopLinesError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with `poplines generate-config`.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PopLinesError>;
