//! Error handling for the optalign CLI

use optalign_core::AlignError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Alignment error: {message}")]
    Alignment { message: String },

    #[error("Resource error: {message}")]
    Resource { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn alignment<S: Into<String>>(message: S) -> Self {
        Self::Alignment { message: message.into() }
    }

    pub fn resource<S: Into<String>>(message: S) -> Self {
        Self::Resource { message: message.into() }
    }
}

impl From<AlignError> for CliError {
    fn from(err: AlignError) -> Self {
        match err {
            AlignError::PathLimitExceeded { .. } => Self::resource(err.to_string()),
            AlignError::StartCellOutOfRange { .. } | AlignError::GapSymbolInSequence { .. } => {
                Self::validation(err.to_string())
            }
            AlignError::InconsistentMatrix { .. } | AlignError::InvalidPath(_) => {
                Self::alignment(err.to_string())
            }
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your optalign.toml configuration file\n\
                 • Use 'optalign config' to print a sample configuration\n\
                 • Verify that all configuration values are valid"
            );
        }

        CliError::Validation { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • --start expects ROW,COL inside the matrix (rows = len(SEQ2)+1, cols = len(SEQ1)+1)\n\
                 • Pick a --gap symbol that does not occur in either sequence"
            );
        }

        CliError::Alignment { .. } => {
            message.push_str(
                "\n\nThis indicates an internal inconsistency; please report it with the input sequences."
            );
        }

        CliError::Resource { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Raise the limit with --max-paths (0 disables it)\n\
                 • Use 'optalign count' to see how many optimal alignments exist\n\
                 • Scoring schemes with many equal costs produce exponentially many ties"
            );
        }
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
