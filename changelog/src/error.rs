use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use thiserror::Error;

/// Error context to enrich error messages
#[derive(Debug)]
pub struct ErrorContext {
    pub operation: String,
    pub path: Option<PathBuf>,
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Operation: {}", self.operation)?;
        if let Some(path) = &self.path {
            write!(f, " (file: {})", path.display())?;
        }
        Ok(())
    }
}

/// Errors that can occur while generating changelogs
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read or write changelog file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Failed to fetch PR #{number}: {reason}")]
    FetchFailed { number: u64, reason: String },

    #[error("Commit failed: {0}")]
    CommitFailed(String),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("{0}")]
    Other(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<ChangelogError>),

    #[error("{context}: {source}")]
    ContextualError {
        context: ErrorContext,
        source: Box<ChangelogError>,
    },
}

impl ChangelogError {
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    #[must_use]
    pub fn with_operation_context(
        self,
        operation: impl Into<String>,
        path: Option<impl Into<PathBuf>>,
    ) -> Self {
        Self::ContextualError {
            context: ErrorContext {
                operation: operation.into(),
                path: path.map(Into::into),
            },
            source: Box::new(self),
        }
    }

    /// Whether the error must abort the whole run
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::CommitFailed(_) => false,
            Self::WithContext(_, err) => err.is_fatal(),
            Self::ContextualError { source, .. } => source.is_fatal(),
            _ => true,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ReadError(e) => format!("File operation failed: {e}"),
            Self::Configuration(msg) => format!("Missing configuration: {msg}"),
            Self::FetchFailed { number, reason } => {
                format!("Could not fetch description of PR #{number}: {reason}")
            }
            Self::CommitFailed(msg) => format!("Committing changelog files failed: {msg}"),
            Self::RegexError(e) => format!("Regular expression error: {e}"),
            Self::Other(msg) => msg.clone(),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
            Self::ContextualError { context, source } => {
                format!("{}: {}", context, source.user_message())
            }
        }
    }
}
