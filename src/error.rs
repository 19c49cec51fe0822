//! Error types for decli

use std::io;
use thiserror::Error;

/// Result type alias for decli operations
pub type Result<T> = std::result::Result<T, DecliError>;

/// Main error type for decli
#[derive(Error, Debug)]
pub enum DecliError {
    /// Structural problems found in a declaration (all collected, not just
    /// the first)
    #[error("Invalid declaration:\n{}", format_schema_errors(.0))]
    Schema(Vec<SchemaError>),

    /// Tree construction errors
    #[error("Tree build error: {0}")]
    Tree(#[from] TreeError),

    /// Keyword routing errors
    #[error("{0}")]
    Routing(#[from] RoutingError),

    /// Argument resolution errors
    #[error("{0}")]
    Resolution(#[from] ResolutionError),

    /// Errors raised by an invoked handler, propagated unchanged
    #[error(transparent)]
    Handler(#[from] anyhow::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DecliError {
    /// Whether this error is fatal at startup (no tree may be dispatched
    /// against) as opposed to a per-invocation, user-facing failure.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            DecliError::Schema(_) | DecliError::Tree(_) | DecliError::Io(_) | DecliError::Yaml(_)
        )
    }
}

fn format_schema_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Structural errors in a raw declaration
///
/// Each variant carries the declaration path of the offending entry, e.g.
/// `subtree[1].args[0]` (the root path is rendered as `<root>`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{path}: expected a mapping")]
    NotAMapping { path: String },

    #[error("{path}: field '{field}' must be a sequence")]
    NotASequence { path: String, field: String },

    #[error("{path}: missing required field '{field}'")]
    MissingField { path: String, field: String },

    #[error("{path}: field '{field}' must be a {expected}")]
    WrongType {
        path: String,
        field: String,
        expected: &'static str,
    },

    #[error("{path}: unrecognized key '{key}'")]
    UnknownKey { path: String, key: String },

    #[error("{path}: field 'keyword' must be a non-empty string")]
    EmptyKeyword { path: String },

    #[error(
        "{path}: unrecognized type '{value}', accepted types are: \
         string, integer, float, flag, text"
    )]
    InvalidArgType { path: String, value: String },

    #[error("{path}: 'enum' must contain at least two string entries")]
    InvalidEnum { path: String },

    #[error("{path}: default value does not match declared type '{expected}'")]
    DefaultTypeMismatch { path: String, expected: String },

    #[error("{path}: default value '{value}' is not an enum member")]
    DefaultNotInEnum { path: String, value: String },

    #[error("{path}: a flag argument cannot be positional")]
    PositionalFlag { path: String },
}

/// Tree construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("duplicate keyword '{keyword}' among children of '{path}'")]
    DuplicateKeyword { keyword: String, path: String },

    #[error("duplicate argument name '{name}' on node '{path}'")]
    DuplicateArgName { name: String, path: String },

    #[error("node '{path}' has neither a command nor a subtree and can never be dispatched")]
    UnreachableNode { path: String },

    #[error("flag argument '{name}' on node '{path}' cannot be positional")]
    PositionalFlag { name: String, path: String },

    #[error("malformed declaration at '{path}'")]
    Malformed { path: String },
}

/// Keyword routing errors (user-facing, per-invocation)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no command bound for '{path}'{}", format_suggestions(.suggestions))]
    NoCommand {
        path: String,
        suggestions: Vec<String>,
    },

    #[error("no handler registered for command '{command}'")]
    UnregisteredCommand { command: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" - did you mean one of: {}?", suggestions.join(", "))
    }
}

/// Argument resolution errors (user-facing, per-invocation)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("unrecognized option '--{name}' for '{path}'")]
    UnknownOption { path: String, name: String },

    #[error("option '--{name}' requires a value")]
    MissingValue { name: String },

    #[error("flag '--{name}' does not take a value")]
    FlagWithValue { name: String },

    #[error("invalid value '{value}' for '{name}': expected {expected}")]
    InvalidValue {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid choice '{value}' for '{name}' (choose from: {})", .allowed.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("missing required argument '{name}' for '{path}'")]
    MissingArgument { path: String, name: String },

    #[error("unexpected argument '{token}' for '{path}'")]
    UnexpectedArgument { path: String, token: String },
}

/// Specialized result type for tree construction
pub type TreeResult<T> = std::result::Result<T, TreeError>;

/// Specialized result type for argument resolution
pub type ResolutionResult<T> = std::result::Result<T, ResolutionError>;

/// Specialized result type for routing
pub type RoutingResult<T> = std::result::Result<T, RoutingError>;
