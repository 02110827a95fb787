//! Error types for the generator core

use thiserror::Error;

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

/// Broad origin of a [`GenError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input documents are malformed relative to the generator's vocabulary
    Schema,
    /// The generator would emit invalid output for well-formed input
    Defect,
    /// Invalid configuration value
    Config,
}

/// Error type for generator operations
///
/// Every variant is fatal: the run aborts on the first one.
#[derive(Error, Debug)]
pub enum GenError {
    /// Input document is not valid JSON or does not match the schema shape
    #[error("schema parse error: {0}")]
    Parse(String),

    /// A type node carries a kind outside the closed vocabulary
    #[error("unknown type kind {kind:?} for {domain}.{name}")]
    UnknownKind {
        domain: String,
        name: String,
        kind: String,
    },

    /// A type node carries neither a kind nor a reference
    #[error("type {domain}.{name} has neither a kind nor a $ref")]
    MissingKind { domain: String, name: String },

    /// A `$ref` that cannot be split into a domain and a type name
    #[error("invalid reference {reference:?} in domain {domain}")]
    InvalidReference { domain: String, reference: String },

    /// A `$ref` naming a domain or type that is not declared
    #[error("unresolved reference {reference:?} in domain {domain}")]
    UnresolvedReference { domain: String, reference: String },

    /// Two artifacts in one generated scope normalize to the same identifier
    #[error("duplicate identifier {ident} in {scope}")]
    DuplicateIdentifier { scope: String, ident: String },

    /// Domain packages would import each other
    #[error("import cycle between domains: {path}")]
    ImportCycle { path: String },

    /// A shared (cycle-breaking) type refers back into a domain package
    #[error("shared type {name} cannot reference {reference}")]
    SharedScope { name: String, reference: String },

    /// An enum declares the empty string, which is reserved for its unset value
    #[error("enum {domain}.{name} declares an empty literal, which collides with its NotSet value")]
    EmptyEnumLiteral { domain: String, name: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl GenError {
    /// Classify the error by origin
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenError::Parse(_)
            | GenError::UnknownKind { .. }
            | GenError::MissingKind { .. }
            | GenError::InvalidReference { .. }
            | GenError::UnresolvedReference { .. } => ErrorCategory::Schema,
            GenError::DuplicateIdentifier { .. }
            | GenError::ImportCycle { .. }
            | GenError::SharedScope { .. }
            | GenError::EmptyEnumLiteral { .. } => ErrorCategory::Defect,
            GenError::Config(_) => ErrorCategory::Config,
        }
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::Parse(err.to_string())
    }
}
