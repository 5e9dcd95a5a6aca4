//! Error types for microdata extraction
//!
//! Extraction itself is total: unresolvable `itemref` tokens, missing
//! attributes and malformed URLs never surface as errors. The errors here
//! cover the edges of the pipeline, namely reading the document, configuring
//! the parser and encoding the result.

/// Errors that can occur while extracting microdata from a document
///
/// # Examples
///
/// ```ignore
/// use microdata::{MicrodataError, Parser};
///
/// match parser.parse_reader(file) {
///     Ok(data) => println!("Found {} items", data.len()),
///     Err(MicrodataError::Read(e)) => eprintln!("Could not read document: {}", e),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MicrodataError {
    /// The HTML document could not be read from its source
    ///
    /// This is the only failure that aborts extraction: no items are
    /// produced for a document that could not be read in full.
    #[error("Failed to read HTML document: {0}")]
    Read(#[from] std::io::Error),

    /// The parser configuration was rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to encode or decode the JSON representation
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during parser configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No base URL was configured
    #[error("A base URL is required to resolve relative references")]
    MissingBaseUrl,

    /// The base URL could not be parsed as an absolute URL
    #[error("Invalid base URL '{url}': {error}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        error: url::ParseError,
    },

    /// The base URL cannot be used to resolve relative references
    ///
    /// URLs such as `mailto:someone@example.com` or `data:` URLs have no
    /// hierarchical path, so relative references cannot be joined onto them.
    #[error("Base URL '{0}' cannot be used as a base for relative references")]
    CannotBeABase(String),
}

/// Result type alias for microdata operations.
pub type Result<T> = std::result::Result<T, MicrodataError>;
