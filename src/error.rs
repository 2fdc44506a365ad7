//! Error types for table construction and URL collaborator failures.
//!
//! The codec operations themselves never return these: every failure there
//! degrades to passing the input string through. They surface when building
//! custom tables and from the internal parse steps.

use thiserror::Error;

/// Errors raised while building codec tables or parsing URLs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UrlPackError {
    /// A prefix entry uses the reserved escape character as its token.
    #[error("Prefix token '{0}' collides with the reserved escape character")]
    EscapeToken(char),

    /// A prefix entry's long form begins with the reserved escape character.
    #[error("Prefix '{0}' begins with the reserved escape character")]
    EscapePrefix(String),

    /// Two prefix entries share the same token.
    #[error("Duplicate prefix token '{0}'")]
    DuplicateToken(char),

    /// A prefix entry can never be selected because an earlier entry
    /// matches everything it matches.
    #[error("Prefix '{shadowed}' is unreachable behind earlier prefix '{earlier}'")]
    ShadowedEntry {
        /// The earlier, more general prefix.
        earlier: String,
        /// The later prefix it hides.
        shadowed: String,
    },

    /// The prefix table has no empty catch-all entry.
    #[error("Prefix table has no empty catch-all entry")]
    MissingCatchAll,

    /// Two site rules share the same id.
    #[error("Duplicate site rule id '{0}'")]
    DuplicateRule(char),

    /// A site rule id is also a prefix token or the escape character.
    #[error("Site rule id '{0}' collides with a prefix token or the escape character")]
    RuleTokenCollision(char),

    /// A site rule pattern failed to compile.
    #[error("Invalid site rule pattern: {0}")]
    InvalidPattern(String),

    /// The string is a relative reference where an absolute URL is required.
    #[error("Relative reference where an absolute URL is required: {0}")]
    RelativeUrl(String),

    /// URL parsing failed using the url crate.
    #[error("URL parsing error: {0}")]
    UrlParseError(String),
}

impl From<url::ParseError> for UrlPackError {
    fn from(err: url::ParseError) -> Self {
        UrlPackError::UrlParseError(err.to_string())
    }
}

impl From<regex::Error> for UrlPackError {
    fn from(err: regex::Error) -> Self {
        UrlPackError::InvalidPattern(err.to_string())
    }
}
