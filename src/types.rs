//! Core data structures shared by the compression and decompression paths.

use std::fmt;

/// Reserved character marking a token whose remainder went through a site rule.
pub const ESCAPE: char = '_';

/// One row of the prefix table: a single-character token standing in for a
/// long URL prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixEntry {
    /// Token written in place of the prefix
    pub short: char,
    /// Prefix it replaces (may be empty for the catch-all entry)
    pub long: String,
}

impl PrefixEntry {
    /// Create a new prefix entry.
    pub fn new(short: char, long: impl Into<String>) -> Self {
        Self {
            short,
            long: long.into(),
        }
    }

    /// Whether this entry is the empty catch-all.
    pub fn is_catch_all(&self) -> bool {
        self.long.is_empty()
    }
}

/// A compressed URL, split into its parts.
///
/// The two shapes are `<prefix><remainder>` and
/// `_<rule><prefix><remainder>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressedToken<'a> {
    /// Plain prefix substitution.
    Plain {
        /// Prefix table token
        prefix: char,
        /// Text following the prefix
        remainder: &'a str,
    },
    /// Prefix substitution followed by a site rule rewrite of the remainder.
    Rewritten {
        /// Site rule id
        rule: char,
        /// Prefix table token that matched before the rule ran
        prefix: char,
        /// Remainder in the rule's short form
        remainder: &'a str,
    },
}

impl<'a> CompressedToken<'a> {
    /// Split a token into its parts.
    ///
    /// The escaped shape is tried first. Returns `None` for the empty string
    /// and for a truncated escape.
    pub fn parse(token: &'a str) -> Option<Self> {
        let mut chars = token.chars();
        match chars.next()? {
            ESCAPE => {
                let rule = chars.next()?;
                let prefix = chars.next()?;
                Some(Self::Rewritten {
                    rule,
                    prefix,
                    remainder: chars.as_str(),
                })
            }
            prefix => Some(Self::Plain {
                prefix,
                remainder: chars.as_str(),
            }),
        }
    }

    /// The prefix table token.
    pub fn prefix(&self) -> char {
        match *self {
            Self::Plain { prefix, .. } | Self::Rewritten { prefix, .. } => prefix,
        }
    }

    /// The site rule id, if a rule was applied.
    pub fn rule(&self) -> Option<char> {
        match *self {
            Self::Plain { .. } => None,
            Self::Rewritten { rule, .. } => Some(rule),
        }
    }

    /// The (possibly rewritten) remainder.
    pub fn remainder(&self) -> &'a str {
        match *self {
            Self::Plain { remainder, .. } | Self::Rewritten { remainder, .. } => remainder,
        }
    }
}

impl fmt::Display for CompressedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain { prefix, remainder } => write!(f, "{prefix}{remainder}"),
            Self::Rewritten {
                rule,
                prefix,
                remainder,
            } => write!(f, "{ESCAPE}{rule}{prefix}{remainder}"),
        }
    }
}
