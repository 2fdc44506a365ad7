//! Core token encoding and decoding.
//!
//! This module contains the table-driven parts of the codec:
//! - The ordered prefix substitution table
//! - The site-specific regex rewrite rules
//! - Encoding strings into tokens and decoding them back

pub mod prefix;
pub mod rules;
pub mod encoder;
pub mod decoder;

// Re-export main functionality
pub use prefix::PrefixTable;
pub use rules::{SiteRule, SiteRuleTable};
pub use encoder::{encode, elide_trailing_slash};
pub use decoder::{decode, restore_default_path};
