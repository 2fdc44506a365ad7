//! urlpack - reversible, table-driven URL compression
//!
//! This crate maps normalized URLs to short tokens and back, exactly, so that
//! large numbers of feed and site URLs can be stored compactly.
//!
//! # Features
//!
//! - **Reversible**: every token decompresses to the normalized URL it came from
//! - **Table-driven**: an ordered prefix table replaces common scheme/host
//!   beginnings with a single character
//! - **Site-aware**: regex rules collapse Blogspot, Tumblr, WordPress,
//!   micro.blog and common feed filename shapes even further
//! - **Relative**: a URL can be stored relative to the URL it was found on
//! - **Lossless mode**: arbitrary strings round-trip byte for byte
//!
//! # Quick Start
//!
//! ```
//! use urlpack::{compressed_url, decompressed_url, compressed_relative_url, decompressed_relative_url};
//!
//! let token = compressed_url(Some("httpS://www.goldenhillsoftware.com:443/foo"));
//! assert_eq!(token.as_deref(), Some("Agoldenhillsoftware.com/foo"));
//! assert_eq!(
//!     decompressed_url(token.as_deref()).as_deref(),
//!     Some("https://www.goldenhillsoftware.com/foo")
//! );
//!
//! let origin = Some("https://a.com/abcd/efgh/ijkl/mno");
//! let token = compressed_relative_url(origin, Some("https://a.com/abcd/efgh/x"));
//! assert_eq!(token.as_deref(), Some("Ex"));
//! assert_eq!(
//!     decompressed_relative_url(origin, token.as_deref()).as_deref(),
//!     Some("https://a.com/abcd/efgh/x")
//! );
//! ```
//!
//! # Token Format
//!
//! | Shape | Meaning |
//! |-------|---------|
//! | `<prefix><remainder>` | prefix table substitution only |
//! | `_<rule><prefix><remainder>` | substitution, then site rule `rule` rewrote the remainder |
//!
//! `_` is reserved and is never a prefix token.
//!
//! # Error Handling
//!
//! The codec functions never fail: input that cannot be parsed or decoded is
//! passed through unchanged, and `None` maps to `None`. [`UrlPackError`] is
//! returned only when building custom tables.

// Re-export the nullable codec surface
pub use codec::{
    compressed_relative_url, compressed_url, decompressed_relative_url, decompressed_url,
    from_relative_url, losslessly_compressed_url, losslessly_decompressed_url, normalized_url,
    relative_url, UrlCompressor,
};

// Re-export public types
pub use error::UrlPackError;
pub use types::{CompressedToken, PrefixEntry, ESCAPE};
pub use self::core::{PrefixTable, SiteRule, SiteRuleTable};
pub use uri::normalize_url;

// Module declarations
pub mod error;
pub mod types;
pub mod core;
pub mod uri;
pub mod codec;
