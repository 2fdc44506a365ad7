//! URL handling delegated to the `url` crate.
//!
//! This module contains the URI collaborator pieces:
//! - URL normalization and the explicit parse step
//! - Relative reference construction and resolution

pub mod normalizer;
pub mod relative;

// Re-export main functionality
pub use normalizer::{normalize_url, parse_absolute, with_default_path};
pub use relative::{relative_reference, resolve_reference, route_to};
