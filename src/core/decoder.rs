//! Token decoding, the inverse of [`crate::core::encoder::encode`].

use std::borrow::Cow;

use url::Url;

use crate::core::prefix::PrefixTable;
use crate::core::rules::SiteRuleTable;
use crate::types::CompressedToken;

/// Decode a token back into the exact string that was encoded.
///
/// Malformed tokens (empty, truncated escape, unknown prefix token or rule
/// id) are returned unchanged.
///
/// # Examples
///
/// ```
/// use urlpack::core::{decode, PrefixTable, SiteRuleTable};
///
/// let prefixes = PrefixTable::builtin();
/// let rules = SiteRuleTable::builtin();
/// assert_eq!(decode(&prefixes, &rules, "_7Bx.com"), "https://x.com/feed/");
/// ```
pub fn decode(prefixes: &PrefixTable, rules: &SiteRuleTable, token: &str) -> String {
    let Some(parsed) = CompressedToken::parse(token) else {
        tracing::debug!(token = %token, "malformed token, passing it through");
        return token.to_string();
    };

    let remainder = match parsed {
        CompressedToken::Plain { remainder, .. } => Cow::Borrowed(remainder),
        CompressedToken::Rewritten { rule, remainder, .. } => {
            match rules.unrewrite(rule, remainder) {
                Some(restored) => Cow::Owned(restored),
                None => {
                    tracing::debug!(token = %token, rule = %rule, "unknown site rule, passing token through");
                    return token.to_string();
                }
            }
        }
    };

    match prefixes.invert(parsed.prefix(), &remainder) {
        Some(decoded) => decoded,
        None => {
            tracing::debug!(token = %token, prefix = %parsed.prefix(), "unknown prefix token, passing token through");
            token.to_string()
        }
    }
}

/// Give a URL with a host but no path the root path `/`.
///
/// Strings that do not parse as absolute URLs are returned unchanged.
pub fn restore_default_path(decoded: String) -> String {
    match Url::parse(&decoded) {
        Ok(mut url) if url.has_host() => {
            if url.path().is_empty() {
                url.set_path("/");
            }
            url.into()
        }
        _ => decoded,
    }
}
