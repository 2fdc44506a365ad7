//! Compression facade tying normalization, the tables and relative
//! references together.

use std::borrow::Cow;
use std::sync::LazyLock;

use crate::core::decoder::{decode, restore_default_path};
use crate::core::encoder::{elide_trailing_slash, encode};
use crate::core::prefix::PrefixTable;
use crate::core::rules::SiteRuleTable;
use crate::error::UrlPackError;
use crate::types::{CompressedToken, ESCAPE};
use crate::uri::normalizer::normalize_url;
use crate::uri::relative::{relative_reference, resolve_reference};

static BUILTIN: LazyLock<UrlCompressor> = LazyLock::new(UrlCompressor::new);

/// URL compressor over a prefix table and a site rule table.
///
/// The built-in tables cover common feed hosts; custom tables go through
/// [`UrlCompressor::with_tables`]. A compressor is immutable and can be
/// shared freely between threads.
///
/// # Examples
///
/// ```
/// use urlpack::UrlCompressor;
///
/// let compressor = UrlCompressor::new();
/// let token = compressor.compress("httpS://www.goldenhillsoftware.com:443/foo");
/// assert_eq!(token, "Agoldenhillsoftware.com/foo");
/// assert_eq!(compressor.decompress(&token), "https://www.goldenhillsoftware.com/foo");
/// ```
#[derive(Debug, Clone)]
pub struct UrlCompressor {
    prefixes: PrefixTable,
    rules: SiteRuleTable,
}

impl UrlCompressor {
    /// Create a compressor with the built-in tables.
    pub fn new() -> Self {
        Self {
            prefixes: PrefixTable::builtin(),
            rules: SiteRuleTable::builtin(),
        }
    }

    /// The shared compressor with the built-in tables.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Create a compressor with custom tables.
    ///
    /// Site rule ids must not collide with prefix tokens, since both share
    /// the token's character space.
    pub fn with_tables(prefixes: PrefixTable, rules: SiteRuleTable) -> Result<Self, UrlPackError> {
        if let Some(rule) = rules
            .rules()
            .iter()
            .find(|rule| rule.id() == ESCAPE || prefixes.contains_token(rule.id()))
        {
            return Err(UrlPackError::RuleTokenCollision(rule.id()));
        }
        Ok(Self { prefixes, rules })
    }

    /// The prefix table.
    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    /// The site rule table.
    pub fn rules(&self) -> &SiteRuleTable {
        &self.rules
    }

    /// Normalize a URL; see [`normalize_url`].
    pub fn normalize(&self, url: &str) -> String {
        normalize_url(url)
    }

    /// Normalize and compress a URL.
    ///
    /// A trailing `/` that is the token's only slash is dropped when
    /// decompression restores it.
    pub fn compress(&self, url: &str) -> String {
        let normalized = normalize_url(url);
        let token = encode(&self.prefixes, &self.rules, &normalized);

        match elide_trailing_slash(&token) {
            Some(elided) if self.decompress(elided) == normalized => elided.to_string(),
            _ => token,
        }
    }

    /// Decompress a token from [`UrlCompressor::compress`].
    pub fn decompress(&self, token: &str) -> String {
        restore_default_path(decode(&self.prefixes, &self.rules, token))
    }

    /// Compress a string exactly as given, URL or not.
    pub fn compress_lossless(&self, input: &str) -> String {
        encode(&self.prefixes, &self.rules, input)
    }

    /// Decompress a token from [`UrlCompressor::compress_lossless`].
    pub fn decompress_lossless(&self, token: &str) -> String {
        decode(&self.prefixes, &self.rules, token)
    }

    /// Reference to `url` relative to `origin`; without an origin, the
    /// normalized URL.
    pub fn relative(&self, origin: Option<&str>, url: &str) -> String {
        match origin {
            Some(origin) => relative_reference(origin, url),
            None => normalize_url(url),
        }
    }

    /// Resolve `reference` against `origin`; without an origin, the
    /// reference itself.
    pub fn resolve(&self, origin: Option<&str>, reference: &str) -> String {
        match origin {
            Some(origin) => resolve_reference(origin, reference),
            None => reference.to_string(),
        }
    }

    /// Compress `url` as a reference relative to `origin`.
    ///
    /// A scheme/host token whose only `/` is the last character loses it;
    /// [`UrlCompressor::decompress_relative`] puts it back. A scheme/host
    /// token with no `/` at all, as left by an unparseable target such as
    /// `http://exa mple.com`, is stored under the catch-all token instead.
    pub fn compress_relative(&self, origin: Option<&str>, url: &str) -> String {
        let reference = self.relative(origin, url);
        let token = encode(&self.prefixes, &self.rules, &reference);

        if !self.starts_origin_style(&token) {
            return token;
        }
        if !token.contains('/') {
            if let Some(catch_all) = self.prefixes.catch_all() {
                tracing::debug!(reference = %reference, "host token without a path, storing it verbatim");
                return CompressedToken::Plain {
                    prefix: catch_all,
                    remainder: &reference,
                }
                .to_string();
            }
        }
        match elide_trailing_slash(&token) {
            Some(elided) => elided.to_string(),
            None => token,
        }
    }

    /// Decompress a token from [`UrlCompressor::compress_relative`] and
    /// resolve it against `origin`.
    pub fn decompress_relative(&self, origin: Option<&str>, token: &str) -> String {
        let token = if self.starts_origin_style(token) && !token.contains('/') {
            Cow::Owned(format!("{token}/"))
        } else {
            Cow::Borrowed(token)
        };
        let reference = decode(&self.prefixes, &self.rules, &token);
        self.resolve(origin, &reference)
    }

    /// Split a token into its parts without expanding it.
    pub fn inspect<'a>(&self, token: &'a str) -> Option<CompressedToken<'a>> {
        CompressedToken::parse(token)
    }

    fn starts_origin_style(&self, token: &str) -> bool {
        token
            .chars()
            .next()
            .is_some_and(|token| self.prefixes.is_origin_style(token))
    }
}

impl Default for UrlCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a URL with the built-in compressor.
///
/// # Examples
///
/// ```
/// use urlpack::normalized_url;
///
/// assert_eq!(
///     normalized_url(Some("httpS://www.goldenhillsoftware.com:443/foo")).as_deref(),
///     Some("https://www.goldenhillsoftware.com/foo")
/// );
/// assert_eq!(normalized_url(None), None);
/// ```
pub fn normalized_url(url: Option<&str>) -> Option<String> {
    url.map(|url| BUILTIN.normalize(url))
}

/// Normalize and compress a URL.
///
/// # Examples
///
/// ```
/// use urlpack::compressed_url;
///
/// assert_eq!(compressed_url(Some("https://medium.com/feed/abcdefg")).as_deref(), Some("aabcdefg"));
/// assert_eq!(compressed_url(Some("")).as_deref(), Some("I"));
/// ```
pub fn compressed_url(url: Option<&str>) -> Option<String> {
    url.map(|url| BUILTIN.compress(url))
}

/// Decompress a token from [`compressed_url`].
pub fn decompressed_url(token: Option<&str>) -> Option<String> {
    token.map(|token| BUILTIN.decompress(token))
}

/// Reference to `url` relative to `origin`.
pub fn relative_url(origin: Option<&str>, url: Option<&str>) -> Option<String> {
    url.map(|url| BUILTIN.relative(origin, url))
}

/// Resolve `reference` against `origin`.
pub fn from_relative_url(origin: Option<&str>, reference: Option<&str>) -> Option<String> {
    reference.map(|reference| BUILTIN.resolve(origin, reference))
}

/// Compress `url` relative to `origin`.
///
/// # Examples
///
/// ```
/// use urlpack::{compressed_relative_url, decompressed_relative_url};
///
/// let origin = Some("https://x.com/feed/");
/// let token = compressed_relative_url(origin, Some("https://x.com/"));
/// assert_eq!(token.as_deref(), Some("I"));
/// assert_eq!(
///     decompressed_relative_url(origin, token.as_deref()).as_deref(),
///     Some("https://x.com/")
/// );
/// ```
pub fn compressed_relative_url(origin: Option<&str>, url: Option<&str>) -> Option<String> {
    url.map(|url| BUILTIN.compress_relative(origin, url))
}

/// Decompress a token from [`compressed_relative_url`].
pub fn decompressed_relative_url(origin: Option<&str>, token: Option<&str>) -> Option<String> {
    token.map(|token| BUILTIN.decompress_relative(origin, token))
}

/// Compress a string exactly as given.
pub fn losslessly_compressed_url(input: Option<&str>) -> Option<String> {
    input.map(|input| BUILTIN.compress_lossless(input))
}

/// Decompress a token from [`losslessly_compressed_url`].
pub fn losslessly_decompressed_url(token: Option<&str>) -> Option<String> {
    token.map(|token| BUILTIN.decompress_lossless(token))
}
