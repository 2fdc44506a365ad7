//! Ordered prefix substitution table.
//!
//! Entries are tried in declaration order and the first one whose long form
//! prefixes the input wins, so specific site prefixes must be declared ahead
//! of the generic scheme/host shapes they share a beginning with.

use std::collections::HashSet;

use crate::error::UrlPackError;
use crate::types::{PrefixEntry, ESCAPE};

/// Built-in table. Lowercase tokens are site prefixes, uppercase tokens are
/// generic shapes, and the empty catch-all comes last.
const BUILTIN_PREFIXES: &[(char, &str)] = &[
    ('a', "https://medium.com/feed/"),
    ('b', "https://medium.com/@"),
    ('c', "http://www.blogger.com/feeds/"),
    ('d', "https://feedpress.me/"),
    ('e', "http://feeds.feedburner.com/"),
    ('f', "https://feeds.feedburner.com/"),
    ('g', "http://feeds2.feedburner.com/"),
    ('h', "https://feeds2.feedburner.com/"),
    ('i', "https://youtube.com/feeds/videos.xml?channel_id="),
    ('j', "https://youtube.com/feeds/videos.xml?playlist_id="),
    ('k', "https://world.hey.com/"),
    ('l', "https://blogs."),
    ('m', "http://blogs."),
    ('n', "https://blog."),
    ('o', "http://blog."),
    ('p', "https://www.goldenhillsoftware.com/private/testfeed.xml?foobar="),
    // YouTube website paths, reached through relative references
    ('q', "/channel/"),
    ('r', "/playlist?list="),
    ('t', "https://microblog."),
    ('s', "https://micro."),
    ('u', "https://www.youtube.com/feeds/videos.xml?channel_id="),
    ('v', "https://www.youtube.com/feeds/videos.xml?playlist_id="),
    ('w', "https://www.goodreads.com/review/list_rss/"),
    ('x', "https://www.goodreads.com/user/updates_rss/"),
    ('A', "https://www."),
    ('B', "https://"),
    ('C', "http://www."),
    ('D', "http://"),
    // Only the first "../" is absorbed
    ('E', "../"),
    ('F', "./"),
    ('G', "//www."),
    ('H', "//"),
    ('I', "/"),
    ('J', ""),
];

/// Ordered list of prefix entries with first-match substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    entries: Vec<PrefixEntry>,
}

impl PrefixTable {
    /// Build a table from entries, checking that it encodes unambiguously.
    ///
    /// Rejects tokens equal to the escape character, long forms starting with
    /// it, duplicate tokens, entries that an earlier entry makes unreachable,
    /// and tables without an empty catch-all.
    pub fn new(entries: Vec<PrefixEntry>) -> Result<Self, UrlPackError> {
        let mut seen = HashSet::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.short == ESCAPE {
                return Err(UrlPackError::EscapeToken(entry.short));
            }
            if entry.long.starts_with(ESCAPE) {
                return Err(UrlPackError::EscapePrefix(entry.long.clone()));
            }
            if !seen.insert(entry.short) {
                return Err(UrlPackError::DuplicateToken(entry.short));
            }
            if let Some(earlier) = entries[..index]
                .iter()
                .find(|earlier| entry.long.starts_with(earlier.long.as_str()))
            {
                return Err(UrlPackError::ShadowedEntry {
                    earlier: earlier.long.clone(),
                    shadowed: entry.long.clone(),
                });
            }
        }

        if !entries.iter().any(PrefixEntry::is_catch_all) {
            return Err(UrlPackError::MissingCatchAll);
        }

        Ok(Self { entries })
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_PREFIXES
                .iter()
                .map(|&(short, long)| PrefixEntry::new(short, long))
                .collect(),
        }
    }

    /// Entries in priority order.
    pub fn entries(&self) -> &[PrefixEntry] {
        &self.entries
    }

    /// Look up an entry by its token.
    pub fn get(&self, token: char) -> Option<&PrefixEntry> {
        self.entries.iter().find(|entry| entry.short == token)
    }

    /// Token of the empty catch-all entry.
    pub fn catch_all(&self) -> Option<char> {
        self.entries
            .iter()
            .find(|entry| entry.is_catch_all())
            .map(|entry| entry.short)
    }

    /// Whether `token` is one of this table's tokens.
    pub fn contains_token(&self, token: char) -> bool {
        self.get(token).is_some()
    }

    /// Replace the first matching long prefix of `input` with its token.
    ///
    /// Returns the token and the rest of the input. `None` only when the
    /// table has no catch-all.
    pub fn substitute<'s>(&self, input: &'s str) -> Option<(char, &'s str)> {
        self.entries.iter().find_map(|entry| {
            input
                .strip_prefix(entry.long.as_str())
                .map(|remainder| (entry.short, remainder))
        })
    }

    /// Expand `token` back into its long prefix followed by `remainder`.
    pub fn invert(&self, token: char, remainder: &str) -> Option<String> {
        self.get(token).map(|entry| {
            let mut expanded = String::with_capacity(entry.long.len() + remainder.len());
            expanded.push_str(&entry.long);
            expanded.push_str(remainder);
            expanded
        })
    }

    /// Whether `token` stands for an absolute scheme/host beginning such as
    /// `https://www.`, `http://` or `//`.
    pub fn is_origin_style(&self, token: char) -> bool {
        self.get(token)
            .is_some_and(|entry| is_origin_prefix(&entry.long))
    }
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Matches `[scheme:]//` optionally followed by `www.`.
fn is_origin_prefix(long: &str) -> bool {
    let Some((scheme, host)) = long.split_once("//") else {
        return false;
    };

    let scheme_ok = scheme.is_empty()
        || scheme.strip_suffix(':').is_some_and(|name| {
            let mut chars = name.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        });

    scheme_ok && (host.is_empty() || host == "www.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        let entries = PrefixTable::builtin().entries().to_vec();
        assert!(PrefixTable::new(entries).is_ok());
    }

    #[test]
    fn test_substitute_first_match_wins() {
        let table = PrefixTable::builtin();
        assert_eq!(
            table.substitute("https://www.goldenhillsoftware.com/foo"),
            Some(('A', "goldenhillsoftware.com/foo"))
        );
        assert_eq!(
            table.substitute("https://medium.com/feed/abcdefg"),
            Some(('a', "abcdefg"))
        );
        assert_eq!(table.substitute("https://medium.com/"), Some(('B', "medium.com/")));
    }

    #[test]
    fn test_substitute_exact_match() {
        let table = PrefixTable::builtin();
        assert_eq!(table.substitute("/"), Some(('I', "")));
        assert_eq!(table.substitute("../"), Some(('E', "")));
        assert_eq!(table.substitute(""), Some(('J', "")));
    }

    #[test]
    fn test_substitute_catch_all() {
        let table = PrefixTable::builtin();
        assert_eq!(table.substitute("foobar"), Some(('J', "foobar")));
        assert_eq!(table.substitute("HTTPS://x"), Some(('J', "HTTPS://x")));
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(PrefixTable::builtin().catch_all(), Some('J'));
    }

    #[test]
    fn test_micro_site_prefixes() {
        let table = PrefixTable::builtin();
        assert_eq!(table.substitute("https://microblog.example"), Some(('t', "example")));
        assert_eq!(table.substitute("https://micro.example"), Some(('s', "example")));
    }

    #[test]
    fn test_invert() {
        let table = PrefixTable::builtin();
        assert_eq!(
            table.invert('A', "goldenhillsoftware.com/foo").as_deref(),
            Some("https://www.goldenhillsoftware.com/foo")
        );
        assert_eq!(table.invert('J', "foobar").as_deref(), Some("foobar"));
        assert_eq!(table.invert('_', "x"), None);
        assert_eq!(table.invert('Z', "x"), None);
    }

    #[test]
    fn test_origin_style_tokens() {
        let table = PrefixTable::builtin();
        let origin_style: String = table
            .entries()
            .iter()
            .map(|entry| entry.short)
            .filter(|&token| table.is_origin_style(token))
            .collect();
        assert_eq!(origin_style, "ABCDGH");
    }

    #[test]
    fn test_rejects_escape_token() {
        let result = PrefixTable::new(vec![PrefixEntry::new('_', "x"), PrefixEntry::new('J', "")]);
        assert_eq!(result.unwrap_err(), UrlPackError::EscapeToken('_'));
    }

    #[test]
    fn test_rejects_escape_prefix() {
        let result = PrefixTable::new(vec![PrefixEntry::new('a', "_x"), PrefixEntry::new('J', "")]);
        assert_eq!(result.unwrap_err(), UrlPackError::EscapePrefix("_x".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_token() {
        let result = PrefixTable::new(vec![
            PrefixEntry::new('a', "x"),
            PrefixEntry::new('a', "y"),
            PrefixEntry::new('J', ""),
        ]);
        assert_eq!(result.unwrap_err(), UrlPackError::DuplicateToken('a'));
    }

    #[test]
    fn test_rejects_shadowed_entry() {
        let result = PrefixTable::new(vec![
            PrefixEntry::new('B', "https://"),
            PrefixEntry::new('A', "https://www."),
            PrefixEntry::new('J', ""),
        ]);
        assert_eq!(
            result.unwrap_err(),
            UrlPackError::ShadowedEntry {
                earlier: "https://".to_string(),
                shadowed: "https://www.".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_missing_catch_all() {
        let result = PrefixTable::new(vec![PrefixEntry::new('A', "https://www.")]);
        assert_eq!(result.unwrap_err(), UrlPackError::MissingCatchAll);
    }

    #[test]
    fn test_is_origin_prefix() {
        assert!(is_origin_prefix("https://www."));
        assert!(is_origin_prefix("http://"));
        assert!(is_origin_prefix("//"));
        assert!(is_origin_prefix("//www."));
        assert!(!is_origin_prefix("https://blog."));
        assert!(!is_origin_prefix("/"));
        assert!(!is_origin_prefix("../"));
        assert!(!is_origin_prefix(""));
        assert!(!is_origin_prefix("1http://"));
    }
}
