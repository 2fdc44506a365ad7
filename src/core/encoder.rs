//! Token encoding: prefix substitution followed by an optional site rule.

use crate::core::prefix::PrefixTable;
use crate::core::rules::SiteRuleTable;
use crate::types::CompressedToken;

/// Encode `input` exactly as given, with no normalization.
///
/// The first matching prefix is replaced by its token; a non-empty remainder
/// is then offered to the site rules. If the prefix table has no catch-all
/// and nothing matches, the input is returned unchanged.
///
/// # Examples
///
/// ```
/// use urlpack::core::{encode, PrefixTable, SiteRuleTable};
///
/// let prefixes = PrefixTable::builtin();
/// let rules = SiteRuleTable::builtin();
/// assert_eq!(encode(&prefixes, &rules, "https://medium.com/feed/abcdefg"), "aabcdefg");
/// assert_eq!(encode(&prefixes, &rules, "https://x.com/feed/"), "_7Bx.com");
/// ```
pub fn encode(prefixes: &PrefixTable, rules: &SiteRuleTable, input: &str) -> String {
    let Some((prefix, remainder)) = prefixes.substitute(input) else {
        tracing::debug!(input = %input, "no prefix entry matched, passing input through");
        return input.to_string();
    };

    if !remainder.is_empty() {
        if let Some((rule, rewritten)) = rules.rewrite(remainder) {
            return CompressedToken::Rewritten {
                rule,
                prefix,
                remainder: &rewritten,
            }
            .to_string();
        }
    }

    CompressedToken::Plain { prefix, remainder }.to_string()
}

/// The token without its trailing `/`, when that `/` is its only slash.
pub fn elide_trailing_slash(token: &str) -> Option<&str> {
    match token.find('/') {
        Some(index) if index + 1 == token.len() => Some(&token[..index]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_builtin(input: &str) -> String {
        encode(&PrefixTable::builtin(), &SiteRuleTable::builtin(), input)
    }

    #[test]
    fn test_encode_plain() {
        assert_eq!(
            encode_builtin("https://www.goldenhillsoftware.com/foo"),
            "Agoldenhillsoftware.com/foo"
        );
        assert_eq!(encode_builtin("foobar"), "Jfoobar");
        assert_eq!(encode_builtin(""), "J");
        assert_eq!(encode_builtin("/"), "I");
    }

    #[test]
    fn test_encode_rewritten() {
        assert_eq!(
            encode_builtin("http://paulbuchheit.blogspot.com/feeds/posts/default?alt=rss"),
            "_1Dpaulbuchheit"
        );
        assert_eq!(encode_builtin("https://staff.tumblr.com/rss"), "_fBstaff");
    }

    #[test]
    fn test_encode_without_rules() {
        let encoded = encode(
            &PrefixTable::builtin(),
            &SiteRuleTable::empty(),
            "https://x.com/feed/",
        );
        assert_eq!(encoded, "Bx.com/feed/");
    }

    #[test]
    fn test_plain_tokens_never_start_with_escape() {
        for input in ["_", "_foo", "__", "_1Dx"] {
            assert!(encode_builtin(input).starts_with('J'));
        }
    }

    #[test]
    fn test_elide_trailing_slash() {
        assert_eq!(elide_trailing_slash("Dgoldenhillsoftware.com/"), Some("Dgoldenhillsoftware.com"));
        assert_eq!(elide_trailing_slash("Agoldenhillsoftware.com/foo"), None);
        assert_eq!(elide_trailing_slash("Dx.com/?ab"), None);
        assert_eq!(elide_trailing_slash("I"), None);
        assert_eq!(elide_trailing_slash("/"), Some(""));
    }
}
