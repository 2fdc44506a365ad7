//! Site-specific rewrite rules applied to the remainder left by the prefix
//! table.
//!
//! A few hosting platforms and feed filenames account for a large share of
//! stored URLs. Each rule collapses one of those shapes into its capture
//! groups and carries the pattern that expands it again.

use std::collections::HashSet;

use regex::Regex;

use crate::error::UrlPackError;
use crate::types::ESCAPE;

/// `(id, input pattern, input replacement, output pattern, output replacement)`
type RuleSource = (char, &'static str, &'static str, &'static str, &'static str);

const BUILTIN_RULES: &[RuleSource] = &[
    ('a', r"^([^,]+)\.com/blog/feed([^,]+)$", "${1},${2}", r"^([^,]*),([^,]*)$", "${1}.com/blog/feed${2}"),
    ('b', r"^([^,]+)\.com/blog/([^,]+)$", "${1},${2}", r"^([^,]*),([^,]*)$", "${1}.com/blog/${2}"),
    ('c', r"^([^,]+)\.com/blog$", "${1}", r"^([^,]*)$", "${1}.com/blog"),
    ('d', r"^([^/.]+)\.wordpress\.com/feed/$", "${1}", r"^([^,]*)$", "${1}.wordpress.com/feed/"),
    ('e', r"^([^/.]+)\.wordpress\.com/(.*)$", "${1}/${2}", r"^([^/]*)(/?.*)$", "${1}.wordpress.com${2}"),
    ('f', r"^([^/.]+)\.tumblr\.com/rss$", "${1}", r"^([^/]*)(/?.*)$", "${1}.tumblr.com/rss${2}"),
    ('g', r"^([^/.]+)\.tumblr\.com/(.*)$", "${1}/${2}", r"^([^/]*)(/?.*)$", "${1}.tumblr.com${2}"),
    (
        '1',
        r"^([A-Za-z0-9]+)\.blogspot\.com/feeds/posts/default\?alt=rss$",
        "${1}",
        r"^(.*)$",
        "${1}.blogspot.com/feeds/posts/default?alt=rss",
    ),
    (
        '0',
        r"^([A-Za-z0-9]+)\.blogspot\.com/feeds/posts/default$",
        "${1}",
        r"^(.*)$",
        "${1}.blogspot.com/feeds/posts/default",
    ),
    ('2', r"^([A-Za-z0-9]+)\.blogspot\.com(.*)$", "${1}${2}", r"^([^/]*)(.*)$", "${1}.blogspot.com${2}"),
    ('3', r"^([A-Za-z0-9]+)\.micro\.blog/feed\.json$", "${1}", r"^(.*)$", "${1}.micro.blog/feed.json"),
    ('4', r"^([A-Za-z0-9]+)\.micro\.blog/feed\.xml$", "${1}", r"^(.*)$", "${1}.micro.blog/feed.xml"),
    ('5', r"^([A-Za-z0-9]+)\.micro\.blog/$", "${1}", r"^(.*)$", "${1}.micro.blog/"),
    ('6', r"^(.*)/feed\.json$", "${1}", r"^(.*)$", "${1}/feed.json"),
    ('7', r"^(.*)/feed/$", "${1}", r"^(.*)$", "${1}/feed/"),
    ('8', r"^(.*)/feed\.xml$", "${1}", r"^(.*)$", "${1}/feed.xml"),
    ('9', r"^(.*)/index\.xml$", "${1}", r"^(.*)$", "${1}/index.xml"),
];

/// A reversible regex rewrite keyed by a single id character.
#[derive(Debug, Clone)]
pub struct SiteRule {
    id: char,
    input_pattern: Regex,
    input_replacement: String,
    output_pattern: Regex,
    output_replacement: String,
}

impl SiteRule {
    /// Compile a rule. Replacements use `regex` syntax (`${1}`).
    pub fn new(
        id: char,
        input_pattern: &str,
        input_replacement: impl Into<String>,
        output_pattern: &str,
        output_replacement: impl Into<String>,
    ) -> Result<Self, UrlPackError> {
        Ok(Self {
            id,
            input_pattern: Regex::new(input_pattern)?,
            input_replacement: input_replacement.into(),
            output_pattern: Regex::new(output_pattern)?,
            output_replacement: output_replacement.into(),
        })
    }

    /// The rule's id.
    pub fn id(&self) -> char {
        self.id
    }

    /// Collapse `remainder` into the short form, if the rule matches it.
    pub fn apply(&self, remainder: &str) -> Option<String> {
        if !self.input_pattern.is_match(remainder) {
            return None;
        }
        Some(
            self.input_pattern
                .replace(remainder, self.input_replacement.as_str())
                .into_owned(),
        )
    }

    /// Expand a short form produced by [`SiteRule::apply`].
    pub fn revert(&self, rewritten: &str) -> String {
        self.output_pattern
            .replace(rewritten, self.output_replacement.as_str())
            .into_owned()
    }
}

/// Ordered list of site rules; the first applicable rule wins.
#[derive(Debug, Clone, Default)]
pub struct SiteRuleTable {
    rules: Vec<SiteRule>,
}

impl SiteRuleTable {
    /// Build a table, rejecting duplicate ids and the escape character.
    pub fn new(rules: Vec<SiteRule>) -> Result<Self, UrlPackError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.id == ESCAPE {
                return Err(UrlPackError::RuleTokenCollision(rule.id));
            }
            if !seen.insert(rule.id) {
                return Err(UrlPackError::DuplicateRule(rule.id));
            }
        }
        Ok(Self { rules })
    }

    /// A table with no rules; remainders are always stored as-is.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rules.
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|&(id, input, input_replacement, output, output_replacement)| {
                SiteRule::new(id, input, input_replacement, output, output_replacement)
                    .expect("built-in site rule patterns compile")
            })
            .collect();
        Self { rules }
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[SiteRule] {
        &self.rules
    }

    /// Look up a rule by id.
    pub fn get(&self, id: char) -> Option<&SiteRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Rewrite `remainder` with the first rule that matches it and restores
    /// it exactly.
    pub fn rewrite(&self, remainder: &str) -> Option<(char, String)> {
        for rule in &self.rules {
            let Some(rewritten) = rule.apply(remainder) else {
                continue;
            };
            if rule.revert(&rewritten) == remainder {
                return Some((rule.id, rewritten));
            }
            tracing::debug!(
                rule = %rule.id,
                remainder = %remainder,
                "site rule does not round-trip this remainder, skipping"
            );
        }
        None
    }

    /// Restore the remainder that rule `id` collapsed into `rewritten`.
    pub fn unrewrite(&self, id: char, rewritten: &str) -> Option<String> {
        self.get(id).map(|rule| rule.revert(rewritten))
    }
}
