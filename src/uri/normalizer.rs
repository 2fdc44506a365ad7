//! URL normalization ahead of compression.

use url::Url;

use crate::error::UrlPackError;

/// Parse `url_str` as an absolute URL.
///
/// A relative reference is reported as [`UrlPackError::RelativeUrl`] so that
/// callers can tell it apart from a malformed URL.
pub fn parse_absolute(url_str: &str) -> Result<Url, UrlPackError> {
    Url::parse(url_str).map_err(|err| match err {
        url::ParseError::RelativeUrlWithoutBase => UrlPackError::RelativeUrl(url_str.to_string()),
        other => other.into(),
    })
}

/// Normalize a URL string.
///
/// Absolute URLs get the `url` crate's canonical serialization: lowercase
/// scheme and host, default ports dropped, percent-encoding canonicalized.
/// A URL with a host but no path gets the path `/`.
///
/// Relative references are kept, except that the empty reference becomes `/`
/// and a network-path reference (`//host...`) has its host lowercased.
/// Anything that fails to parse is returned unchanged.
///
/// # Examples
///
/// ```
/// use urlpack::uri::normalize_url;
///
/// assert_eq!(
///     normalize_url("httpS://www.goldenhillsoftware.com:443/foo"),
///     "https://www.goldenhillsoftware.com/foo"
/// );
/// assert_eq!(normalize_url("foobar"), "foobar");
/// ```
pub fn normalize_url(url_str: &str) -> String {
    match parse_absolute(url_str) {
        Ok(url) => with_default_path(url).into(),
        Err(UrlPackError::RelativeUrl(_)) => normalize_reference(url_str),
        Err(err) => {
            tracing::trace!(input = %url_str, error = %err, "leaving unparseable URL as-is");
            url_str.to_string()
        }
    }
}

/// Give a URL with a host and an empty path the root path.
pub fn with_default_path(mut url: Url) -> Url {
    if url.has_host() && url.path().is_empty() {
        url.set_path("/");
    }
    url
}

fn normalize_reference(reference: &str) -> String {
    if reference.is_empty() {
        return "/".to_string();
    }

    let Some(rest) = reference.strip_prefix("//") else {
        return reference.to_string();
    };

    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(end);
    let authority = match authority.rsplit_once('@') {
        Some((userinfo, host)) => format!("{userinfo}@{}", host.to_ascii_lowercase()),
        None => authority.to_ascii_lowercase(),
    };

    if tail.starts_with('/') {
        format!("//{authority}{tail}")
    } else {
        format!("//{authority}/{tail}")
    }
}
