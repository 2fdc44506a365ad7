//! Relative references between an origin URL and a target URL.
//!
//! Redirect targets and site links are usually stored next to the feed URL
//! they were found on, so the codec stores them as the shortest reference that
//! still resolves to the same place.

use url::{Position, Url};

use crate::uri::normalizer::{normalize_url, parse_absolute};

/// Build a reference to `target` relative to `origin`.
///
/// - Different schemes: the absolute target.
/// - Different authority: a network-path reference (`//host/path`).
/// - Same path: only the query (when it differs) and fragment.
/// - Otherwise: a path relative to the origin's directory.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use urlpack::uri::route_to;
///
/// let origin = Url::parse("https://a.com/abcd/efgh/ijkl/mno").unwrap();
/// let target = Url::parse("https://a.com/abcd/efgh/x").unwrap();
/// assert_eq!(route_to(&origin, &target), "../x");
/// ```
pub fn route_to(origin: &Url, target: &Url) -> String {
    if origin.scheme() != target.scheme() || origin.cannot_be_a_base() || target.cannot_be_a_base() {
        return target.to_string();
    }

    if origin.username() != target.username()
        || origin.password() != target.password()
        || origin.host_str() != target.host_str()
        || origin.port() != target.port()
    {
        return format!("//{}", &target[Position::BeforeUsername..]);
    }

    let mut reference = if origin.path() == target.path() {
        String::new()
    } else {
        let mut path = route_from_path(origin.path(), target.path());
        if path == "./" && target.query().is_some() {
            path.clear();
        }
        path
    };

    let same_path = origin.path() == target.path();
    if let Some(query) = target.query() {
        if !same_path || origin.query() != target.query() {
            reference.push('?');
            reference.push_str(query);
        }
    }
    if let Some(fragment) = target.fragment() {
        reference.push('#');
        reference.push_str(fragment);
    }

    reference
}

/// Path from the directory of `src` to `dst`.
fn route_from_path(src: &str, dst: &str) -> String {
    if src == dst {
        return String::new();
    }
    if dst.split('/').any(|segment| segment == "." || segment == "..") {
        return dst.to_string();
    }

    let src_dirs: Vec<&str> = src
        .split_inclusive('/')
        .filter(|segment| segment.ends_with('/'))
        .collect();
    let mut dst_segments: Vec<&str> = dst.split_inclusive('/').collect();
    dst_segments.push("");

    let common = src_dirs
        .iter()
        .zip(dst_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let src_left = &src_dirs[common..];
    let dst_left = &dst_segments[common..];
    let tail = dst_left.concat();

    if src_left.is_empty() {
        if tail.is_empty() {
            "./".to_string()
        } else if dst_left.first().is_some_and(|segment| segment.contains(':')) {
            format!("./{tail}")
        } else {
            tail
        }
    } else {
        let mut path = "../".repeat(src_left.len());
        path.push_str(&tail);
        path
    }
}

/// The shortest safe reference to `target` from `origin`.
///
/// Both strings must parse as absolute URLs (the target after
/// normalization); otherwise `target` is returned unchanged. A route that
/// climbs with `../` or starts with `./` is replaced by the root-relative
/// path when that is no longer and lands on the same URL.
pub fn relative_reference(origin: &str, target: &str) -> String {
    let (origin_url, target_url) = match (
        parse_absolute(origin),
        parse_absolute(&normalize_url(target)),
    ) {
        (Ok(origin_url), Ok(target_url)) => (origin_url, target_url),
        (Err(err), _) | (_, Err(err)) => {
            tracing::debug!(origin = %origin, target = %target, error = %err, "cannot relate URLs, keeping target");
            return target.to_string();
        }
    };

    let likely = route_to(&origin_url, &target_url);
    if origin_url.join(&likely).ok().as_ref() != Some(&target_url) {
        tracing::debug!(origin = %origin, reference = %likely, "route does not resolve to target, using absolute URL");
        return target_url.into();
    }

    if !likely.starts_with("../") && !likely.starts_with("./") {
        return likely;
    }

    let from_root = root_relative(&target_url);
    if from_root.len() <= likely.len()
        && origin_url.join(&from_root).ok().as_ref() == Some(&target_url)
    {
        from_root
    } else {
        likely
    }
}

fn root_relative(url: &Url) -> String {
    let mut reference = if url.path().is_empty() {
        "/".to_string()
    } else {
        url.path().to_string()
    };
    if let Some(query) = url.query().filter(|query| !query.is_empty()) {
        reference.push('?');
        reference.push_str(query);
    }
    if let Some(fragment) = url.fragment().filter(|fragment| !fragment.is_empty()) {
        reference.push('#');
        reference.push_str(fragment);
    }
    reference
}

/// Resolve `reference` against `origin`.
///
/// When `origin` is not an absolute URL or the join fails, `reference` is
/// returned unchanged.
pub fn resolve_reference(origin: &str, reference: &str) -> String {
    let base = match parse_absolute(origin) {
        Ok(base) => base,
        Err(err) => {
            tracing::trace!(origin = %origin, error = %err, "origin is not absolute, keeping reference");
            return reference.to_string();
        }
    };

    match base.join(reference) {
        Ok(resolved) => resolved.into(),
        Err(err) => {
            tracing::debug!(origin = %origin, reference = %reference, error = %err, "reference did not resolve");
            reference.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(origin: &str, target: &str) -> String {
        route_to(&Url::parse(origin).unwrap(), &Url::parse(target).unwrap())
    }

    #[test]
    fn test_route_parent_directory() {
        assert_eq!(route("https://a.com/feed/", "https://a.com/"), "../");
        assert_eq!(route("https://a.com/feed/", "https://a.com/foo"), "../foo");
        assert_eq!(route("https://a.com/abcd/efgh/ijkl/mno", "https://a.com/abcd/efgh/x"), "../x");
    }

    #[test]
    fn test_route_same_directory() {
        assert_eq!(route("https://a.com/feed.xml", "https://a.com/"), "./");
        assert_eq!(route("https://a.com/feed.xml", "https://a.com/foo"), "foo");
        assert_eq!(route("https://a.com/p/feed.xml", "https://a.com/p/foo/"), "foo/");
        assert_eq!(route("https://a.com/feed.xml", "https://a.com/?q=1"), "?q=1");
    }

    #[test]
    fn test_route_protects_colon_segment() {
        assert_eq!(route("https://a.com/feed.xml", "https://a.com/a:b"), "./a:b");
    }

    #[test]
    fn test_route_same_path() {
        assert_eq!(route("https://a.com/feed/", "https://a.com/feed/"), "");
        assert_eq!(route("https://a.com/feed/", "https://a.com/feed/#top"), "#top");
        assert_eq!(route("https://a.com/feed/?a", "https://a.com/feed/?b"), "?b");
        assert_eq!(route("https://a.com/feed/?a", "https://a.com/feed/?a"), "");
    }

    #[test]
    fn test_route_other_host() {
        assert_eq!(route("https://www.a.com/feed/", "https://www.apple.com/"), "//www.apple.com/");
        assert_eq!(route("https://a.com/", "https://a.com:8443/x?y"), "//a.com:8443/x?y");
    }

    #[test]
    fn test_route_other_scheme() {
        assert_eq!(route("https://a.com/feed/", "http://www.apple.com/"), "http://www.apple.com/");
    }

    #[test]
    fn test_relative_reference_prefers_root() {
        assert_eq!(relative_reference("https://a.com/feed/", "https://a.com/"), "/");
        assert_eq!(relative_reference("https://a.com/feed/", "https://a.com/abc?def#ghi"), "/abc?def#ghi");
        assert_eq!(relative_reference("https://a.com/feed.xml", "https://a.com/"), "/");
    }

    #[test]
    fn test_relative_reference_keeps_shorter_route() {
        assert_eq!(
            relative_reference("httPS://a.com/abcd/efgh/ijkl/mno", "httPS://a.com/abcd/efgh/x"),
            "../x"
        );
        assert_eq!(
            relative_reference("https://a.com/longassedprefix/feed.xml", "https://a.com/longassedprefix/"),
            "./"
        );
    }

    #[test]
    fn test_relative_reference_unparseable() {
        assert_eq!(relative_reference("bogus1", "https://www.apple.com/"), "https://www.apple.com/");
        assert_eq!(relative_reference("bogus1", "bogus2"), "bogus2");
        assert_eq!(relative_reference("https://a.com/", "bogus2"), "bogus2");
    }

    #[test]
    fn test_relative_reference_dropped_query_uses_absolute() {
        assert_eq!(
            relative_reference("https://a.com/feed/?page=2", "https://a.com/feed/"),
            "https://a.com/feed/"
        );
    }

    #[test]
    fn test_resolve_reference() {
        assert_eq!(
            resolve_reference("https://www.goldenhillsoftware.com/feed/", "../"),
            "https://www.goldenhillsoftware.com/"
        );
        assert_eq!(
            resolve_reference("https://www.goldenhillsoftware.com/feed/", "//www.apple.com/"),
            "https://www.apple.com/"
        );
        assert_eq!(resolve_reference("bogus1", "https://www.apple.com/"), "https://www.apple.com/");
        assert_eq!(resolve_reference("bogus1", "bogus2"), "bogus2");
    }
}
