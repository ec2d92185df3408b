//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped in a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/projects/project-a") // -> "/portfolio/projects/project-a"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Strip the configured root from a request path.
/// Returns `None` when the path lies outside the root.
pub fn strip_root<'a>(config: &SiteConfig, path: &'a str) -> Option<&'a str> {
    let root = config.root.trim_end_matches('/');
    if root.is_empty() {
        return Some(path);
    }
    match path.strip_prefix(root) {
        Some("") => Some("/"),
        Some(rest) if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

/// Encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Decode one path segment; invalid UTF-8 yields `None`
pub fn decode_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/portfolio/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/projects"), "/portfolio/projects");
        assert_eq!(url_for(&config, "/"), "/portfolio/");
        assert_eq!(url_for(&SiteConfig::default(), "/blog"), "/blog");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/about"),
            "https://example.com/portfolio/about"
        );
    }

    #[test]
    fn test_strip_root() {
        let config = test_config();
        assert_eq!(strip_root(&config, "/portfolio/blog"), Some("/blog"));
        assert_eq!(strip_root(&config, "/portfolio"), Some("/"));
        assert_eq!(strip_root(&config, "/portfolios"), None);
        assert_eq!(strip_root(&SiteConfig::default(), "/blog"), Some("/blog"));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(decode_segment("a%20b").as_deref(), Some("a b"));
        assert_eq!(decode_segment("%FF"), None);
    }
}
