use url::Url;

use crate::PostRecord;

/// File extensions accepted verbatim as direct image links.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "jpeg"];

const DEFAULT_IMAGE_HOST: &str = "imgur.com";
/// Multi-image albums have no single image to rewrite to.
const ALBUM_PREFIX: &str = "a";

/// Turns post URLs into directly downloadable image URLs.
///
/// Direct file links are kept as-is. Permalinks on a recognized image host are
/// rewritten to `http://<host>/<id>.jpg`; everything else is dropped. The
/// rewritten URL is not checked here, the download step deals with misses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    hosts: Vec<String>,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::with_hosts([DEFAULT_IMAGE_HOST])
    }
}

impl ImageResolver {
    pub fn with_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts
                .into_iter()
                .map(|h| h.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Resolves posts in order; the output may be empty.
    pub fn resolve(&self, posts: &[PostRecord]) -> Vec<String> {
        posts
            .iter()
            .filter_map(|post| self.resolve_url(&post.url))
            .collect()
    }

    pub fn resolve_url(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        let parsed = Url::parse(raw).ok()?;
        if has_image_extension(parsed.path()) {
            return Some(raw.to_string());
        }
        let host = parsed.host_str()?.to_ascii_lowercase();
        let canonical = self.recognized_host(&host)?;
        rewrite_permalink(canonical, &parsed)
    }

    fn recognized_host(&self, host: &str) -> Option<&str> {
        self.hosts
            .iter()
            .find(|known| {
                host == known.as_str()
                    || host
                        .strip_suffix(known.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            })
            .map(String::as_str)
    }
}

/// Resolves posts with the default recognized image host.
pub fn resolve(posts: &[PostRecord]) -> Vec<String> {
    ImageResolver::default().resolve(posts)
}

/// True when the last path segment ends in one of [`IMAGE_EXTENSIONS`].
pub fn has_image_extension(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => IMAGE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext)),
        _ => false,
    }
}

fn rewrite_permalink(host: &str, url: &Url) -> Option<String> {
    let mut segments: Vec<&str> = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.first() == Some(&ALBUM_PREFIX) {
        return None;
    }
    if segments.last() == Some(&"new") {
        segments.pop();
    }

    let last = segments.last()?;
    let id = match last.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => last,
    };
    if id.is_empty() {
        return None;
    }
    Some(format!("http://{host}/{id}.jpg"))
}

#[cfg(test)]
mod tests {
    use super::{has_image_extension, ImageResolver};

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_image_extension("/x/photo.JPG"));
        assert!(has_image_extension("/photo.jpeg"));
        assert!(!has_image_extension("/photo.gif"));
        assert!(!has_image_extension("/.png"));
        assert!(!has_image_extension("/dir.png/file"));
    }

    #[test]
    fn subdomains_of_recognized_host_match() {
        let resolver = ImageResolver::default();
        assert_eq!(
            resolver.resolve_url("https://m.imgur.com/abc"),
            Some("http://imgur.com/abc.jpg".to_string())
        );
        assert_eq!(resolver.resolve_url("https://notimgur.com/abc"), None);
    }
}
