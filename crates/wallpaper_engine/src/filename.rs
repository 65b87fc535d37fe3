use url::Url;

const MAX_NAME_LEN: usize = 120;

/// Local cache name for an image URL: its final path segment, made safe for
/// the filesystem. Query and fragment are ignored. `None` when the URL has no
/// usable final segment.
pub fn cache_file_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let last = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;
    let name = sanitize(last);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    let mut final_name = truncate_keeping_extension(compacted, MAX_NAME_LEN);
    if is_reserved_windows_name(&final_name) {
        final_name.insert(0, '_');
    }
    final_name
}

fn truncate_keeping_extension(name: String, max_len: usize) -> String {
    if name.len() <= max_len {
        return name;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if ext.len() < 8 => (stem, Some(ext)),
        _ => (name.as_str(), None),
    };
    let budget = max_len - ext.map_or(0, |e| e.len() + 1);
    let mut end = budget.min(stem.len());
    while end > 0 && !stem.is_char_boundary(end) {
        end -= 1;
    }
    match ext {
        Some(ext) => format!("{}.{ext}", &stem[..end]),
        None => stem[..end].to_string(),
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    let stem = name.split('.').next().unwrap_or(name);
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(stem))
}

#[cfg(test)]
mod tests {
    use super::cache_file_name;

    #[test]
    fn uses_final_segment_and_ignores_query() {
        assert_eq!(
            cache_file_name("https://i.redd.it/abc123.jpg?s=99").as_deref(),
            Some("abc123.jpg")
        );
        assert_eq!(
            cache_file_name("http://imgur.com/Xyz987.jpg").as_deref(),
            Some("Xyz987.jpg")
        );
    }

    #[test]
    fn trailing_slash_uses_previous_segment() {
        assert_eq!(
            cache_file_name("https://example.com/wall/photo.png/").as_deref(),
            Some("photo.png")
        );
    }

    #[test]
    fn no_segment_means_no_name() {
        assert_eq!(cache_file_name("https://example.com/"), None);
        assert_eq!(cache_file_name("https://example.com/..."), None);
        assert_eq!(cache_file_name("not a url"), None);
    }

    #[test]
    fn reserved_and_long_names_are_patched() {
        assert_eq!(
            cache_file_name("https://example.com/con.jpg").as_deref(),
            Some("_con.jpg")
        );
        let long = format!("https://example.com/{}.jpeg", "a".repeat(300));
        let name = cache_file_name(&long).unwrap();
        assert_eq!(name.len(), 120);
        assert!(name.ends_with(".jpeg"));
    }
}
