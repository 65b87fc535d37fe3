use pretty_assertions::assert_eq;
use wallpaper_core::{has_image_extension, resolve, ImageResolver, PostRecord};

fn posts(urls: &[&str]) -> Vec<PostRecord> {
    urls.iter().map(|url| PostRecord::new(*url)).collect()
}

#[test]
fn resolved_urls_are_images_or_dropped() {
    let input = posts(&[
        "https://i.redd.it/abc123.jpg",
        "https://www.reddit.com/r/wallpapers/comments/xyz/some_post/",
        "https://example.com/photo.png",
        "https://example.com/animation.gif",
        "https://imgur.com/a/album1",
        "https://imgur.com/gallery/g1",
        "https://example.com/wide.jpeg",
        "not a url",
    ]);

    let resolved = resolve(&input);
    assert_eq!(
        resolved,
        vec![
            "https://i.redd.it/abc123.jpg".to_string(),
            "https://example.com/photo.png".to_string(),
            "http://imgur.com/g1.jpg".to_string(),
            "https://example.com/wide.jpeg".to_string(),
        ]
    );
    for url in &resolved {
        let path = url.split('?').next().unwrap();
        assert!(has_image_extension(path), "{url} is not an image url");
    }
}

#[test]
fn permalink_with_new_suffix_is_rewritten() {
    let resolver = ImageResolver::with_hosts(["host.example"]);
    assert_eq!(
        resolver.resolve(&posts(&["http://host.example/a1b2c3/new"])),
        vec!["http://host.example/a1b2c3.jpg".to_string()]
    );
}

#[test]
fn direct_extension_on_recognized_host_is_unchanged() {
    let resolver = ImageResolver::with_hosts(["host.example"]);
    assert_eq!(
        resolver.resolve(&posts(&["http://host.example/a1b2c3.png"])),
        vec!["http://host.example/a1b2c3.png".to_string()]
    );
}

#[test]
fn imgur_permalinks_use_the_canonical_host() {
    let resolved = resolve(&posts(&[
        "https://imgur.com/Xyz987",
        "http://imgur.com/Qwe456.gifv",
        "https://imgur.com/Rty000/new",
    ]));
    assert_eq!(
        resolved,
        vec![
            "http://imgur.com/Xyz987.jpg".to_string(),
            "http://imgur.com/Qwe456.jpg".to_string(),
            "http://imgur.com/Rty000.jpg".to_string(),
        ]
    );
}

#[test]
fn gallery_permalinks_are_rewritten_but_albums_are_not() {
    let resolved = resolve(&posts(&[
        "https://imgur.com/gallery/Gal123",
        "https://imgur.com/a/Alb456",
        "https://imgur.com/gallery/Gal789/new",
    ]));
    assert_eq!(
        resolved,
        vec![
            "http://imgur.com/Gal123.jpg".to_string(),
            "http://imgur.com/Gal789.jpg".to_string(),
        ]
    );
}

#[test]
fn order_is_preserved_and_empty_input_is_fine() {
    let resolved = resolve(&posts(&[
        "https://example.com/b.png",
        "https://example.com/a.jpg",
    ]));
    assert_eq!(
        resolved,
        vec![
            "https://example.com/b.png".to_string(),
            "https://example.com/a.jpg".to_string(),
        ]
    );
    assert!(resolve(&[]).is_empty());
}

#[test]
fn query_string_does_not_hide_the_extension() {
    let resolved = resolve(&posts(&["https://example.com/pic.jpg?width=3840"]));
    assert_eq!(resolved, vec!["https://example.com/pic.jpg?width=3840".to_string()]);
}
