use std::collections::HashSet;
use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;
use wallpaper_engine::{is_image_file_name, ImageCache};

#[test]
fn empty_or_missing_cache_has_no_image() {
    let temp = TempDir::new().unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    assert_eq!(ImageCache::new(temp.path()).random_image(&mut rng), None);
    assert_eq!(
        ImageCache::new(temp.path().join("missing")).random_image(&mut rng),
        None
    );
}

#[test]
fn only_image_files_are_offered() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.jpg"), b"x").unwrap();
    fs::write(temp.path().join("b.PNG"), b"x").unwrap();
    fs::write(temp.path().join("notes.txt"), b"x").unwrap();
    fs::write(temp.path().join(".partial-123.tmp"), b"x").unwrap();
    fs::create_dir(temp.path().join("dir.jpg")).unwrap();

    let cache = ImageCache::new(temp.path());
    let names: Vec<String> = cache
        .list_images()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.jpg".to_string(), "b.PNG".to_string()]);

    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = HashSet::new();
    for _ in 0..64 {
        let pick = cache.random_image(&mut rng).unwrap();
        assert!(pick.is_absolute());
        seen.insert(pick);
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn lookup_and_remove() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("foo.jpg"), b"x").unwrap();
    let cache = ImageCache::new(temp.path());

    let path = cache.lookup("foo.jpg").expect("cached");
    assert_eq!(cache.lookup("bar.jpg"), None);

    cache.remove(&path).unwrap();
    assert_eq!(cache.lookup("foo.jpg"), None);
    // Removing twice is fine.
    cache.remove(&path).unwrap();
}

#[test]
fn image_name_rules() {
    assert!(is_image_file_name("x.jpeg"));
    assert!(is_image_file_name("x.JPG"));
    assert!(!is_image_file_name(".jpg"));
    assert!(!is_image_file_name(".hidden.png"));
    assert!(!is_image_file_name("x.gif"));
    assert!(!is_image_file_name("jpg"));
}
