use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;
use wallpaper_engine::{
    ApplyError, ContentSource, Engine, FetchSettings, ListedPost, LogProgressSink, ReqwestFetcher,
    SelectionOrigin, SizePolicy, SourceError, UnsupportedSetter, WallpaperSetter,
};

struct OfflineSource;

#[async_trait::async_trait]
impl ContentSource for OfflineSource {
    async fn top_posts(
        &self,
        _channel: &str,
        _window: &str,
    ) -> Result<Vec<ListedPost>, SourceError> {
        Err(SourceError::Unavailable("no network".to_string()))
    }
}

#[derive(Clone, Default)]
struct RecordingSetter {
    applied: Arc<Mutex<Vec<String>>>,
}

impl WallpaperSetter for RecordingSetter {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn apply(&self, path: &Path) -> Result<(), ApplyError> {
        self.applied
            .lock()
            .unwrap()
            .push(path.display().to_string());
        Ok(())
    }
}

fn engine(dir: &Path, setter: Box<dyn WallpaperSetter>) -> Engine {
    Engine::from_parts(
        Box::new(OfflineSource),
        Arc::new(ReqwestFetcher::new(FetchSettings::default())),
        setter,
        dir.to_path_buf(),
        SizePolicy::default(),
        StdRng::seed_from_u64(5),
    )
}

#[tokio::test]
async fn unavailable_source_and_empty_cache_leave_nothing_to_apply() {
    let temp = TempDir::new().unwrap();
    let mut engine = engine(temp.path(), Box::new(RecordingSetter::default()));

    let err = engine.top_posts("wallpapers", "day").await.unwrap_err();
    assert!(matches!(err, SourceError::Unavailable(_)));
    assert_eq!(engine.random_cached_image(), None);
}

#[tokio::test]
async fn cached_fallback_is_applied_through_the_setter() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("old.jpg"), b"x").unwrap();
    let setter = RecordingSetter::default();
    let mut engine = engine(temp.path(), Box::new(setter.clone()));

    let path = engine.random_cached_image().expect("cached image");
    engine.apply(&path).unwrap();

    assert_eq!(
        setter.applied.lock().unwrap().as_slice(),
        &[temp.path().join("old.jpg").display().to_string()]
    );
    assert_eq!(engine.setter_name(), "recording");
}

#[tokio::test]
async fn engine_selection_uses_its_own_rng_and_cache() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("hit.png"), b"x").unwrap();
    let mut engine = engine(temp.path(), Box::new(RecordingSetter::default()));

    let selection = engine
        .select_image(&["https://i.example.com/hit.png".to_string()], &LogProgressSink)
        .await
        .unwrap();
    assert_eq!(selection.origin, SelectionOrigin::CacheHit);
    assert_eq!(engine.cache_dir(), temp.path());
}

#[test]
fn unsupported_setter_surfaces_an_error() {
    let temp = TempDir::new().unwrap();
    let engine = engine(temp.path(), Box::new(UnsupportedSetter::new("haiku")));
    let err = engine.apply(&temp.path().join("x.jpg")).unwrap_err();
    assert!(matches!(err, ApplyError::UnsupportedPlatform(_)));
}
