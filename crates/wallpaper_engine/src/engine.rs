use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    platform_setter, ApplyError, ContentSource, FetchSettings, Fetcher, ImageCache, ImageSelector,
    ListedPost, ProgressSink, RedditSource, ReqwestFetcher, SelectError, Selection, SizePolicy,
    SourceError, SourceSettings, WallpaperSetter,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub cache_dir: PathBuf,
    pub fetch: FetchSettings,
    pub source: SourceSettings,
    pub size_policy: SizePolicy,
}

impl EngineConfig {
    pub fn default_with_cache(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            fetch: FetchSettings::default(),
            source: SourceSettings::default(),
            size_policy: SizePolicy::default(),
        }
    }
}

/// Everything one run needs: content source, selection pipeline, cache and
/// wallpaper setter, plus the single random generator used for every draw.
pub struct Engine {
    source: Box<dyn ContentSource>,
    selector: ImageSelector,
    setter: Box<dyn WallpaperSetter>,
    rng: StdRng,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self::from_parts(
            Box::new(RedditSource::new(config.source)),
            Arc::new(ReqwestFetcher::new(config.fetch)),
            platform_setter(),
            config.cache_dir,
            config.size_policy,
            StdRng::from_entropy(),
        )
    }

    pub fn from_parts(
        source: Box<dyn ContentSource>,
        fetcher: Arc<dyn Fetcher>,
        setter: Box<dyn WallpaperSetter>,
        cache_dir: PathBuf,
        size_policy: SizePolicy,
        rng: StdRng,
    ) -> Self {
        let selector = ImageSelector::new(fetcher, ImageCache::new(cache_dir), size_policy);
        Self {
            source,
            selector,
            setter,
            rng,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        self.selector.cache().dir()
    }

    pub fn setter_name(&self) -> &'static str {
        self.setter.name()
    }

    pub async fn top_posts(
        &self,
        channel: &str,
        window: &str,
    ) -> Result<Vec<ListedPost>, SourceError> {
        self.source.top_posts(channel, window).await
    }

    pub async fn select_image(
        &mut self,
        candidates: &[String],
        sink: &dyn ProgressSink,
    ) -> Result<Selection, SelectError> {
        self.selector
            .select_image(candidates, &mut self.rng, sink)
            .await
    }

    pub fn random_cached_image(&mut self) -> Option<PathBuf> {
        self.selector.cache().random_image(&mut self.rng)
    }

    pub fn apply(&self, path: &Path) -> Result<(), ApplyError> {
        self.setter.apply(path)
    }
}
