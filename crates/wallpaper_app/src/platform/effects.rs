use engine_logging::{engine_info, engine_warn};
use wallpaper_core::{Effect, FailureReason, Msg, Origin, PostRecord};
use wallpaper_engine::{Engine, ListedPost, LogProgressSink, SelectError, SelectionOrigin};

/// Executes core effects against the engine and reports each result as a message.
pub struct EffectRunner {
    engine: Engine,
    sink: LogProgressSink,
}

impl EffectRunner {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            sink: LogProgressSink,
        }
    }

    pub async fn run(&mut self, effect: Effect) -> Msg {
        match effect {
            Effect::ListTopPosts { channel, window } => {
                match self.engine.top_posts(&channel, window.as_str()).await {
                    Ok(posts) => {
                        engine_info!(
                            "Listed {} top posts of the {} from r/{}",
                            posts.len(),
                            window,
                            channel
                        );
                        Msg::PostsListed(posts.into_iter().map(map_post).collect())
                    }
                    Err(err) => {
                        engine_warn!("{}", err);
                        Msg::ListingFailed(err.to_string())
                    }
                }
            }
            Effect::SelectImage { candidates } => {
                engine_info!(
                    "Trying {} candidates, cache at {:?}",
                    candidates.len(),
                    self.engine.cache_dir()
                );
                match self.engine.select_image(&candidates, &self.sink).await {
                    Ok(selection) => Msg::ImageSelected {
                        path: selection.path,
                        origin: map_origin(selection.origin),
                    },
                    Err(err) => {
                        engine_warn!("Selection failed: {}", err);
                        Msg::SelectionFailed(map_select_error(err))
                    }
                }
            }
            Effect::PickCachedImage => {
                let picked = self.engine.random_cached_image();
                match &picked {
                    Some(path) => engine_info!("Falling back to cached {:?}", path),
                    None => engine_warn!("No cached images in {:?}", self.engine.cache_dir()),
                }
                Msg::CachedImagePicked(picked)
            }
            Effect::ApplyWallpaper { path } => match self.engine.apply(&path) {
                Ok(()) => {
                    engine_info!("Applied {:?} via {}", path, self.engine.setter_name());
                    Msg::WallpaperApplied
                }
                Err(err) => {
                    engine_warn!("Applying {:?} failed: {}", path, err);
                    Msg::ApplyFailed(err.to_string())
                }
            },
        }
    }
}

fn map_post(post: ListedPost) -> PostRecord {
    PostRecord {
        url: post.url,
        score: post.score,
        title: post.title,
    }
}

fn map_origin(origin: SelectionOrigin) -> Origin {
    match origin {
        SelectionOrigin::Downloaded => Origin::Downloaded,
        SelectionOrigin::CacheHit => Origin::CacheHit,
    }
}

fn map_select_error(err: SelectError) -> FailureReason {
    match err {
        SelectError::NoCandidates => FailureReason::NoCandidates,
        SelectError::NoQualifyingImage { attempts } => {
            FailureReason::NoQualifyingImage { attempts }
        }
    }
}
