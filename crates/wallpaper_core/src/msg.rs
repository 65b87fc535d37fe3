use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin a run against the given channel and window.
    Start {
        channel: String,
        window: crate::TimeWindow,
    },
    /// Skip the content source and go straight to the cache.
    StartOffline,
    /// Content source returned its ranked posts.
    PostsListed(Vec<crate::PostRecord>),
    /// Content source could not be reached or answered garbage.
    ListingFailed(String),
    /// Selection pipeline produced an image.
    ImageSelected {
        path: PathBuf,
        origin: crate::Origin,
    },
    /// Selection pipeline gave up.
    SelectionFailed(crate::FailureReason),
    /// Result of picking a random cached image.
    CachedImagePicked(Option<PathBuf>),
    WallpaperApplied,
    ApplyFailed(String),
    NoOp,
}
