//! Wallpaper engine: content source, download pipeline, local cache and
//! wallpaper appliers.
mod apply;
mod cache;
mod engine;
mod fetch;
mod filename;
mod listing;
mod persist;
mod probe;
mod select;
mod types;

pub use apply::{platform_setter, ApplyError, GnomeSetter, UnsupportedSetter, WallpaperSetter};
#[cfg(windows)]
pub use apply::WindowsSetter;
pub use cache::{is_image_file_name, ImageCache, CACHE_IMAGE_EXTENSIONS};
pub use engine::{Engine, EngineConfig};
pub use fetch::{FetchSettings, Fetcher, LogProgressSink, ProgressSink, ReqwestFetcher};
pub use filename::cache_file_name;
pub use listing::{ContentSource, ListedPost, RedditSource, SourceError, SourceSettings, TOP_LIMIT};
pub use persist::{ensure_output_dir, AtomicFileWriter, PartialFile, PersistError};
pub use probe::{image_dimensions, ProbeError, SizePolicy, MIN_WALLPAPER_WIDTH};
pub use select::{ImageSelector, Rejection, SelectError, Selection, SelectionOrigin};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, Stage};
