use std::path::PathBuf;

use crate::TimeWindow;

/// Side effects requested by [`crate::update`]; executed by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListTopPosts { channel: String, window: TimeWindow },
    SelectImage { candidates: Vec<String> },
    PickCachedImage,
    ApplyWallpaper { path: PathBuf },
}
