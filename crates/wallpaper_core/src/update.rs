use crate::{resolve, Effect, FailureReason, Msg, Origin, Phase, RunState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not belong to the current phase are ignored.
pub fn update(mut state: RunState, msg: Msg) -> (RunState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (Phase::Idle, Msg::Start { channel, window }) => {
            state.start(channel.clone(), window);
            vec![Effect::ListTopPosts { channel, window }]
        }
        (Phase::Idle, Msg::StartOffline) => {
            state.fall_back(FailureReason::Offline);
            vec![Effect::PickCachedImage]
        }
        (Phase::Listing, Msg::PostsListed(posts)) => {
            let candidates = resolve(&posts);
            if candidates.is_empty() {
                state.fall_back(FailureReason::NoCandidates);
                vec![Effect::PickCachedImage]
            } else {
                state.begin_selection(candidates.len());
                vec![Effect::SelectImage { candidates }]
            }
        }
        (Phase::Listing, Msg::ListingFailed(message)) => {
            state.fall_back(FailureReason::SourceUnavailable(message));
            vec![Effect::PickCachedImage]
        }
        (Phase::Selecting, Msg::ImageSelected { path, origin }) => {
            state.begin_apply(path.clone(), origin);
            vec![Effect::ApplyWallpaper { path }]
        }
        (Phase::Selecting, Msg::SelectionFailed(reason)) => {
            state.fall_back(reason);
            vec![Effect::PickCachedImage]
        }
        (Phase::FallingBack, Msg::CachedImagePicked(Some(path))) => {
            state.begin_apply(path.clone(), Origin::Fallback);
            vec![Effect::ApplyWallpaper { path }]
        }
        (Phase::FallingBack, Msg::CachedImagePicked(None)) => {
            state.finish_not_changed(FailureReason::CacheEmpty);
            Vec::new()
        }
        (Phase::Applying, Msg::WallpaperApplied) => {
            state.finish_applied();
            Vec::new()
        }
        (Phase::Applying, Msg::ApplyFailed(message)) => {
            state.finish_not_changed(FailureReason::ApplyFailed(message));
            Vec::new()
        }
        _ => Vec::new(),
    };

    (state, effects)
}
