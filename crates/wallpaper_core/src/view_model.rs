use std::path::PathBuf;

use crate::{FailureReason, Origin, Phase, TimeWindow};

/// Snapshot of a run, rendered as the single status line the CLI prints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub phase: Phase,
    pub channel: String,
    pub window: TimeWindow,
    pub candidate_count: usize,
    pub selected: Option<PathBuf>,
    pub origin: Option<Origin>,
    pub fallback_reason: Option<FailureReason>,
    pub failure: Option<FailureReason>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.phase == Phase::Applied
    }

    pub fn status_line(&self) -> String {
        match (self.phase, self.selected.as_ref(), self.origin) {
            (Phase::Applied, Some(path), Some(Origin::Downloaded)) => format!(
                "Wallpaper set to {} (top of the {} on r/{})",
                path.display(),
                self.window,
                self.channel
            ),
            (Phase::Applied, Some(path), Some(Origin::CacheHit)) => {
                format!("Wallpaper set to {} (already cached)", path.display())
            }
            (Phase::Applied, Some(path), _) => match &self.fallback_reason {
                Some(reason) => format!(
                    "Wallpaper set to {} from cache: {reason}",
                    path.display()
                ),
                None => format!("Wallpaper set to {} from cache", path.display()),
            },
            (Phase::NotChanged, _, _) => {
                let failure = self
                    .failure
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown failure".to_string());
                match (&self.failure, &self.fallback_reason) {
                    (Some(FailureReason::CacheEmpty), Some(before)) => {
                        format!("Wallpaper not changed: {before}; {failure}")
                    }
                    _ => format!("Wallpaper not changed: {failure}"),
                }
            }
            _ => "Wallpaper not changed: run did not finish".to_string(),
        }
    }
}
