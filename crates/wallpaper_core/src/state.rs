use std::fmt;
use std::path::PathBuf;

use crate::view_model::RunReport;
use crate::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Listing,
    Selecting,
    FallingBack,
    Applying,
    Applied,
    NotChanged,
}

/// Where the applied image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Downloaded,
    CacheHit,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    SourceUnavailable(String),
    NoCandidates,
    NoQualifyingImage { attempts: usize },
    Offline,
    CacheEmpty,
    ApplyFailed(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::SourceUnavailable(msg) => {
                write!(f, "content source unavailable ({msg})")
            }
            FailureReason::NoCandidates => write!(f, "no image posts found"),
            FailureReason::NoQualifyingImage { attempts } => {
                write!(f, "none of {attempts} candidates was wide enough")
            }
            FailureReason::Offline => write!(f, "offline mode"),
            FailureReason::CacheEmpty => write!(f, "no cached images to fall back on"),
            FailureReason::ApplyFailed(msg) => write!(f, "could not apply wallpaper ({msg})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunState {
    phase: Phase,
    channel: String,
    window: TimeWindow,
    candidate_count: usize,
    fallback_reason: Option<FailureReason>,
    failure: Option<FailureReason>,
    selected: Option<(PathBuf, Origin)>,
    dirty: bool,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            phase: self.phase,
            channel: self.channel.clone(),
            window: self.window,
            candidate_count: self.candidate_count,
            selected: self.selected.as_ref().map(|(path, _)| path.clone()),
            origin: self.selected.as_ref().map(|(_, origin)| *origin),
            fallback_reason: self.fallback_reason.clone(),
            failure: self.failure.clone(),
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn start(&mut self, channel: String, window: TimeWindow) {
        self.channel = channel;
        self.window = window;
        self.set_phase(Phase::Listing);
    }

    pub(crate) fn begin_selection(&mut self, candidate_count: usize) {
        self.candidate_count = candidate_count;
        self.set_phase(Phase::Selecting);
    }

    pub(crate) fn fall_back(&mut self, reason: FailureReason) {
        self.fallback_reason = Some(reason);
        self.set_phase(Phase::FallingBack);
    }

    pub(crate) fn begin_apply(&mut self, path: PathBuf, origin: Origin) {
        self.selected = Some((path, origin));
        self.set_phase(Phase::Applying);
    }

    pub(crate) fn finish_applied(&mut self) {
        self.set_phase(Phase::Applied);
    }

    pub(crate) fn finish_not_changed(&mut self, reason: FailureReason) {
        self.failure = Some(reason);
        self.set_phase(Phase::NotChanged);
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.dirty = true;
    }
}
