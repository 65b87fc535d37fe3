//! Wallpaper core: pure run state machine, post records and the image resolver.
mod effect;
mod msg;
mod post;
mod resolve;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use post::{ParseTimeWindowError, PostRecord, TimeWindow, DEFAULT_CHANNEL};
pub use resolve::{has_image_extension, resolve, ImageResolver, IMAGE_EXTENSIONS};
pub use state::{FailureReason, Origin, Phase, RunState};
pub use update::update;
pub use view_model::RunReport;
