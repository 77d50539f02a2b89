//! Media delivery: signed playback URLs and token-gated streaming.

mod play_lecture;
mod stream_lecture;

pub use play_lecture::{PlaybackSettings, PlayLectureHandler, PlayResponse};
pub use stream_lecture::{StreamLectureHandler, VideoStream};
