//! Media delivery: signed video access tokens.

mod video_token;

pub use video_token::{VideoTokenClaims, VideoTokenService};
