//! Progress tracking: telemetry reports, explicit completion, and the
//! course completion check.

mod complete_course;
mod mark_lecture_complete;
mod record_progress;

pub use complete_course::CourseCompletionHandler;
pub use mark_lecture_complete::{MarkLectureCompleteCommand, MarkLectureCompleteHandler};
pub use record_progress::{RecordProgressCommand, RecordProgressHandler};
