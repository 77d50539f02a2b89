//! Per-lecture watch progress for a student.

use crate::domain::foundation::{LectureId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Watch state for one (student, lecture) pair.
///
/// # Invariants
///
/// - `watched_seconds` never decreases; a lower report is clamped
/// - `completed` never reverts once true
/// - `completed_at` is set on the first completion only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureProgress {
    pub id: Uuid,

    pub student_id: UserId,

    pub lecture_id: LectureId,

    pub watched_seconds: i64,

    pub completed: bool,

    pub completed_at: Option<Timestamp>,

    pub updated_at: Timestamp,
}

impl LectureProgress {
    /// Creates an empty progress record.
    pub fn new(student_id: UserId, lecture_id: LectureId) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            lecture_id,
            watched_seconds: 0,
            completed: false,
            completed_at: None,
            updated_at: Timestamp::now(),
        }
    }

    /// Applies a playback telemetry report.
    ///
    /// The stored value is `max(existing, reported)` so a stale or replayed
    /// report can never lose progress. Completion triggers when the lecture
    /// has a known duration and watched time reaches it.
    pub fn record(&mut self, reported_seconds: i64, lecture_duration_secs: i64) {
        self.watched_seconds = self.watched_seconds.max(reported_seconds);
        if lecture_duration_secs > 0 && self.watched_seconds >= lecture_duration_secs {
            self.mark_completed();
        }
        self.updated_at = Timestamp::now();
    }

    /// Explicit "I finished" override, independent of playback telemetry.
    pub fn force_complete(&mut self, lecture_duration_secs: i64) {
        self.watched_seconds = self.watched_seconds.max(lecture_duration_secs);
        self.mark_completed();
        self.updated_at = Timestamp::now();
    }

    fn mark_completed(&mut self) {
        if !self.completed {
            self.completed = true;
            self.completed_at = Some(Timestamp::now());
        }
    }
}
