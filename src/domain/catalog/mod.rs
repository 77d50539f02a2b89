//! Course and lecture read models.
//!
//! The enrollment engine consumes these from the catalog; editing them is a
//! separate concern outside this core.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, LectureId, OrganizationId, Timestamp};

/// A course as seen by the enrollment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,

    /// Owning tenant. Courses without an organization are platform-wide.
    pub organization_id: Option<OrganizationId>,

    pub title: String,

    pub description: Option<String>,

    /// Difficulty label shown to students.
    pub level: String,

    /// Price in whole currency units. Zero means the course is free.
    pub price: i64,

    pub created_at: Timestamp,
}

impl Course {
    /// Returns true if enrollment requires payment.
    pub fn requires_payment(&self) -> bool {
        self.price > 0
    }

    /// Returns true if the course is visible to a member of the given tenant.
    ///
    /// A caller without an organization sees everything; a caller with one
    /// only sees courses of that organization.
    pub fn visible_to(&self, organization_id: Option<&OrganizationId>) -> bool {
        match organization_id {
            Some(org) => self.organization_id.as_ref() == Some(org),
            None => true,
        }
    }
}

/// A lecture as seen by the progress tracker and media delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub id: LectureId,

    pub course_id: CourseId,

    pub title: String,

    /// Storage key of the uploaded video, if any.
    pub video_key: Option<String>,

    /// Total playback length in seconds. Zero when unknown.
    pub duration_secs: i64,

    /// Ordering within the course.
    pub order_index: i32,
}
