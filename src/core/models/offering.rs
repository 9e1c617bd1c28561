//! Offering model

use crate::core::models::Course;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh offering identity tokens, shared process-wide
static NEXT_OFFERING_ID: AtomicU64 = AtomicU64::new(0);

/// Identity token for a single offering instance
///
/// Fresh tokens come from [`Offering::new`] only. Clones keep the token of
/// the instance they came from, so aliases of one offering stay
/// distinguishable from equal-looking but separately created offerings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfferingId(u64);

impl OfferingId {
    fn next() -> Self {
        Self(NEXT_OFFERING_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw token value
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OfferingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "o{}", self.0)
    }
}

/// One schedulable instance of a course: the course paired with an exam time
///
/// The same course may be offered several times in a term. Exam times are
/// opaque labels compared only for equality; nothing here parses them.
/// Equality follows the identity token, not the course or exam time.
#[derive(Debug, Clone)]
pub struct Offering {
    id: OfferingId,
    course: Course,
    exam_time: String,
}

impl Offering {
    /// Create an offering with a freshly generated identity token
    #[must_use]
    pub fn new(course: Course, exam_time: String) -> Self {
        Self {
            id: OfferingId::next(),
            course,
            exam_time,
        }
    }

    /// Identity token of this offering instance
    #[must_use]
    pub const fn id(&self) -> OfferingId {
        self.id
    }

    /// The course this offering schedules
    #[must_use]
    pub const fn course(&self) -> &Course {
        &self.course
    }

    /// Exam time label
    #[must_use]
    pub fn exam_time(&self) -> &str {
        &self.exam_time
    }
}

impl PartialEq for Offering {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Offering {}

impl std::fmt::Display for Offering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.course.id, self.exam_time)
    }
}
