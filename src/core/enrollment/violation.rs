//! Enrollment rule violations

use serde::Serialize;
use thiserror::Error;

/// One broken enrollment rule, described as data
///
/// A violation never aborts an evaluation; the engine gathers every
/// violation a request produces and callers branch on whether the collection
/// is empty. The `Display` text is the registrar-facing wording.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum Violation {
    /// The requested course already carries a passing grade
    #[error("The student has already passed {course}")]
    AlreadyPassed {
        /// Name of the already-passed course
        course: String,
    },

    /// A prerequisite of the requested course has no passing grade
    #[error("The student has not passed {prerequisite} as a prerequisite of {course}")]
    MissingPrerequisite {
        /// Name of the unpassed prerequisite
        prerequisite: String,

        /// Name of the course that requires it
        course: String,
    },

    /// Two requested offerings share an exam time
    #[error("Two offerings {first} and {second} have the same exam time")]
    ExamTimeConflict {
        /// Display form of the first offering
        first: String,

        /// Display form of the second offering
        second: String,
    },

    /// The same course was requested more than once
    #[error("{course} is requested to be taken twice")]
    DuplicateCourse {
        /// Name of the doubly-requested course
        course: String,
    },

    /// The requested unit total exceeds what the student's GPA allows
    #[error("Number of units ({units_requested}) requested does not match GPA of {gpa}")]
    UnitLimitExceeded {
        /// Total units across the candidate offerings
        units_requested: u32,

        /// The student's GPA, or NaN when no graded units exist yet
        gpa: f64,
    },
}

impl Violation {
    /// Short rule label used in log lines
    #[must_use]
    pub const fn rule_name(&self) -> &'static str {
        match self {
            Self::AlreadyPassed { .. } => "already-passed",
            Self::MissingPrerequisite { .. } => "missing-prerequisite",
            Self::ExamTimeConflict { .. } => "exam-time-conflict",
            Self::DuplicateCourse { .. } => "duplicate-course",
            Self::UnitLimitExceeded { .. } => "unit-limit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_passed_message() {
        let violation = Violation::AlreadyPassed {
            course: "Calculus 1".to_string(),
        };

        assert_eq!(
            violation.to_string(),
            "The student has already passed Calculus 1"
        );
    }

    #[test]
    fn test_missing_prerequisite_message() {
        let violation = Violation::MissingPrerequisite {
            prerequisite: "Calculus 1".to_string(),
            course: "Calculus 2".to_string(),
        };

        assert_eq!(
            violation.to_string(),
            "The student has not passed Calculus 1 as a prerequisite of Calculus 2"
        );
    }

    #[test]
    fn test_exam_time_conflict_message() {
        let violation = Violation::ExamTimeConflict {
            first: "PHYS1151 [09:00]".to_string(),
            second: "MATH1341 [09:00]".to_string(),
        };

        assert_eq!(
            violation.to_string(),
            "Two offerings PHYS1151 [09:00] and MATH1341 [09:00] have the same exam time"
        );
    }

    #[test]
    fn test_duplicate_course_message() {
        let violation = Violation::DuplicateCourse {
            course: "Physics 1".to_string(),
        };

        assert_eq!(
            violation.to_string(),
            "Physics 1 is requested to be taken twice"
        );
    }

    #[test]
    fn test_unit_limit_message() {
        let violation = Violation::UnitLimitExceeded {
            units_requested: 15,
            gpa: 11.0,
        };

        assert_eq!(
            violation.to_string(),
            "Number of units (15) requested does not match GPA of 11"
        );
    }

    #[test]
    fn test_rule_names() {
        let violation = Violation::DuplicateCourse {
            course: "Physics 1".to_string(),
        };

        assert_eq!(violation.rule_name(), "duplicate-course");
    }
}
