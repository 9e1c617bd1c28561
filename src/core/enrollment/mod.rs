//! Enrollment rule evaluation
//!
//! Validates a student's requested offerings for one term and commits the
//! request only when every rule passes. Rules run in a fixed order and each
//! rule reports every violation it finds, so one bad request surfaces all of
//! its problems in a single pass:
//!
//! 1. Already-passed courses
//! 2. Missing prerequisites
//! 3. Exam time conflicts
//! 4. Duplicate course requests
//! 5. Unit load against GPA

pub mod violation;

pub use violation::Violation;

use crate::core::models::{Offering, Student};
use crate::{debug, info};

/// Highest unit load any student may request in one term
pub const MAX_UNITS_PER_TERM: u32 = 20;

/// Unit cap for students with a GPA below [`STANDARD_LOAD_GPA`]
pub const REDUCED_LOAD_CAP: u32 = 14;

/// GPA required to request more than [`REDUCED_LOAD_CAP`] units
pub const STANDARD_LOAD_GPA: f64 = 12.0;

/// Unit cap for students with a GPA below [`FULL_LOAD_GPA`]
pub const STANDARD_LOAD_CAP: u32 = 16;

/// GPA required to request more than [`STANDARD_LOAD_CAP`] units
pub const FULL_LOAD_GPA: f64 = 16.0;

/// Outcome of one enrollment evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Violations in rule order, and in candidate order within each rule
    violations: Vec<Violation>,

    /// Whether the request was committed to the student's current term
    committed: bool,
}

impl Evaluation {
    /// Violations found, in rule order
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether the request was committed to the student's current term
    #[must_use]
    pub const fn committed(&self) -> bool {
        self.committed
    }

    /// Check if the request passed every rule
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consume the evaluation and take ownership of the violations
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.committed {
            write!(f, "Request committed with no violations")
        } else {
            writeln!(f, "Request rejected ({} violations):", self.violations.len())?;
            for violation in &self.violations {
                writeln!(f, "  {violation}")?;
            }
            Ok(())
        }
    }
}

/// Evaluate a term enrollment request against every rule, then commit it if
/// clean
///
/// All rules run even after one fails, so the returned evaluation carries
/// every violation the request produces. The commit is all-or-nothing: only
/// a request with zero violations mutates the student, and then every
/// offering is appended to the current term in request order. Evaluation
/// reads nothing but its two arguments, so re-running a rejected request
/// yields the same violations.
#[must_use]
pub fn evaluate(student: &mut Student, offerings: &[Offering]) -> Evaluation {
    debug!(
        "Evaluating {} offering(s) for student {}",
        offerings.len(),
        student.id
    );

    let mut violations = Vec::new();
    violations.extend(check_already_passed(student, offerings));
    violations.extend(check_prerequisites(student, offerings));
    violations.extend(check_exam_time_conflicts(offerings));
    violations.extend(check_duplicate_requests(offerings));
    violations.extend(check_unit_limit(student, offerings));

    let committed = violations.is_empty();

    if committed {
        for offering in offerings {
            student.commit_offering(offering.clone());
        }
        info!(
            "Committed {} offering(s) for student {}",
            offerings.len(),
            student.id
        );
    } else {
        info!(
            "Rejected request for student {}: {} violation(s)",
            student.id,
            violations.len()
        );
        for violation in &violations {
            debug!("  [{}] {violation}", violation.rule_name());
        }
    }

    Evaluation {
        violations,
        committed,
    }
}

/// Evaluate a request but stop at the first violation
///
/// Thin wrapper over [`evaluate`] for callers that only want a yes or no.
/// The commit behavior is unchanged: a clean request is committed, a dirty
/// one leaves the student untouched.
///
/// # Errors
/// Returns the first violation in rule order when the request is rejected.
pub fn evaluate_fail_fast(
    student: &mut Student,
    offerings: &[Offering],
) -> Result<(), Violation> {
    let mut evaluation = evaluate(student, offerings);

    if evaluation.violations.is_empty() {
        Ok(())
    } else {
        Err(evaluation.violations.remove(0))
    }
}

/// Flag requested courses the student has already passed
#[must_use]
pub fn check_already_passed(student: &Student, offerings: &[Offering]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for offering in offerings {
        if student.has_passed(offering.course()) {
            violations.push(Violation::AlreadyPassed {
                course: offering.course().name.clone(),
            });
        }
    }

    violations
}

/// Flag every unpassed prerequisite of every requested course
///
/// A course with several unpassed prerequisites yields one violation per
/// prerequisite.
#[must_use]
pub fn check_prerequisites(student: &Student, offerings: &[Offering]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for offering in offerings {
        for prerequisite in offering.course().prerequisites() {
            if !student.has_passed(prerequisite) {
                violations.push(Violation::MissingPrerequisite {
                    prerequisite: prerequisite.name.clone(),
                    course: offering.course().name.clone(),
                });
            }
        }
    }

    violations
}

/// Flag every ordered pair of distinct offerings that share an exam time
///
/// Pairs are directed, so one clashing pair reports two violations. Offering
/// instances are told apart by identity token, which keeps two offerings of
/// the same course at the same time reportable.
#[must_use]
pub fn check_exam_time_conflicts(offerings: &[Offering]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for first in offerings {
        for second in offerings {
            if first.id() == second.id() {
                continue;
            }

            if first.exam_time() == second.exam_time() {
                violations.push(Violation::ExamTimeConflict {
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
    }

    violations
}

/// Flag every ordered pair of distinct offerings requesting the same course
///
/// Pairs are directed, so one doubled course reports two violations.
#[must_use]
pub fn check_duplicate_requests(offerings: &[Offering]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for first in offerings {
        for second in offerings {
            if first.id() == second.id() {
                continue;
            }

            if first.course() == second.course() {
                violations.push(Violation::DuplicateCourse {
                    course: first.course().name.clone(),
                });
            }
        }
    }

    violations
}

/// Flag a requested unit total the student's GPA does not allow
///
/// The caps: below [`STANDARD_LOAD_GPA`] a student may request up to
/// [`REDUCED_LOAD_CAP`] units, below [`FULL_LOAD_GPA`] up to
/// [`STANDARD_LOAD_CAP`] units, and nobody may exceed
/// [`MAX_UNITS_PER_TERM`]. A student with no graded units yet has no GPA;
/// that satisfies neither GPA gate, so only the absolute cap applies. At
/// most one violation is reported however many caps the total breaks.
#[must_use]
pub fn check_unit_limit(student: &Student, offerings: &[Offering]) -> Vec<Violation> {
    let units_requested: u32 = offerings
        .iter()
        .map(|offering| offering.course().units)
        .sum();
    let gpa = student.gpa();

    let below_standard = gpa.is_some_and(|value| value < STANDARD_LOAD_GPA);
    let below_full = gpa.is_some_and(|value| value < FULL_LOAD_GPA);

    if (below_standard && units_requested > REDUCED_LOAD_CAP)
        || (below_full && units_requested > STANDARD_LOAD_CAP)
        || units_requested > MAX_UNITS_PER_TERM
    {
        return vec![Violation::UnitLimitExceeded {
            units_requested,
            gpa: gpa.unwrap_or(f64::NAN),
        }];
    }

    Vec::new()
}
