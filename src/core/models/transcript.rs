//! Transcript model

use crate::core::models::Course;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum grade at which a course counts as passed, on the 0-20 scale
pub const PASS_GRADE: f64 = 10.0;

/// An academic term under which graded records are grouped
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term {
    /// Term label (e.g., "Fall 2025")
    pub name: String,
}

impl Term {
    /// Create a new term
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self { name }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One graded course record within a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedCourse {
    /// The course the grade was earned in
    pub course: Course,

    /// Grade earned on the 0-20 scale
    pub grade: f64,
}

impl GradedCourse {
    /// Check if the grade meets [`PASS_GRADE`]
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.grade >= PASS_GRADE
    }
}

/// A student's grade history grouped by term
///
/// Each term holds at most one record per course id; recording a course
/// again under the same term replaces the earlier grade. The same course may
/// appear under several terms, as happens when a failed course is retaken.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    records: HashMap<Term, HashMap<String, GradedCourse>>,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Record a grade for a course under a term
    ///
    /// Re-recording a course already present in the term replaces its grade.
    pub fn add_record(&mut self, course: Course, term: Term, grade: f64) {
        self.records
            .entry(term)
            .or_default()
            .insert(course.id.clone(), GradedCourse { course, grade });
    }

    /// Check if any term holds a passing grade for the course
    #[must_use]
    pub fn has_passed(&self, course: &Course) -> bool {
        self.records
            .values()
            .flat_map(HashMap::values)
            .any(|record| record.course == *course && record.is_passing())
    }

    /// Grade point average over every graded unit, weighted by course units
    ///
    /// # Returns
    /// `None` when the transcript holds no graded units, since the average is
    /// undefined without a divisor.
    #[must_use]
    pub fn gpa(&self) -> Option<f64> {
        let mut grade_points = 0.0;
        let mut total_units = 0u32;

        for record in self.records.values().flat_map(HashMap::values) {
            grade_points += record.grade * f64::from(record.course.units);
            total_units += record.course.units;
        }

        if total_units == 0 {
            None
        } else {
            Some(grade_points / f64::from(total_units))
        }
    }

    /// Look up the recorded grade for a course id under a term
    #[must_use]
    pub fn record(&self, term: &Term, course_id: &str) -> Option<&GradedCourse> {
        self.records
            .get(term)
            .and_then(|entries| entries.get(course_id))
    }

    /// Check if the transcript holds no records at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of terms with at least one record
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.records.len()
    }
}

impl std::fmt::Display for Transcript {
    /// Formats terms and the courses within them in sorted order
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Transcript ({} terms):", self.records.len())?;

        let mut terms: Vec<&Term> = self.records.keys().collect();
        terms.sort();

        for term in terms {
            let entries = &self.records[term];
            let mut course_ids: Vec<&String> = entries.keys().collect();
            course_ids.sort();

            let line = course_ids
                .iter()
                .map(|id| format!("{} {:.1}", id, entries[*id].grade))
                .collect::<Vec<_>>()
                .join(", ");

            writeln!(f, "  {term}: {line}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, units: u32) -> Course {
        Course::new(id.to_string(), format!("{id} name"), units)
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new();

        assert!(transcript.is_empty());
        assert_eq!(transcript.term_count(), 0);
        assert!(transcript.gpa().is_none());
    }

    #[test]
    fn test_has_passed_at_boundary() {
        let mut transcript = Transcript::new();
        let term = Term::new("t1".to_string());

        transcript.add_record(course("MATH1341", 3), term.clone(), 10.0);
        transcript.add_record(course("PHYS1151", 3), term, 9.99);

        assert!(transcript.has_passed(&course("MATH1341", 3)));
        assert!(!transcript.has_passed(&course("PHYS1151", 3)));
    }

    #[test]
    fn test_has_passed_ignores_term() {
        let mut transcript = Transcript::new();

        transcript.add_record(course("CS2500", 4), Term::new("t1".to_string()), 7.0);
        transcript.add_record(course("CS2500", 4), Term::new("t2".to_string()), 13.0);

        assert!(transcript.has_passed(&course("CS2500", 4)));
    }

    #[test]
    fn test_rerecording_replaces_grade() {
        let mut transcript = Transcript::new();
        let term = Term::new("t1".to_string());

        transcript.add_record(course("CS2500", 4), term.clone(), 8.0);
        transcript.add_record(course("CS2500", 4), term.clone(), 12.0);

        let record = transcript.record(&term, "CS2500");
        assert!(record.is_some_and(|entry| (entry.grade - 12.0).abs() < f64::EPSILON));
        assert_eq!(transcript.term_count(), 1);
    }

    #[test]
    fn test_gpa_weights_by_units() {
        let mut transcript = Transcript::new();
        let term = Term::new("t1".to_string());

        transcript.add_record(course("CS2500", 4), term.clone(), 16.0);
        transcript.add_record(course("PHIL1101", 2), term, 10.0);

        // (16 * 4 + 10 * 2) / 6 = 14
        let gpa = transcript.gpa();
        assert!(gpa.is_some_and(|value| (value - 14.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_gpa_spans_terms() {
        let mut transcript = Transcript::new();

        transcript.add_record(course("MATH1341", 3), Term::new("t1".to_string()), 9.0);
        transcript.add_record(course("PHYS1151", 3), Term::new("t2".to_string()), 15.0);

        let gpa = transcript.gpa();
        assert!(gpa.is_some_and(|value| (value - 12.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_display_sorts_terms_and_courses() {
        let mut transcript = Transcript::new();

        transcript.add_record(course("PHYS1151", 3), Term::new("t2".to_string()), 11.0);
        transcript.add_record(course("MATH1341", 3), Term::new("t1".to_string()), 12.5);
        transcript.add_record(course("CS2500", 4), Term::new("t1".to_string()), 14.0);

        let output = transcript.to_string();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Transcript (2 terms):");
        assert_eq!(lines[1], "  t1: CS2500 14.0, MATH1341 12.5");
        assert_eq!(lines[2], "  t2: PHYS1151 11.0");
    }
}
