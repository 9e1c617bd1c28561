//! Student model

use crate::core::models::{Course, Offering, Term, Transcript};

/// Represents a student: a transcript of finished work plus the offerings
/// committed for the current term
#[derive(Debug, Clone)]
pub struct Student {
    /// Student identifier (e.g., "002132772")
    pub id: String,

    /// Student display name
    pub name: String,

    /// Grade history grouped by term
    transcript: Transcript,

    /// Offerings committed for the current term, in commit order
    current_term: Vec<Offering>,
}

impl Student {
    /// Create a student with an empty transcript and no committed offerings
    #[must_use]
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            transcript: Transcript::new(),
            current_term: Vec::new(),
        }
    }

    /// Record a grade for a course under a term
    pub fn add_transcript_record(&mut self, course: Course, term: Term, grade: f64) {
        self.transcript.add_record(course, term, grade);
    }

    /// Check if the transcript holds a passing grade for the course
    #[must_use]
    pub fn has_passed(&self, course: &Course) -> bool {
        self.transcript.has_passed(course)
    }

    /// Grade point average over the student's graded units
    ///
    /// # Returns
    /// `None` when no graded units exist yet.
    #[must_use]
    pub fn gpa(&self) -> Option<f64> {
        self.transcript.gpa()
    }

    /// Read access to the full transcript
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Append an offering to the student's current term
    ///
    /// Rule checking lives in the enrollment engine; this records the outcome
    /// of an approved request and does no checking of its own.
    pub fn commit_offering(&mut self, offering: Offering) {
        self.current_term.push(offering);
    }

    /// Offerings committed for the current term, in commit order
    #[must_use]
    pub fn current_term(&self) -> &[Offering] {
        &self.current_term
    }

    /// Check if an offering of the given course is already committed
    #[must_use]
    pub fn is_taking(&self, course: &Course) -> bool {
        self.current_term
            .iter()
            .any(|offering| offering.course() == course)
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, units: u32) -> Course {
        Course::new(id.to_string(), format!("{id} name"), units)
    }

    #[test]
    fn test_new_student_is_blank() {
        let student = Student::new("1".to_string(), "Dana".to_string());

        assert!(student.transcript().is_empty());
        assert!(student.current_term().is_empty());
        assert!(student.gpa().is_none());
    }

    #[test]
    fn test_transcript_records_flow_through() {
        let mut student = Student::new("1".to_string(), "Dana".to_string());
        let math = course("MATH1341", 3);

        student.add_transcript_record(math.clone(), Term::new("t1".to_string()), 16.0);

        assert!(student.has_passed(&math));
        assert!(student.gpa().is_some_and(|value| (value - 16.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_commit_keeps_order() {
        let mut student = Student::new("1".to_string(), "Dana".to_string());
        let math = Offering::new(course("MATH1341", 3), "09:00".to_string());
        let phys = Offering::new(course("PHYS1151", 3), "11:00".to_string());

        student.commit_offering(math.clone());
        student.commit_offering(phys.clone());

        let committed: Vec<_> = student.current_term().iter().map(Offering::id).collect();
        assert_eq!(committed, vec![math.id(), phys.id()]);
    }

    #[test]
    fn test_is_taking_matches_by_course() {
        let mut student = Student::new("1".to_string(), "Dana".to_string());
        let math = course("MATH1341", 3);

        assert!(!student.is_taking(&math));

        student.commit_offering(Offering::new(math.clone(), "09:00".to_string()));

        assert!(student.is_taking(&math));
        assert!(!student.is_taking(&course("PHYS1151", 3)));
    }

    #[test]
    fn test_display_shows_name_and_id() {
        let student = Student::new("002132772".to_string(), "Dana".to_string());
        assert_eq!(student.to_string(), "Dana (002132772)");
    }
}
