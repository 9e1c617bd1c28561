//! Course model

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Represents a course in the institution's course pool
///
/// Identity follows the course id alone: two values with the same id compare
/// equal even if their names, units, or prerequisite lists differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier (e.g., "CS2510")
    pub id: String,

    /// Course name (e.g., "Object-Oriented Design")
    pub name: String,

    /// Credit weight in whole units, always positive
    pub units: u32,

    /// Prerequisite courses attached when the course was assembled
    prerequisites: Vec<Course>,
}

impl Course {
    /// Create a new course with no prerequisites
    ///
    /// # Arguments
    /// * `id` - Course identifier
    /// * `name` - Full course name
    /// * `units` - Credit weight in units
    #[must_use]
    pub const fn new(id: String, name: String, units: u32) -> Self {
        Self {
            id,
            name,
            units,
            prerequisites: Vec::new(),
        }
    }

    /// Attach a prerequisite course, returning `self` for chaining
    ///
    /// Self-references and already-attached prerequisites are ignored.
    #[must_use]
    pub fn with_prerequisite(mut self, prerequisite: &Self) -> Self {
        self.add_prerequisite(prerequisite);
        self
    }

    /// Attach a prerequisite course in place
    ///
    /// Self-references and already-attached prerequisites are ignored.
    pub fn add_prerequisite(&mut self, prerequisite: &Self) {
        if prerequisite.id != self.id && !self.prerequisites.contains(prerequisite) {
            self.prerequisites.push(prerequisite.clone());
        }
    }

    /// Prerequisite courses attached to this course
    #[must_use]
    pub fn prerequisites(&self) -> &[Self] {
        &self.prerequisites
    }

    /// Check if this course has at least one prerequisite
    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
