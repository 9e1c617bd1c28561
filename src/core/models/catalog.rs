//! Course catalog with prerequisite wiring and graph validation

use crate::core::models::Course;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// Errors raised while wiring or validating a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A lookup or edge named a course id that is not registered
    #[error("Course '{0}' not found in catalog")]
    UnknownCourse(String),

    /// An edge named a prerequisite id that is not registered
    #[error("Course '{course}' lists unknown prerequisite '{prerequisite}'")]
    UnknownPrerequisite {
        /// Course the edge was being wired for
        course: String,

        /// The unregistered prerequisite id
        prerequisite: String,
    },

    /// A course was wired as its own prerequisite
    #[error("Course '{0}' cannot be its own prerequisite")]
    SelfPrerequisite(String),

    /// The prerequisite graph contains a cycle
    #[error("Cycle detected in prerequisite graph")]
    PrerequisiteCycle,
}

/// Registry of courses and the prerequisite edges between them
///
/// Courses register bare; edges are wired by id afterward and checked for
/// referential integrity as they arrive. Acyclicity is checked by
/// [`Catalog::validate`] and by [`Catalog::materialize`], which assembles a
/// `Course` value with its full prerequisite chain attached.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Registered courses keyed by course id
    courses: HashMap<String, Course>,

    /// Prerequisite ids keyed by dependent course id
    prerequisites: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            courses: HashMap::new(),
            prerequisites: HashMap::new(),
        }
    }

    /// Register a course under its id
    ///
    /// Prerequisites already attached to the value are not read; edges are
    /// wired through [`Catalog::add_prerequisite`].
    ///
    /// # Returns
    /// `true` if the course was added, `false` if the id was already taken
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.courses.contains_key(&course.id) {
            return false;
        }

        self.courses.insert(course.id.clone(), course);
        true
    }

    /// Wire a prerequisite edge between two registered courses
    ///
    /// Repeated edges are ignored.
    ///
    /// # Errors
    /// Returns an error when either id is unregistered or the edge would make
    /// a course its own prerequisite.
    pub fn add_prerequisite(
        &mut self,
        course_id: &str,
        prerequisite_id: &str,
    ) -> Result<(), CatalogError> {
        if course_id == prerequisite_id {
            return Err(CatalogError::SelfPrerequisite(course_id.to_string()));
        }

        if !self.courses.contains_key(course_id) {
            return Err(CatalogError::UnknownCourse(course_id.to_string()));
        }

        if !self.courses.contains_key(prerequisite_id) {
            return Err(CatalogError::UnknownPrerequisite {
                course: course_id.to_string(),
                prerequisite: prerequisite_id.to_string(),
            });
        }

        let edges = self.prerequisites.entry(course_id.to_string()).or_default();
        if !edges.iter().any(|existing| existing == prerequisite_id) {
            edges.push(prerequisite_id.to_string());
        }

        Ok(())
    }

    /// Look up a registered course by id
    #[must_use]
    pub fn get_course(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Check if a course id is registered
    #[must_use]
    pub fn contains_course(&self, id: &str) -> bool {
        self.courses.contains_key(id)
    }

    /// All registered courses sorted by id
    #[must_use]
    pub fn courses(&self) -> Vec<&Course> {
        let mut all: Vec<&Course> = self.courses.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Number of registered courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Prerequisite ids wired for a course, if any were added
    #[must_use]
    pub fn prerequisites_of(&self, course_id: &str) -> Option<&Vec<String>> {
        self.prerequisites.get(course_id)
    }

    /// Check that the prerequisite graph is acyclic
    ///
    /// Referential integrity is enforced edge by edge in
    /// [`Catalog::add_prerequisite`], so cycles are the only defect left to
    /// catch here.
    ///
    /// # Errors
    /// Returns [`CatalogError::PrerequisiteCycle`] when the graph contains a
    /// cycle.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let _ = self.topological_order()?;
        Ok(())
    }

    /// Assemble a registered course with its full prerequisite chain attached
    ///
    /// Prerequisites are materialized first, so nested chains carry all the
    /// way down.
    ///
    /// # Errors
    /// Returns an error when the id is unregistered or the graph contains a
    /// cycle.
    pub fn materialize(&self, course_id: &str) -> Result<Course, CatalogError> {
        if !self.courses.contains_key(course_id) {
            return Err(CatalogError::UnknownCourse(course_id.to_string()));
        }

        let order = self.topological_order()?;
        let mut built: HashMap<String, Course> = HashMap::new();

        for id in &order {
            let registered = &self.courses[id];
            let mut course = Course::new(
                registered.id.clone(),
                registered.name.clone(),
                registered.units,
            );

            if let Some(edges) = self.prerequisites.get(id) {
                for prerequisite_id in edges {
                    let prerequisite = built.get(prerequisite_id).ok_or_else(|| {
                        CatalogError::UnknownPrerequisite {
                            course: id.clone(),
                            prerequisite: prerequisite_id.clone(),
                        }
                    })?;

                    course.add_prerequisite(prerequisite);
                }
            }

            built.insert(id.clone(), course);
        }

        built
            .remove(course_id)
            .ok_or_else(|| CatalogError::UnknownCourse(course_id.to_string()))
    }

    /// Compute a topological ordering of course ids using Kahn's algorithm
    ///
    /// Edges run from prerequisite to dependent, so every course appears
    /// after all of its prerequisites.
    ///
    /// # Errors
    /// Returns [`CatalogError::PrerequisiteCycle`] if no complete ordering
    /// exists.
    fn topological_order(&self) -> Result<Vec<String>, CatalogError> {
        let outgoing = self.build_outgoing_edges();
        let mut indegree = self.build_indegree_counts();

        let mut roots: Vec<&String> = self
            .courses
            .keys()
            .filter(|id| indegree.get(*id).copied().unwrap_or(0) == 0)
            .collect();
        roots.sort();

        let mut queue: VecDeque<String> = roots.into_iter().cloned().collect();
        let mut order = Vec::with_capacity(self.courses.len());

        while let Some(id) = queue.pop_front() {
            order.push(id.clone());

            if let Some(dependents) = outgoing.get(&id) {
                for dependent in dependents {
                    let entry = indegree
                        .get_mut(dependent)
                        .ok_or_else(|| CatalogError::UnknownCourse(dependent.clone()))?;

                    if *entry > 0 {
                        *entry -= 1;
                    }

                    if *entry == 0 {
                        queue.push_back(dependent.clone());
                    }
                }
            }
        }

        if order.len() != self.courses.len() {
            return Err(CatalogError::PrerequisiteCycle);
        }

        Ok(order)
    }

    /// Build dependent edges: prerequisite id to the courses requiring it
    fn build_outgoing_edges(&self) -> HashMap<String, Vec<String>> {
        let mut outgoing: HashMap<String, Vec<String>> = HashMap::new();

        for (course_id, prerequisite_ids) in &self.prerequisites {
            for prerequisite_id in prerequisite_ids {
                outgoing
                    .entry(prerequisite_id.clone())
                    .or_default()
                    .push(course_id.clone());
            }
        }

        for dependents in outgoing.values_mut() {
            dependents.sort();
        }

        outgoing
    }

    /// Count incoming prerequisite edges per course id
    ///
    /// Edge lists are deduplicated at insert, so the list length is the
    /// in-degree.
    fn build_indegree_counts(&self) -> HashMap<String, usize> {
        self.courses
            .keys()
            .map(|id| {
                let count = self.prerequisites.get(id).map_or(0, Vec::len);
                (id.clone(), count)
            })
            .collect()
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Catalog ({} courses):", self.courses.len())?;

        for course in self.courses() {
            match self.prerequisites.get(&course.id) {
                Some(edges) if !edges.is_empty() => {
                    let mut sorted = edges.clone();
                    sorted.sort();
                    writeln!(f, "  {} → {}", course.id, sorted.join(", "))?;
                }
                _ => writeln!(f, "  {} → (no prerequisites)", course.id)?,
            }
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

    fn chain_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_course(course("CS2500", 4));
        catalog.add_course(course("CS2510", 4));
        catalog.add_course(course("CS3500", 4));
        catalog
            .add_prerequisite("CS2510", "CS2500")
            .expect("edge should wire");
        catalog
            .add_prerequisite("CS3500", "CS2510")
            .expect("edge should wire");
        catalog
    }

    #[test]
    fn test_add_course_rejects_duplicate_id() {
        let mut catalog = Catalog::new();

        assert!(catalog.add_course(course("CS2500", 4)));
        assert!(!catalog.add_course(course("CS2500", 3)));
        assert_eq!(catalog.course_count(), 1);

        // The first registration wins
        assert!(catalog.contains_course("CS2500"));
        assert!(catalog
            .get_course("CS2500")
            .is_some_and(|registered| registered.units == 4));
    }

    #[test]
    fn test_add_prerequisite_requires_registered_course() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("CS2500", 4));

        let missing_course = catalog.add_prerequisite("CS2510", "CS2500");
        assert_eq!(
            missing_course,
            Err(CatalogError::UnknownCourse("CS2510".to_string()))
        );

        let missing_prerequisite = catalog.add_prerequisite("CS2500", "CS1800");
        assert_eq!(
            missing_prerequisite,
            Err(CatalogError::UnknownPrerequisite {
                course: "CS2500".to_string(),
                prerequisite: "CS1800".to_string(),
            })
        );
    }

    #[test]
    fn test_self_prerequisite_rejected() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("CS2500", 4));

        let result = catalog.add_prerequisite("CS2500", "CS2500");
        assert_eq!(
            result,
            Err(CatalogError::SelfPrerequisite("CS2500".to_string()))
        );
    }

    #[test]
    fn test_repeated_edge_is_ignored() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("CS2500", 4));
        catalog.add_course(course("CS2510", 4));

        catalog
            .add_prerequisite("CS2510", "CS2500")
            .expect("edge should wire");
        catalog
            .add_prerequisite("CS2510", "CS2500")
            .expect("repeat should be accepted");

        assert_eq!(
            catalog.prerequisites_of("CS2510"),
            Some(&vec!["CS2500".to_string()])
        );
    }

    #[test]
    fn test_validate_accepts_acyclic_graph() {
        let catalog = chain_catalog();
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_validate_detects_cycle() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("CS2500", 4));
        catalog.add_course(course("CS2510", 4));
        catalog
            .add_prerequisite("CS2510", "CS2500")
            .expect("edge should wire");
        catalog
            .add_prerequisite("CS2500", "CS2510")
            .expect("edge should wire");

        assert_eq!(catalog.validate(), Err(CatalogError::PrerequisiteCycle));
    }

    #[test]
    fn test_materialize_attaches_nested_chain() {
        let catalog = chain_catalog();

        let algo = catalog.materialize("CS3500").expect("course should build");
        assert_eq!(algo.prerequisites().len(), 1);

        let ood = &algo.prerequisites()[0];
        assert_eq!(ood.id, "CS2510");
        assert_eq!(ood.prerequisites().len(), 1);
        assert_eq!(ood.prerequisites()[0].id, "CS2500");
    }

    #[test]
    fn test_materialize_unknown_course() {
        let catalog = chain_catalog();

        assert_eq!(
            catalog.materialize("NOPE"),
            Err(CatalogError::UnknownCourse("NOPE".to_string()))
        );
    }

    #[test]
    fn test_materialize_reports_cycle() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("CS2500", 4));
        catalog.add_course(course("CS2510", 4));
        catalog
            .add_prerequisite("CS2510", "CS2500")
            .expect("edge should wire");
        catalog
            .add_prerequisite("CS2500", "CS2510")
            .expect("edge should wire");

        assert_eq!(
            catalog.materialize("CS2500"),
            Err(CatalogError::PrerequisiteCycle)
        );
    }

    #[test]
    fn test_courses_are_listed_sorted() {
        let catalog = chain_catalog();

        let ids: Vec<&str> = catalog
            .courses()
            .iter()
            .map(|course| course.id.as_str())
            .collect();
        assert_eq!(ids, vec!["CS2500", "CS2510", "CS3500"]);
    }

    #[test]
    fn test_display_lists_sorted_courses() {
        let catalog = chain_catalog();
        let output = catalog.to_string();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Catalog (3 courses):");
        assert_eq!(lines[1], "  CS2500 → (no prerequisites)");
        assert_eq!(lines[2], "  CS2510 → CS2500");
        assert_eq!(lines[3], "  CS3500 → CS2510");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::UnknownCourse("CS9999".to_string()).to_string(),
            "Course 'CS9999' not found in catalog"
        );
        assert_eq!(
            CatalogError::PrerequisiteCycle.to_string(),
            "Cycle detected in prerequisite graph"
        );
    }
}
