//! Data models for `NuEnroll`

pub mod catalog;
pub mod course;
pub mod offering;
pub mod student;
pub mod transcript;

pub use catalog::{Catalog, CatalogError};
pub use course::Course;
pub use offering::{Offering, OfferingId};
pub use student::Student;
pub use transcript::{GradedCourse, Term, Transcript, PASS_GRADE};
