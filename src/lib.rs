//! Shared library for `NuEnroll`
//! Validates term enrollment requests against academic business rules and
//! commits clean requests to the student's current term.

pub mod core;
pub mod logger;

pub use crate::core::config::{Config, ConfigOverrides};
pub use crate::core::enrollment::{evaluate, evaluate_fail_fast, Evaluation, Violation};
pub use crate::core::models::{
    Catalog, CatalogError, Course, GradedCourse, Offering, OfferingId, Student, Term, Transcript,
};
pub use crate::core::{config, enrollment, get_version, models};
