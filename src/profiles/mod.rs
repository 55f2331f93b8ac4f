//! Applicant-owned application and education records.

pub mod application;
pub mod education;

pub use application::ApplicationProfileInput;
pub use education::EducationProfileInput;
