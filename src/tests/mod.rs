
#[cfg(test)]
mod catalog_test;
#[cfg(test)]
mod course_application_test;
#[cfg(test)]
mod profile_test;
#[cfg(test)]
mod registration_test;

pub use setup_test::{setup_test, setup_test_with, TestUtils};
