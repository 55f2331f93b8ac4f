pub mod account;
pub mod application_profile;
pub mod application_sequence;
pub mod catalog_entry;
pub mod catalog_link;
pub mod course_application;
pub mod education_profile;
pub mod registration_session;
