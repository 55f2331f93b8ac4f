//! Admissions backend.
//!
//! Applicants register with an email address and a phone number, prove both
//! with one-time codes, set a password and then fill in their application and
//! education profiles and pick courses from the catalog. Staff confirm fee
//! payment.

#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod auth;
pub mod boot;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod course_selection;
pub mod database;
pub mod emails;
pub mod environment;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod password;
pub mod profiles;
pub mod rate_limiting;
pub mod registration;
pub mod router;
pub mod setup_tracing;
pub mod sms;
pub mod token;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod tests;
